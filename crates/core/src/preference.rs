//! Preference model: how strongly each brain type favours a resource type.

use crate::brain_type::BrainType;
use crate::config::NavigatorConfig;

/// Canonical form of a resource type: trimmed, lowercased, then mapped
/// through the synonym table (`book` becomes `article`, and so on).
pub fn normalize_resource_type(config: &NavigatorConfig, resource_type: &str) -> String {
    let lowered = resource_type.trim().to_lowercase();
    match config.synonyms.get(&lowered) {
        Some(canonical) => canonical.clone(),
        None => lowered,
    }
}

impl NavigatorConfig {
    fn lookup_weight(&self, brain_type: BrainType, resource_type: &str) -> Option<f64> {
        let normalized = normalize_resource_type(self, resource_type);
        self.preferences
            .get(&brain_type)
            .and_then(|table| table.get(&normalized))
            .copied()
    }

    /// Configured weight for the pair, or `missing_weight` (0 by default)
    /// when the pair is absent. Used for classification.
    pub fn weight_of(&self, brain_type: BrainType, resource_type: &str) -> f64 {
        self.lookup_weight(brain_type, resource_type)
            .unwrap_or(self.missing_weight)
    }

    /// Configured weight for the pair, or `ranking_fallback_weight` (0.1 by
    /// default) when the pair is absent. Used to score ranker candidates.
    pub fn ranking_weight_of(&self, brain_type: BrainType, resource_type: &str) -> f64 {
        self.lookup_weight(brain_type, resource_type)
            .unwrap_or(self.ranking_fallback_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NavigatorConfig {
        NavigatorConfig::default()
    }

    #[test]
    fn normalizes_synonyms_and_case() {
        let c = config();
        assert_eq!(normalize_resource_type(&c, "Podcast"), "video");
        assert_eq!(normalize_resource_type(&c, " BOOK "), "article");
        assert_eq!(normalize_resource_type(&c, "exercise"), "tutorial");
        assert_eq!(normalize_resource_type(&c, "documentation"), "documentation");
    }

    #[test]
    fn visual_weights() {
        let c = config();
        assert_eq!(c.weight_of(BrainType::Visual, "video"), 0.4);
        assert_eq!(c.weight_of(BrainType::Visual, "tutorial"), 0.3);
        assert_eq!(c.weight_of(BrainType::Visual, "article"), 0.2);
        assert_eq!(c.weight_of(BrainType::Visual, "course"), 0.1);
    }

    #[test]
    fn synonym_resolves_before_lookup() {
        let c = config();
        assert_eq!(c.weight_of(BrainType::Visual, "podcast"), 0.4);
        assert_eq!(c.weight_of(BrainType::ReadWrite, "book"), 0.4);
    }

    #[test]
    fn unknown_pair_uses_zero_for_classification() {
        assert_eq!(config().weight_of(BrainType::Auditory, "documentation"), 0.0);
    }

    #[test]
    fn unknown_pair_uses_fallback_for_ranking() {
        assert_eq!(
            config().ranking_weight_of(BrainType::Auditory, "documentation"),
            0.1
        );
    }

    #[test]
    fn unconfigured_brain_type_degrades_to_defaults() {
        let mut c = config();
        c.preferences.remove(&BrainType::Kinesthetic);
        assert_eq!(c.weight_of(BrainType::Kinesthetic, "tutorial"), 0.0);
        assert_eq!(c.ranking_weight_of(BrainType::Kinesthetic, "tutorial"), 0.1);
    }

    #[test]
    fn known_pair_is_same_for_both_defaults() {
        let c = config();
        assert_eq!(
            c.weight_of(BrainType::Kinesthetic, "tutorial"),
            c.ranking_weight_of(BrainType::Kinesthetic, "tutorial")
        );
    }
}
