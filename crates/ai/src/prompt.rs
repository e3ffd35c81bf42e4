//! Chat messages sent to the model.

use neuronav_core::generation::AuthorRequest;

pub const SYSTEM_MESSAGE: &str = "You are an expert learning advisor who creates personalized \
educational roadmaps based on learning styles. Always respond with valid JSON format.";

/// Build the user message for a roadmap request.
pub fn build_user_prompt(request: &AuthorRequest) -> String {
    let topic = &request.topic;
    let brain_type = request.brain_type;
    let intensity = &request.intensity;
    format!(
        "Generate a personalized learning roadmap for the topic: {topic}, tailored to a \
{brain_type} learner (one of: Visual, Auditory, Kinesthetic, ReadWrite). Return the output \
in JSON with the following fields:
1) 'overview': short summary of the learning goal,
2) 'strategies': specific learning strategies for {brain_type} learners,
3) 'resources': recommended resources (books, free courses, tutorials, tools),
4) 'timeline': both (a) a 'phased_roadmap' object with 'beginner', 'intermediate' and \
'advanced' lists and (b) a week-by-week breakdown,
5) 'references': 3-5 free or widely available links to high-quality learning material.

Additional context:
- Learning intensity: {intensity}
- Focus on {brain_type}-specific learning methods and resources
- Ensure all resources are accessible and practical

Return valid JSON only, with no additional text or markdown formatting."
    )
}

#[cfg(test)]
mod tests {
    use neuronav_core::brain_type::BrainType;

    use super::*;

    #[test]
    fn prompt_mentions_topic_style_and_intensity() {
        let prompt = build_user_prompt(&AuthorRequest {
            topic: "Rust".into(),
            brain_type: BrainType::Kinesthetic,
            intensity: "advanced".into(),
        });
        assert!(prompt.contains("topic: Rust"));
        assert!(prompt.contains("Kinesthetic learner"));
        assert!(prompt.contains("Learning intensity: advanced"));
        assert!(prompt.contains("phased_roadmap"));
    }
}
