use serde_json::{json, Map, Value};

use super::dto::DaysAvailable;

pub const QUIZ_MAX_OUTPUT_TOKENS: u32 = 800;

pub fn summarize_prompt(text: &str) -> String {
    format!("Summarize the following text clearly and concisely:\n\n{}", text)
}

pub fn quiz_prompt(topic: &str) -> String {
    format!(
        "Generate 5 multiple choice questions about \"{}\". For each question, provide 4 options \
         (A, B, C, D) and indicate the correct answer. Format the response as JSON.",
        topic
    )
}

pub fn quiz_options() -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("maxOutputTokens".into(), json!(QUIZ_MAX_OUTPUT_TOKENS));
    options
}

pub fn planner_prompt(subjects: &[String], days: &DaysAvailable) -> String {
    format!(
        "Create a study plan for these subjects: {}. I have {} days available. Provide a \
         day-by-day breakdown with recommended study hours for each subject.",
        subjects.join(", "),
        days
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_prompt_lists_subjects_and_days() {
        let prompt = planner_prompt(
            &["Maths".to_string(), "Chemistry".to_string()],
            &DaysAvailable::Count(4),
        );
        assert!(prompt.contains("Maths, Chemistry"));
        assert!(prompt.contains("I have 4 days available"));
    }

    #[test]
    fn quiz_prompt_quotes_topic() {
        assert!(quiz_prompt("photosynthesis").contains("about \"photosynthesis\""));
        assert_eq!(quiz_options()["maxOutputTokens"], 800);
    }

    #[test]
    fn summarize_prompt_keeps_text() {
        assert!(summarize_prompt("Cells divide.").ends_with("\n\nCells divide."));
    }
}
