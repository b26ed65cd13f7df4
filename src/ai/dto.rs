use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub topic: Option<String>,
}

/// Fields stay raw JSON so a wrong shape gets the planner's own 400 message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerRequest {
    pub subjects: Option<Value>,
    pub days_available: Option<Value>,
}

impl PlannerRequest {
    /// `None` unless `subjects` is a non-empty array and `daysAvailable` is a
    /// positive number or non-blank text.
    pub fn validate(self) -> Option<(Vec<String>, DaysAvailable)> {
        let subjects: Vec<String> = match self.subjects? {
            Value::Array(items) if !items.is_empty() => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            _ => return None,
        };
        let days = DaysAvailable::from_value(self.days_available?)?;
        Some((subjects, days))
    }
}

/// Clients send the day count either as a number or as free text ("5", "a week").
#[derive(Debug, Clone, PartialEq)]
pub enum DaysAvailable {
    Count(u64),
    Text(String),
}

impl DaysAvailable {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().filter(|n| *n > 0).map(DaysAvailable::Count),
            Value::String(s) if !s.trim().is_empty() => Some(DaysAvailable::Text(s)),
            _ => None,
        }
    }
}

impl fmt::Display for DaysAvailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysAvailable::Count(n) => write!(f, "{}", n),
            DaysAvailable::Text(s) => f.write_str(s.trim()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub quiz: String,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn planner(body: Value) -> Option<(Vec<String>, DaysAvailable)> {
        serde_json::from_value::<PlannerRequest>(body).unwrap().validate()
    }

    #[test]
    fn planner_accepts_number_or_text_days() {
        let (subjects, days) = planner(json!({ "subjects": ["Maths"], "daysAvailable": 3 })).unwrap();
        assert_eq!(subjects, vec!["Maths".to_string()]);
        assert_eq!(days, DaysAvailable::Count(3));

        let (_, days) = planner(json!({ "subjects": ["Maths"], "daysAvailable": " a week " })).unwrap();
        assert_eq!(days.to_string(), "a week");
    }

    #[test]
    fn planner_rejects_wrong_shapes() {
        assert!(planner(json!({ "subjects": "Maths", "daysAvailable": 3 })).is_none());
        assert!(planner(json!({ "subjects": [], "daysAvailable": 3 })).is_none());
        assert!(planner(json!({ "subjects": ["Maths"], "daysAvailable": -2 })).is_none());
        assert!(planner(json!({ "subjects": ["Maths"], "daysAvailable": true })).is_none());
        assert!(planner(json!({ "subjects": ["Maths"], "daysAvailable": "  " })).is_none());
    }
}
