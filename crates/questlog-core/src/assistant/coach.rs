//! Prompts and fallbacks for the three coaching requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::{GenerationRequest, TextGenerator};
use crate::error::{AssistantError, ValidationError};
use crate::model::{Habit, Task};
use crate::stats::{completed_habit_count, completed_task_count, pending_task_count};

pub const MOTIVATION_FALLBACK: &str = "Focus on the step in front of you, not the whole staircase.";
pub const TIP_FALLBACK: &str = "Action creates motivation, not the other way around.";

/// Most subtasks kept from a breakdown.
pub const MAX_SUBTASKS: usize = 5;

/// Progress figures the motivation prompt is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationInput {
    pub completed_tasks: usize,
    pub completed_habits: usize,
    pub pending_tasks: usize,
}

impl MotivationInput {
    pub fn from_lists(habits: &[Habit], tasks: &[Task]) -> Self {
        Self {
            completed_tasks: completed_task_count(tasks),
            completed_habits: completed_habit_count(habits),
            pending_tasks: pending_task_count(tasks),
        }
    }
}

/// Preset tip topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TipTopic {
    Procrastination,
    DeepWork,
    Energy,
    Discipline,
    Burnout,
}

impl TipTopic {
    pub const ALL: [TipTopic; 5] = [
        TipTopic::Procrastination,
        TipTopic::DeepWork,
        TipTopic::Energy,
        TipTopic::Discipline,
        TipTopic::Burnout,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TipTopic::Procrastination => "procrastination",
            TipTopic::DeepWork => "deep-work",
            TipTopic::Energy => "energy",
            TipTopic::Discipline => "discipline",
            TipTopic::Burnout => "burnout",
        }
    }

    /// Label used in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            TipTopic::Procrastination => "Procrastination",
            TipTopic::DeepWork => "Deep Work",
            TipTopic::Energy => "Energy Management",
            TipTopic::Discipline => "Self Discipline",
            TipTopic::Burnout => "Avoiding Burnout",
        }
    }
}

impl fmt::Display for TipTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TipTopic {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TipTopic::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(wanted) || t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "topic".into(),
                message: format!("unknown topic '{wanted}'"),
            })
    }
}

/// Coaching requests with guaranteed fallbacks.
pub struct Coach<G> {
    generator: Option<G>,
}

impl<G: TextGenerator> Coach<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A coach that answers every request with its fallback.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Short motivational message for the current progress.
    pub async fn motivation(&self, input: &MotivationInput) -> String {
        let prompt = format!(
            "You are a high-energy productivity coach. \
             The user has completed {} tasks and {} habits today. \
             Total pending tasks: {}. \
             Give a short, punchy, 2-sentence motivational quote or advice specific to this status. \
             Do not use markdown. Just plain text.",
            input.completed_tasks, input.completed_habits, input.pending_tasks
        );
        match self.ask(GenerationRequest::text(prompt)).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, request = "motivation", "assistant request failed, using fallback");
                MOTIVATION_FALLBACK.to_string()
            }
        }
    }

    /// Break a task into a handful of smaller steps. Empty on failure.
    pub async fn suggest_subtasks(&self, task_title: &str) -> Vec<String> {
        let prompt = format!(
            "Break down the following task into 3-5 smaller, actionable sub-steps.\n\
             Task: \"{task_title}\"\n\
             Return ONLY a JSON array of strings. No markdown formatting.\n\
             Example: [\"Step 1\", \"Step 2\"]"
        );
        let parsed = self
            .ask(GenerationRequest::json(prompt))
            .await
            .and_then(|text| parse_subtasks(&text));
        match parsed {
            Ok(steps) => steps,
            Err(e) => {
                warn!(error = %e, request = "subtasks", "assistant request failed, using fallback");
                Vec::new()
            }
        }
    }

    /// One short, actionable tip about `topic`.
    pub async fn productivity_tip(&self, topic: &str) -> String {
        let prompt = format!(
            "Provide a unique, unconventional, and highly effective productivity hack \
             or psychological trick regarding \"{topic}\". \
             Keep it under 60 words. Be witty and actionable. Do not use markdown."
        );
        match self.ask(GenerationRequest::text(prompt)).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, request = "tip", "assistant request failed, using fallback");
                TIP_FALLBACK.to_string()
            }
        }
    }

    async fn ask(&self, request: GenerationRequest) -> Result<String, AssistantError> {
        match &self.generator {
            Some(generator) => generator.generate(&request).await,
            None => Err(AssistantError::Disabled),
        }
    }
}

/// Parse a JSON array of step strings, tolerating a surrounding markdown
/// code fence. Blank steps are dropped and at most [`MAX_SUBTASKS`] kept.
pub fn parse_subtasks(text: &str) -> Result<Vec<String>, AssistantError> {
    let body = strip_code_fence(text.trim());
    let steps: Vec<String> =
        serde_json::from_str(body).map_err(|e| AssistantError::Malformed(e.to_string()))?;
    Ok(steps
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SUBTASKS)
        .collect())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    struct Scripted {
        reply: Result<String, String>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl Scripted {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err("connection refused".into()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for Scripted {
        fn generate(
            &self,
            request: &GenerationRequest,
        ) -> impl Future<Output = Result<String, AssistantError>> + Send {
            self.seen.lock().unwrap().push(request.clone());
            let reply = self
                .reply
                .clone()
                .map_err(AssistantError::Malformed);
            async move { reply }
        }
    }

    fn input() -> MotivationInput {
        MotivationInput {
            completed_tasks: 2,
            completed_habits: 1,
            pending_tasks: 3,
        }
    }

    #[tokio::test]
    async fn motivation_uses_counts_and_trims() {
        let coach = Coach::new(Scripted::ok("  You got this.\n"));
        assert_eq!(coach.motivation(&input()).await, "You got this.");
        let seen = coach.generator.as_ref().unwrap().seen.lock().unwrap().clone();
        assert!(seen[0].prompt.contains("completed 2 tasks and 1 habits"));
        assert!(seen[0].prompt.contains("Total pending tasks: 3"));
        assert!(!seen[0].json);
    }

    #[tokio::test]
    async fn failures_fall_back() {
        let coach = Coach::new(Scripted::failing());
        assert_eq!(coach.motivation(&input()).await, MOTIVATION_FALLBACK);
        assert_eq!(coach.productivity_tip("Deep Work").await, TIP_FALLBACK);
        assert!(coach.suggest_subtasks("Plan trip").await.is_empty());
    }

    #[tokio::test]
    async fn disabled_coach_falls_back() {
        let coach: Coach<Scripted> = Coach::disabled();
        assert!(!coach.is_enabled());
        assert_eq!(coach.motivation(&input()).await, MOTIVATION_FALLBACK);
        assert_eq!(coach.productivity_tip("energy").await, TIP_FALLBACK);
    }

    #[tokio::test]
    async fn subtasks_are_parsed_from_json() {
        let coach = Coach::new(Scripted::ok(r#"["Book flights", "Reserve hotel", "Pack"]"#));
        assert_eq!(
            coach.suggest_subtasks("Plan trip").await,
            vec!["Book flights", "Reserve hotel", "Pack"]
        );
        let seen = coach.generator.as_ref().unwrap().seen.lock().unwrap().clone();
        assert!(seen[0].json);
        assert!(seen[0].prompt.contains("\"Plan trip\""));
    }

    #[tokio::test]
    async fn malformed_subtasks_fall_back_to_empty() {
        let coach = Coach::new(Scripted::ok("Step one, then step two"));
        assert!(coach.suggest_subtasks("Plan trip").await.is_empty());
        let coach = Coach::new(Scripted::ok(r#"{"steps": ["a"]}"#));
        assert!(coach.suggest_subtasks("Plan trip").await.is_empty());
    }

    #[test]
    fn parse_subtasks_handles_fences_blanks_and_limit() {
        let fenced = "```json\n[\"a\", \" \", \"b\"]\n```";
        assert_eq!(parse_subtasks(fenced).unwrap(), vec!["a", "b"]);
        let many = r#"["1","2","3","4","5","6","7"]"#;
        assert_eq!(parse_subtasks(many).unwrap().len(), MAX_SUBTASKS);
    }

    #[test]
    fn topics_parse_from_id_or_label() {
        assert_eq!("deep-work".parse::<TipTopic>().unwrap(), TipTopic::DeepWork);
        assert_eq!("avoiding burnout".parse::<TipTopic>().unwrap(), TipTopic::Burnout);
        assert!("naps".parse::<TipTopic>().is_err());
        assert_eq!(TipTopic::Energy.to_string(), "Energy Management");
    }

    #[test]
    fn motivation_input_counts_lists() {
        let habits = crate::store::seed_habits();
        let tasks = crate::store::seed_tasks();
        assert_eq!(
            MotivationInput::from_lists(&habits, &tasks),
            MotivationInput {
                completed_tasks: 1,
                completed_habits: 1,
                pending_tasks: 1,
            }
        );
    }
}
