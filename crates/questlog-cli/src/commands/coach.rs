//! Assistant-backed coaching commands.
//!
//! These never fail because of the text-generation service: any problem
//! there yields the fallback text.

use clap::Subcommand;
use questlog_core::{Config, MotivationInput, TipTopic};
use serde_json::json;

use super::{block_on, open_coach, open_store};

#[derive(Subcommand)]
pub enum CoachAction {
    /// A motivational line based on today's progress
    Motivate,
    /// A productivity tip about a topic
    Tip {
        /// Preset id (see `coach topics`) or any free-text topic
        topic: String,
    },
    /// List preset tip topics
    Topics,
}

pub fn run(action: CoachAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CoachAction::Motivate => {
            let store = open_store()?;
            let input = MotivationInput::from_lists(store.habits(), store.tasks());
            let coach = open_coach(&Config::load_or_default());
            let text = block_on(coach.motivation(&input))?;
            println!("{text}");
        }
        CoachAction::Tip { topic } => {
            let label = match topic.parse::<TipTopic>() {
                Ok(preset) => preset.label().to_string(),
                Err(_) => topic,
            };
            let coach = open_coach(&Config::load_or_default());
            let text = block_on(coach.productivity_tip(&label))?;
            println!("{text}");
        }
        CoachAction::Topics => {
            let topics: Vec<_> = TipTopic::ALL
                .iter()
                .map(|t| json!({ "id": t.id(), "label": t.label() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&topics)?);
        }
    }
    Ok(())
}
