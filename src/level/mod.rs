//! Level chunks: metadata, placed things, triggers and variables.

pub mod info;
pub mod thing;
pub mod trigger;
pub mod variable;

pub use info::{FilePath, GameLevel, LevelFlags, SpeechInfo};
pub use thing::{read_things, Thing};
pub use trigger::{read_triggers, Action, ActionType, Condition, TargetType, Trigger, TriggerKind};
pub use variable::{read_variables, Variable, Variables};
