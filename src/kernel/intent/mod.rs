pub mod classifier;
pub mod rules;
pub mod types;

pub use classifier::IntentClassifier;
pub use types::{Entities, EntityKind, Intent, ParsedCommand, Selection, View};
