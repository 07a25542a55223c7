use tracing::debug;

use super::rules::{self, IntentRule, Utterance, RULES};
use super::types::{Entities, Intent, ParsedCommand};
use crate::kernel::state::{ConversationState, ConversationTask};

/// Maps a transcript to a `ParsedCommand`.
///
/// Pure: reads the conversation state, never writes it.
pub struct IntentClassifier {
    rules: &'static [IntentRule],
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// The fresh-command table, highest priority first.
    pub fn rules(&self) -> &[IntentRule] {
        self.rules
    }

    pub fn classify(&self, transcript: &str, state: &ConversationState) -> ParsedCommand {
        let utterance = Utterance::new(transcript);
        if utterance.is_empty() {
            return ParsedCommand::unknown();
        }

        // Continuation-first: a pending task turns short replies into CONFIRM
        // before any other rule gets a look.
        if state.task() != ConversationTask::None {
            if let Some(selection) = rules::confirmation(&utterance) {
                debug!("Continuation of {:?}: {:?}", state.task(), selection);
                return ParsedCommand::new(
                    Intent::Confirm,
                    Entities {
                        selection: Some(selection.as_entity()),
                        ..Entities::default()
                    },
                );
            }
        }

        for rule in self.rules {
            if (rule.matches)(&utterance) {
                let entities = (rule.extract)(&utterance);
                debug!("Classified as {:?}", rule.intent);
                return ParsedCommand::new(rule.intent, entities);
            }
        }

        debug!("No rule matched");
        ParsedCommand::unknown()
    }
}
