use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::ConfigError;
use crate::kernel::capabilities::Member;

/// Accessibility persona of the person using the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    #[default]
    None,
    Blind,
    Deaf,
    SpeechImpaired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub persona: Persona,
    /// Speak every message, not only for the blind persona.
    pub speak_feedback: bool,
    /// BCP-47 tag handed to the speech sink.
    pub speech_language: String,
    /// Attributed when no family member is selected.
    pub default_member: Member,
    /// Upper bound on facilities offered in one booking prompt.
    pub max_choices: usize,
    /// Capacity of the reactor's event channels.
    pub event_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            persona: Persona::None,
            speak_feedback: false,
            speech_language: "en-IN".to_string(),
            default_member: Member::default(),
            max_choices: 3,
            event_buffer: 100,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
