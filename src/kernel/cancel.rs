use crate::kernel::intent::rules::Utterance;

const CANCEL_PHRASES: &[&str] = &[
    "stop", "cancel", "cancel that", "stop that", "never mind", "nevermind", "stop listening",
    "forget it", "abort",
];

// Politeness around a cancel phrase doesn't change its meaning.
const SOFTENERS: &[&str] = &["please", "ok", "okay", "just", "oh"];

/// Recognizes spoken cancellation before classification sees the transcript.
#[derive(Debug, Default)]
pub struct CancellationRegistry;

impl CancellationRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn is_cancel(&self, transcript: &str) -> bool {
        let utterance = Utterance::new(transcript);
        let core: Vec<&str> = utterance
            .tokens()
            .iter()
            .map(String::as_str)
            .filter(|t| !SOFTENERS.contains(t))
            .collect();
        if core.is_empty() {
            return false;
        }
        let phrase = core.join(" ");
        CANCEL_PHRASES.contains(&phrase.as_str())
    }
}
