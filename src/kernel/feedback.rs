use crate::config::{PipelineConfig, Persona};
use crate::kernel::capabilities::FeedbackSink;
use crate::kernel::dispatcher::DispatchResult;

/// Renders every dispatch outcome as a toast and, when appropriate, speech.
pub struct FeedbackChannel {
    sink: Box<dyn FeedbackSink + Send>,
    persona: Persona,
    speak_feedback: bool,
    language: String,
}

impl FeedbackChannel {
    pub fn new(sink: Box<dyn FeedbackSink + Send>, config: &PipelineConfig) -> Self {
        Self {
            sink,
            persona: config.persona,
            speak_feedback: config.speak_feedback,
            language: config.speech_language.clone(),
        }
    }

    /// Blind users always hear feedback, deaf users never do.
    pub fn should_speak(&self) -> bool {
        match self.persona {
            Persona::Blind => true,
            Persona::Deaf => false,
            Persona::None | Persona::SpeechImpaired => self.speak_feedback,
        }
    }

    /// Call once per dispatched command, after the state has advanced.
    pub fn notify(&mut self, result: &DispatchResult) {
        self.sink.show_toast(&result.message);
        if self.should_speak() {
            self.sink.speak(&result.message, &self.language);
        }
    }
}
