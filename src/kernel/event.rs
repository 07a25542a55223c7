/// A finalized speech transcript from the capture service.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub confidence: f32,
    /// Carried for logging; every transcript is treated as final.
    pub is_final: bool,
}

impl Transcript {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            confidence: 1.0,
            is_final: true,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    StartSession,
    StopSession,
    Cancel,
    /// Ends the reactor loop.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Transcript(Transcript),
    Control(ControlSignal),
}

impl Event {
    pub fn transcript(text: &str) -> Self {
        Event::Transcript(Transcript::new(text))
    }
}

/// SOS request. Travels on its own channel so it never queues behind speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencySignal {
    pub source: String,
}

impl EmergencySignal {
    pub fn new(source: &str) -> Self {
        Self { source: source.to_string() }
    }
}
