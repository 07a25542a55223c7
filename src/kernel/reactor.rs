use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::dispatcher::DispatchResult;
use super::event::{ControlSignal, EmergencySignal, Event, Transcript};
use super::pipeline::VoicePipeline;
use crate::error::PipelineError;

/// What one reactor step did with an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Dispatched(DispatchResult),
    Dropped(PipelineError),
    Control(ControlSignal),
    Shutdown,
}

/// Async driver around a [`VoicePipeline`].
///
/// Drains one event at a time. The emergency channel is always polled first,
/// so an SOS never waits behind queued transcripts. Stops and cancels made
/// through a shared [`SessionControl`](super::session::SessionControl) are
/// applied as soon as they are signalled.
pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    emergencies: mpsc::Receiver<EmergencySignal>,
    pub pipeline: VoicePipeline,
}

impl Reactor {
    pub fn new(pipeline: VoicePipeline, buffer: usize) -> (Self, ReactorHandle) {
        let buffer = buffer.max(1);
        let (events_tx, events_rx) = mpsc::channel(buffer);
        let (emergency_tx, emergency_rx) = mpsc::channel(buffer);
        let reactor = Self {
            receiver: events_rx,
            emergencies: emergency_rx,
            pipeline,
        };
        let handle = ReactorHandle {
            events: events_tx,
            emergencies: emergency_tx,
        };
        (reactor, handle)
    }

    /// Pure step: applies one event to the pipeline. No awaiting.
    pub fn step(&mut self, event: Event) -> Step {
        match event {
            Event::Transcript(transcript) => match self.pipeline.handle_transcript(&transcript) {
                Ok(result) => Step::Dispatched(result),
                Err(err) => Step::Dropped(err),
            },
            Event::Control(ControlSignal::StartSession) => {
                self.pipeline.start_session();
                Step::Control(ControlSignal::StartSession)
            }
            Event::Control(ControlSignal::StopSession) => {
                self.pipeline.stop_session();
                Step::Control(ControlSignal::StopSession)
            }
            Event::Control(ControlSignal::Cancel) => {
                self.pipeline.cancel();
                Step::Control(ControlSignal::Cancel)
            }
            Event::Control(ControlSignal::Shutdown) => Step::Shutdown,
        }
    }

    pub fn on_emergency(&mut self, signal: EmergencySignal) -> DispatchResult {
        warn!("Emergency signal from {}", signal.source);
        self.pipeline.trigger_emergency()
    }

    /// Async driver loop. Returns on shutdown or once every handle is dropped.
    pub async fn run(&mut self) {
        info!("Voice reactor started");
        let mut emergencies_open = true;
        let control = self.pipeline.control();

        loop {
            tokio::select! {
                biased;

                signal = self.emergencies.recv(), if emergencies_open => match signal {
                    Some(signal) => {
                        self.on_emergency(signal);
                    }
                    None => emergencies_open = false,
                },

                _ = control.changed() => self.pipeline.sync_control(),

                event = self.receiver.recv() => {
                    let Some(event) = event else { break };
                    match self.step(event) {
                        Step::Shutdown => break,
                        Step::Dropped(err) => debug!("Dropped transcript: {}", err),
                        Step::Dispatched(_) | Step::Control(_) => {}
                    }
                }
            }
        }

        self.pipeline.stop_session();
        info!("Voice reactor stopped");
    }
}

/// Sending side of a [`Reactor`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ReactorHandle {
    events: mpsc::Sender<Event>,
    emergencies: mpsc::Sender<EmergencySignal>,
}

impl ReactorHandle {
    pub async fn transcript(&self, text: &str) -> Result<(), mpsc::error::SendError<Event>> {
        self.events.send(Event::Transcript(Transcript::new(text))).await
    }

    pub async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.events.send(event).await
    }

    pub async fn start(&self) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(Event::Control(ControlSignal::StartSession)).await
    }

    pub async fn stop(&self) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(Event::Control(ControlSignal::StopSession)).await
    }

    pub async fn cancel(&self) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(Event::Control(ControlSignal::Cancel)).await
    }

    pub async fn shutdown(&self) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(Event::Control(ControlSignal::Shutdown)).await
    }

    pub async fn emergency(&self, source: &str) -> Result<(), mpsc::error::SendError<EmergencySignal>> {
        self.emergencies.send(EmergencySignal::new(source)).await
    }
}
