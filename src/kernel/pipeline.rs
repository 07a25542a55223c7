use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::kernel::cancel::CancellationRegistry;
use crate::kernel::capabilities::{Capabilities, FeedbackSink, MemberResolver};
use crate::kernel::dispatcher::{DispatchResult, Dispatcher, Rejection};
use crate::kernel::event::Transcript;
use crate::kernel::feedback::FeedbackChannel;
use crate::kernel::intent::{Intent, IntentClassifier, View};
use crate::kernel::session::{SessionControl, SessionId};
use crate::kernel::state::{ConversationState, ConversationTask};
use crate::kernel::telemetry::{TelemetryEvent, TelemetryRecorder};
use crate::kernel::turn::Turn;

const CANCELLED: &str = "Okay, cancelled.";
const CANCEL_DEFERRED: &str = "Okay, I'll cancel as soon as this finishes.";
const EMERGENCY_ACTIVATED: &str = "Emergency mode activated. Help is on the way.";
const EMERGENCY_FAILED: &str = "I couldn't reach emergency services. Please call for help directly.";

/// One voice session's worth of classify, dispatch, advance and notify.
///
/// Owns the conversation state and the host seams. Transcripts are processed
/// strictly one at a time; the busy flag in [`SessionControl`] rejects any
/// transcript that arrives while another is in flight.
pub struct VoicePipeline {
    classifier: IntentClassifier,
    dispatcher: Dispatcher,
    cancel_registry: CancellationRegistry,
    state: ConversationState,
    feedback: FeedbackChannel,
    capabilities: Box<dyn Capabilities + Send>,
    members: Box<dyn MemberResolver + Send>,
    control: SessionControl,
    telemetry: TelemetryRecorder,
    turn: Turn,
    session: Option<SessionId>,
    session_turns: u64,
}

impl VoicePipeline {
    pub fn new(
        config: &PipelineConfig,
        capabilities: Box<dyn Capabilities + Send>,
        members: Box<dyn MemberResolver + Send>,
        sink: Box<dyn FeedbackSink + Send>,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            dispatcher: Dispatcher::new(config),
            cancel_registry: CancellationRegistry::new(),
            state: ConversationState::new(),
            feedback: FeedbackChannel::new(sink, config),
            capabilities,
            members,
            control: SessionControl::new(),
            telemetry: TelemetryRecorder::new(),
            turn: Turn::new(),
            session: None,
            session_turns: 0,
        }
    }

    /// A shareable handle on the listening/busy flags.
    pub fn control(&self) -> SessionControl {
        self.control.clone()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn telemetry(&self) -> &TelemetryRecorder {
        &self.telemetry
    }

    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Starts listening. Calling it on a live session keeps the same id; a
    /// session stopped through a shared handle is closed first.
    pub fn start_session(&mut self) -> SessionId {
        self.sync_control();
        self.control.start();
        if let Some(id) = self.session {
            return id;
        }
        let id = SessionId::new();
        self.session = Some(id);
        self.session_turns = 0;
        self.telemetry.record(TelemetryEvent::SessionStarted { session: id });
        info!("Voice session {:?} started", id.0);
        id
    }

    /// Stops listening. Idle pipelines end the session at once; a running
    /// dispatch finishes first.
    pub fn stop_session(&mut self) {
        self.control.stop();
        self.sync_control();
    }

    /// Applies requests made through a shared [`SessionControl`] handle: a
    /// pending cancel resets the task, a stop ends the session. No-op while a
    /// dispatch holds the pipeline; `finish_dispatch` catches up then.
    pub fn sync_control(&mut self) {
        if self.control.is_busy() {
            return;
        }
        if self.control.take_cancel() {
            self.cancel_now(false);
        }
        if !self.control.is_listening() && self.session.is_some() {
            self.end_session();
        }
    }

    /// Cancels the active task. Returns false when the cancel had to be
    /// deferred until the current dispatch completes.
    pub fn cancel(&mut self) -> bool {
        if self.control.is_busy() {
            self.control.request_cancel();
            debug!("Cancel deferred until dispatch completes");
            return false;
        }
        self.control.take_cancel();
        self.cancel_now(false);
        true
    }

    /// SOS. Preempts whatever task is active and is honoured with or without
    /// a live session.
    pub fn trigger_emergency(&mut self) -> DispatchResult {
        let preempted = !self.state.task().is_idle();
        let delivered = match self.capabilities.trigger_emergency() {
            Ok(()) => true,
            Err(err) => {
                warn!("Emergency trigger failed: {}", err);
                false
            }
        };
        if let Err(err) = self.capabilities.navigate(View::EmergencyMode) {
            warn!("Could not open emergency mode: {}", err);
        }
        // The pending cancel, if any, is subsumed by the reset.
        self.control.take_cancel();
        self.state.reset();

        self.telemetry.record(TelemetryEvent::EmergencyTriggered { preempted, delivered });
        info!("Emergency triggered (preempted task: {}, delivered: {})", preempted, delivered);

        let result = if delivered {
            DispatchResult::accepted(EMERGENCY_ACTIVATED, ConversationTask::None)
        } else {
            DispatchResult::rejected(Rejection::CapabilityFailed, EMERGENCY_FAILED, ConversationTask::None)
        };
        self.feedback.notify(&result);
        result
    }

    /// Runs one transcript through the pipeline.
    ///
    /// Errors mean the transcript was dropped before classification. Every
    /// transcript that is classified produces exactly one notification.
    pub fn handle_transcript(&mut self, transcript: &Transcript) -> Result<DispatchResult, PipelineError> {
        match self.process(transcript) {
            Ok(result) => Ok(result),
            Err(err) => {
                debug!("Transcript dropped: {}", err);
                self.telemetry.record(TelemetryEvent::TranscriptDropped { reason: err.into() });
                Err(err)
            }
        }
    }

    fn process(&mut self, transcript: &Transcript) -> Result<DispatchResult, PipelineError> {
        self.sync_control();
        if !self.control.is_listening() {
            return Err(PipelineError::SessionInactive);
        }
        if transcript.text.trim().is_empty() {
            return Err(PipelineError::EmptyTranscript);
        }

        if self.cancel_registry.is_cancel(&transcript.text) {
            if self.cancel() {
                return Ok(DispatchResult::accepted(CANCELLED, ConversationTask::None));
            }
            let result = DispatchResult::accepted(CANCEL_DEFERRED, self.state.task());
            self.feedback.notify(&result);
            return Ok(result);
        }

        if !self.control.try_begin() {
            return Err(PipelineError::Busy);
        }
        self.turn = self.turn.next();
        self.session_turns += 1;
        debug!(
            "Turn {} (confidence {:.2}, final: {})",
            self.turn.index, transcript.confidence, transcript.is_final
        );

        let command = self.classifier.classify(&transcript.text, &self.state);
        let result = self.dispatcher.dispatch(
            &command,
            &self.state,
            &mut *self.capabilities,
            &*self.members,
        );

        let from = self.state.task();
        // A failed capability leaves the conversation exactly as it was.
        if result.rejection != Some(Rejection::CapabilityFailed) {
            if !matches!(command.intent, Intent::Unknown | Intent::Confirm) {
                self.state.remember(&command);
            }
            self.state.advance(&result);
        }
        let to = self.state.task();

        self.telemetry.record(TelemetryEvent::CommandDispatched {
            turn: self.turn,
            intent: command.intent,
            accepted: result.accepted,
            rejection: result.rejection,
        });
        if from != to {
            self.telemetry.record(TelemetryEvent::TaskTransition { turn: self.turn, from, to });
        }
        info!(
            "Turn {}: {:?} accepted={} task {:?} -> {:?}",
            self.turn.index, command.intent, result.accepted, from, to
        );

        self.feedback.notify(&result);
        self.finish_dispatch();
        Ok(result)
    }

    fn finish_dispatch(&mut self) {
        if self.control.finish() {
            self.cancel_now(true);
        }
        if !self.control.is_listening() {
            self.end_session();
        }
    }

    fn cancel_now(&mut self, deferred: bool) {
        let from = self.state.task();
        self.state.reset();
        self.telemetry.record(TelemetryEvent::Cancelled { deferred, from });
        info!("Cancelled {:?} (deferred: {})", from, deferred);
        self.feedback.notify(&DispatchResult::accepted(CANCELLED, ConversationTask::None));
    }

    fn end_session(&mut self) {
        self.state.reset();
        if let Some(session) = self.session.take() {
            self.telemetry.record(TelemetryEvent::SessionEnded { session, turns: self.session_turns });
            info!("Voice session {:?} ended after {} turns", session.0, self.session_turns);
        }
        self.session_turns = 0;
    }
}
