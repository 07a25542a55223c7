use serde::{Serialize, Deserialize};

use crate::error::PipelineError;
use crate::kernel::dispatcher::Rejection;
use crate::kernel::intent::Intent;
use crate::kernel::session::SessionId;
use crate::kernel::state::ConversationTask;
use crate::kernel::turn::Turn;

// Allowed: ids, turns, counts, enums
// Forbidden: transcript text, entity values, feedback messages

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    SessionStarted {
        session: SessionId,
    },

    SessionEnded {
        session: SessionId,
        turns: u64,
    },

    CommandDispatched {
        turn: Turn,
        intent: Intent,
        accepted: bool,
        rejection: Option<Rejection>,
    },

    TaskTransition {
        turn: Turn,
        from: ConversationTask,
        to: ConversationTask,
    },

    Cancelled {
        /// Requested mid-dispatch and applied afterwards.
        deferred: bool,
        from: ConversationTask,
    },

    EmergencyTriggered {
        /// A multi-turn task was abandoned.
        preempted: bool,
        delivered: bool,
    },

    TranscriptDropped {
        reason: DropReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropReason {
    SessionInactive,
    Busy,
    Empty,
}

impl From<PipelineError> for DropReason {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::SessionInactive => DropReason::SessionInactive,
            PipelineError::Busy => DropReason::Busy,
            PipelineError::EmptyTranscript => DropReason::Empty,
        }
    }
}
