use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Serialize, Deserialize};
use tokio::sync::Notify;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Observable lifecycle of a live voice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Not listening. Transcripts are refused; emergencies still go through.
    #[default]
    Idle,
    /// Listening and ready for the next transcript.
    Listening,
    /// A transcript is between classification and feedback.
    Processing,
}

#[derive(Debug, Default)]
struct Flags {
    listening: AtomicBool,
    busy: AtomicBool,
    cancel_pending: AtomicBool,
    // Wakes the reactor when a stop or cancel arrives from another thread.
    changed: Notify,
}

/// Shared busy/ready and listening flags.
///
/// Cloning hands out another view of the same flags, so a UI thread can stop
/// the session or request cancellation while a dispatch is running.
#[derive(Debug, Clone, Default)]
pub struct SessionControl {
    flags: Arc<Flags>,
}

impl SessionControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.flags.listening.store(true, Ordering::Release);
    }

    /// Stops accepting transcripts. An in-flight dispatch still completes.
    /// The session ends once the pipeline is idle again.
    pub fn stop(&self) {
        self.flags.listening.store(false, Ordering::Release);
        self.flags.changed.notify_one();
    }

    pub fn is_listening(&self) -> bool {
        self.flags.listening.load(Ordering::Acquire)
    }

    pub fn is_busy(&self) -> bool {
        self.flags.busy.load(Ordering::Acquire)
    }

    /// Asks for a reset once the pipeline is between commands.
    ///
    /// Under a running [`Reactor`](crate::kernel::reactor::Reactor) an idle
    /// pipeline applies it straight away. A bare pipeline applies it on its
    /// next call, or when the in-flight dispatch finishes.
    pub fn request_cancel(&self) {
        self.flags.cancel_pending.store(true, Ordering::Release);
        self.flags.changed.notify_one();
    }

    /// Resolves after the next `stop` or `request_cancel`.
    pub async fn changed(&self) {
        self.flags.changed.notified().await;
    }

    pub fn cancel_pending(&self) -> bool {
        self.flags.cancel_pending.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_busy() {
            SessionPhase::Processing
        } else if self.is_listening() {
            SessionPhase::Listening
        } else {
            SessionPhase::Idle
        }
    }

    /// Claims the pipeline. False if another command holds it.
    pub(crate) fn try_begin(&self) -> bool {
        self.flags
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the pipeline, returning whether a cancel arrived meanwhile.
    pub(crate) fn finish(&self) -> bool {
        self.flags.busy.store(false, Ordering::Release);
        self.take_cancel()
    }

    pub(crate) fn take_cancel(&self) -> bool {
        self.flags.cancel_pending.swap(false, Ordering::AcqRel)
    }
}
