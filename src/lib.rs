pub mod config;
pub mod error;
pub mod kernel;

pub use config::{PipelineConfig, Persona};
pub use error::{CapabilityError, ConfigError, PipelineError};
pub use kernel::capabilities::{Capabilities, FeedbackSink, Member, MemberResolver};
pub use kernel::dispatcher::{DispatchResult, Rejection};
pub use kernel::pipeline::VoicePipeline;
pub use kernel::reactor::{Reactor, ReactorHandle};
