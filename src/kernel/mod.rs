pub mod cancel;
pub mod capabilities;
pub mod dispatcher;
pub mod event;
pub mod feedback;
pub mod intent;
pub mod pipeline;
pub mod reactor;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod turn;
