mod errors;
mod etl_engine;
mod event;

pub use errors::EtlError;
pub use etl_engine::{EtlEngine, InvocationOutcome};
pub use event::TriggerEvent;
