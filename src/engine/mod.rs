//! Run control and step scheduling shared by every algorithm family.

pub mod controller;
pub mod scheduler;
pub mod step;

pub use controller::{EngineConfig, RunController, RunState, RunTicket, SpeedProfile, DEFAULT_SPEED};
pub use scheduler::{drive, ActiveRun, Callbacks, NullObserver, Observer, Outcome, Recorder, Scheduler};
pub use step::{Family, Stats, Step, StepAlgorithm};
