//! Tracking domain - recorded executions of the training job

mod run;

pub use run::{RunStatus, TrackingRun};
