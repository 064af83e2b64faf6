//! Crisis assessment handlers.

mod assess_crisis;

pub use assess_crisis::{AssessCrisisCommand, AssessCrisisHandler, AssessCrisisResult};
