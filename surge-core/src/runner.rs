mod collector;
mod config;
mod degradation;
mod error;
mod pool;
mod probe;
mod run;
mod stats;
mod thresholds;

pub use collector::{RequestOutcome, ResultCollector, ResultSnapshot};
pub use config::{RampConfig, ScenarioConfig, SlaThresholds};
pub use degradation::{DegradationReport, LevelReport, degradation_between, run_ramp};
pub use error::{Error, Result};
pub use pool::{WorkQueue, WorkerPool};
pub use probe::EndpointClient;
pub use run::{RunReport, run_scenario};
pub use stats::{Statistics, compute_statistics};
pub use thresholds::{SlaVerdict, validate_ramp, validate_run};
