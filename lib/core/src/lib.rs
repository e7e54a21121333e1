pub mod config;
pub mod constants;
pub mod errors;
pub mod monitor;
pub mod probe;

pub use config::{ScrollConfig, ScrollHooks, ScrollSettings};
pub use errors::ScrollError;
pub use monitor::{attach, FireState, MonitorHandle, ReArm, ScrollMonitor, TickOutcome};
pub use probe::{ContentHost, ElementProbe, ScrollMetrics, ScrollProbe, ScrollTargetKind};
