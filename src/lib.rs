// Public modules
pub mod types;
pub mod config;
pub mod limits;
pub mod metrics;
pub mod report;
pub mod check;
pub mod snapshot;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, parse_cli, Cli, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use limits::{LimitStore, LimitParseError};
pub use metrics::*;
pub use report::{CheckOutput, CheckReport, ReportSummary};
pub use check::PodCheck;
pub use snapshot::{parse_snapshot, read_snapshot, read_snapshot_file, SnapshotError};
