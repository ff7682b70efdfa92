use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub warning_limits: Vec<String>,
    pub critical_limits: Vec<String>,
    pub snapshot: SnapshotSource,
    pub debug: bool,
}

/// Where the pod snapshot document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRecord {
    pub namespace: String,
    pub phase: String,
}

impl PodRecord {
    /// Phase is lower-cased so `Running` and `running` count together.
    pub fn new(namespace: impl Into<String>, phase: &str) -> Self {
        Self {
            namespace: namespace.into(),
            phase: phase.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceCounters {
    pub namespace: String,
    pub counts: BTreeMap<String, u64>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalCounters {
    pub counts: BTreeMap<String, u64>,
    pub total: u64,
}

/// Identifier of a single reported metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricName {
    Global(String),
    GlobalCount,
    Project(String, String),
    ProjectCount(String),
}

impl MetricName {
    /// Name of the limit that applies to every project when no
    /// project-specific one exists. Global metrics have none.
    pub fn fallback_name(&self) -> Option<String> {
        match self {
            MetricName::Global(_) | MetricName::GlobalCount => None,
            MetricName::Project(_, phase) => Some(format!("all.project.{}", phase)),
            MetricName::ProjectCount(_) => Some("all.project.count".to_string()),
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricName::Global(phase) => write!(f, "global.{}", phase),
            MetricName::GlobalCount => write!(f, "global.count"),
            MetricName::Project(ns, phase) => write!(f, "project.{}.{}", ns, phase),
            MetricName::ProjectCount(ns) => write!(f, "project.{}.count", ns),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LimitKind {
    Warning,
    Critical,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::Warning => write!(f, "warning"),
            LimitKind::Critical => write!(f, "critical"),
        }
    }
}

/// Resolved warning/critical limits for one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    pub warn: Option<f64>,
    pub crit: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Sort key, worst first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Unknown => 2,
            Severity::Ok => 3,
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedMetric {
    pub name: MetricName,
    pub value: u64,
    pub warn: Option<f64>,
    pub crit: Option<f64>,
    pub status: Severity,
    pub message: Option<String>,
}
