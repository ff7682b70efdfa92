use crate::types::{EvaluatedMetric, Severity};

/// Lower bound reported for every count in the performance data.
pub const PERFDATA_MIN: u64 = 0;

/// Evaluated metrics of one check run, ranked worst first.
pub struct CheckReport {
    pub metrics: Vec<EvaluatedMetric>,
}

/// Final status line plus the severity the caller maps to an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutput {
    pub severity: Severity,
    pub text: String,
}

impl CheckReport {
    pub fn new(metrics: Vec<EvaluatedMetric>) -> Self {
        let mut report = Self { metrics };
        report.rank();
        report
    }

    /// Sort by severity rank, then by rendered name.
    pub fn rank(&mut self) {
        self.metrics
            .sort_by_cached_key(|m| (m.status.rank(), m.name.to_string()));
    }

    /// Status of the worst metric, or `Unknown` when nothing was measured.
    pub fn overall(&self) -> Severity {
        self.metrics
            .first()
            .map(|m| m.status)
            .unwrap_or(Severity::Unknown)
    }

    pub fn messages(&self) -> Vec<String> {
        self.metrics
            .iter()
            .filter_map(|m| {
                m.message
                    .as_ref()
                    .map(|msg| format!("[{}] {}", m.status.label(), msg))
            })
            .collect()
    }

    pub fn perfdata(&self) -> String {
        let mut entries: Vec<(String, &EvaluatedMetric)> = self
            .metrics
            .iter()
            .map(|m| (m.name.to_string(), m))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        entries
            .iter()
            .map(|(name, m)| {
                format!(
                    "'{}'={};{};{};{}",
                    name,
                    m.value,
                    format_limit(m.warn),
                    format_limit(m.crit),
                    PERFDATA_MIN
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn render(&self) -> CheckOutput {
        let severity = self.overall();
        let messages = self.messages();
        let summary = if messages.is_empty() {
            format!("[{}]", severity.label())
        } else {
            messages.join(", ")
        };

        CheckOutput {
            severity,
            text: format!("{} | {}", summary, self.perfdata()),
        }
    }

    pub fn summary(&self) -> ReportSummary {
        let count = |s: Severity| self.metrics.iter().filter(|m| m.status == s).count();
        ReportSummary {
            metric_count: self.metrics.len(),
            ok_count: count(Severity::Ok),
            warning_count: count(Severity::Warning),
            critical_count: count(Severity::Critical),
            unknown_count: count(Severity::Unknown),
        }
    }
}

fn format_limit(limit: Option<f64>) -> String {
    limit.map(|v| v.to_string()).unwrap_or_default()
}

pub struct ReportSummary {
    pub metric_count: usize,
    pub ok_count: usize,
    pub warning_count: usize,
    pub critical_count: usize,
    pub unknown_count: usize,
}

impl ReportSummary {
    pub fn total_issues(&self) -> usize {
        self.warning_count + self.critical_count + self.unknown_count
    }

    pub fn has_issues(&self) -> bool {
        self.total_issues() > 0
    }
}
