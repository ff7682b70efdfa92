use crate::types::{EvaluatedMetric, MetricName, Severity, Thresholds};

/// Compare a value against its limits. Only strictly greater values trip a
/// limit, and critical is checked before warning.
pub fn evaluate(name: MetricName, value: u64, limits: Thresholds) -> EvaluatedMetric {
    let observed = value as f64;
    let (status, message) = match (limits.crit, limits.warn) {
        (Some(crit), _) if observed > crit => {
            (Severity::Critical, Some(exceeded_message(&name, value, crit)))
        }
        (_, Some(warn)) if observed > warn => {
            (Severity::Warning, Some(exceeded_message(&name, value, warn)))
        }
        _ => (Severity::Ok, None),
    };

    EvaluatedMetric {
        name,
        value,
        warn: limits.warn,
        crit: limits.crit,
        status,
        message,
    }
}

fn exceeded_message(name: &MetricName, value: u64, limit: f64) -> String {
    format!("{} of {} larger than {}", name, value, limit)
}
