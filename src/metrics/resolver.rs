use crate::limits::LimitStore;
use crate::types::{LimitKind, MetricName, Thresholds};

/// Resolve both limits for a metric. Each kind walks its own
/// exact-then-fallback chain.
pub fn resolve(store: &LimitStore, name: &MetricName) -> Thresholds {
    let exact = name.to_string();
    let fallback = name.fallback_name();
    Thresholds {
        warn: resolve_kind(store, &exact, fallback.as_deref(), LimitKind::Warning),
        crit: resolve_kind(store, &exact, fallback.as_deref(), LimitKind::Critical),
    }
}

pub fn resolve_kind(
    store: &LimitStore,
    exact: &str,
    fallback: Option<&str>,
    kind: LimitKind,
) -> Option<f64> {
    store
        .lookup(exact, kind)
        .or_else(|| fallback.and_then(|name| store.lookup(name, kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(warnings: &[&str], criticals: &[&str]) -> LimitStore {
        LimitStore::from_specs(warnings, criticals).unwrap()
    }

    #[test]
    fn test_global_metrics_have_no_fallback() {
        let limits = store(&["all.project.running=1", "global.count=10"], &[]);

        let running = resolve(&limits, &MetricName::Global("running".into()));
        assert_eq!(running, Thresholds::default());

        let count = resolve(&limits, &MetricName::GlobalCount);
        assert_eq!(count.warn, Some(10.0));
        assert_eq!(count.crit, None);
    }

    #[test]
    fn test_project_metric_uses_fallback() {
        let limits = store(&["all.project.failed=0"], &["all.project.failed=2"]);
        let t = resolve(&limits, &MetricName::Project("web".into(), "failed".into()));
        assert_eq!(t.warn, Some(0.0));
        assert_eq!(t.crit, Some(2.0));
    }

    #[test]
    fn test_exact_limit_wins_over_fallback() {
        let limits = store(
            &["all.project.pending=1", "project.web.pending=5"],
            &["all.project.pending=3"],
        );
        let t = resolve(&limits, &MetricName::Project("web".into(), "pending".into()));
        assert_eq!(t.warn, Some(5.0));
        // critical has no exact entry, so it falls back independently
        assert_eq!(t.crit, Some(3.0));

        let other = resolve(&limits, &MetricName::Project("db".into(), "pending".into()));
        assert_eq!(other.warn, Some(1.0));
    }

    #[test]
    fn test_project_count_fallback() {
        let limits = store(&[], &["all.project.count=50", "project.big.count=500"]);
        assert_eq!(resolve(&limits, &MetricName::ProjectCount("small".into())).crit, Some(50.0));
        assert_eq!(resolve(&limits, &MetricName::ProjectCount("big".into())).crit, Some(500.0));
        assert_eq!(resolve(&limits, &MetricName::ProjectCount("big".into())).warn, None);
    }

    #[test]
    fn test_unconstrained_metric() {
        let limits = LimitStore::new();
        let t = resolve(&limits, &MetricName::Project("a".into(), "running".into()));
        assert_eq!(t, Thresholds::default());
    }
}
