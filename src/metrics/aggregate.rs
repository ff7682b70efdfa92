use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::types::{GlobalCounters, MetricName, NamespaceCounters, PodRecord};

/// Group pods by namespace and phase, then fold the per-namespace counters
/// into cluster-wide totals. Phases are lower-cased here whatever way the
/// records were built.
pub fn ingest(pods: &[PodRecord]) -> (Vec<NamespaceCounters>, GlobalCounters) {
    let mut by_namespace: BTreeMap<&str, NamespaceCounters> = BTreeMap::new();

    for pod in pods {
        let counters = by_namespace
            .entry(pod.namespace.as_str())
            .or_insert_with(|| NamespaceCounters {
                namespace: pod.namespace.clone(),
                ..Default::default()
            });
        *counters.counts.entry(pod.phase.to_lowercase()).or_insert(0) += 1;
    }

    let namespaces: Vec<NamespaceCounters> = by_namespace
        .into_values()
        .map(|mut ns| {
            ns.total = ns.counts.values().sum();
            ns
        })
        .collect();

    let global = sum_counters(&namespaces);
    (namespaces, global)
}

fn sum_counters(namespaces: &[NamespaceCounters]) -> GlobalCounters {
    let mut global = GlobalCounters::default();
    for ns in namespaces {
        for (phase, count) in &ns.counts {
            *global.counts.entry(phase.clone()).or_insert(0) += count;
        }
        global.total += ns.total;
    }
    global
}

/// Flatten counters into named metric values. An empty snapshot yields no
/// metrics at all, not even `global.count`. Rendered names are unique: a
/// phase literally called `count` would shadow a count metric and is dropped.
pub fn emit_metrics(
    namespaces: &[NamespaceCounters],
    global: &GlobalCounters,
) -> Vec<(MetricName, u64)> {
    if namespaces.is_empty() {
        return Vec::new();
    }

    let mut metrics = Vec::with_capacity(1 + global.counts.len() + namespaces.len() * 2);

    metrics.push((MetricName::GlobalCount, global.total));
    for (phase, count) in &global.counts {
        metrics.push((MetricName::Global(phase.clone()), *count));
    }

    for ns in namespaces {
        metrics.push((MetricName::ProjectCount(ns.namespace.clone()), ns.total));
        for (phase, count) in &ns.counts {
            metrics.push((MetricName::Project(ns.namespace.clone(), phase.clone()), *count));
        }
    }

    let mut seen = HashSet::with_capacity(metrics.len());
    metrics.retain(|(name, value)| {
        let unique = seen.insert(name.to_string());
        if !unique {
            warn!("dropping duplicate metric {} = {}", name, value);
        }
        unique
    });
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pods(items: &[(&str, &str)]) -> Vec<PodRecord> {
        items.iter().map(|(ns, phase)| PodRecord::new(*ns, phase)).collect()
    }

    #[test]
    fn test_ingest_groups_by_namespace_and_phase() {
        let input = pods(&[
            ("a", "Running"),
            ("a", "running"),
            ("a", "Failed"),
            ("b", "Pending"),
        ]);
        let (namespaces, global) = ingest(&input);

        assert_eq!(namespaces.len(), 2);
        let a = &namespaces[0];
        assert_eq!(a.namespace, "a");
        assert_eq!(a.counts.get("running"), Some(&2));
        assert_eq!(a.counts.get("failed"), Some(&1));
        assert_eq!(a.counts.get("pending"), None);
        assert_eq!(a.total, 3);

        let b = &namespaces[1];
        assert_eq!(b.counts.get("pending"), Some(&1));
        assert_eq!(b.total, 1);

        assert_eq!(global.total, 4);
        assert_eq!(global.counts.get("running"), Some(&2));
        assert_eq!(global.counts.get("failed"), Some(&1));
        assert_eq!(global.counts.get("pending"), Some(&1));
    }

    #[test]
    fn test_ingest_normalizes_literal_records() {
        let input = vec![
            PodRecord {
                namespace: "a".to_string(),
                phase: "Running".to_string(),
            },
            PodRecord::new("a", "Running"),
            PodRecord {
                namespace: "b".to_string(),
                phase: "PENDING".to_string(),
            },
        ];
        let (namespaces, global) = ingest(&input);

        assert_eq!(namespaces[0].counts.len(), 1);
        assert_eq!(namespaces[0].counts.get("running"), Some(&2));
        assert_eq!(namespaces[1].counts.get("pending"), Some(&1));
        assert_eq!(global.counts.get("running"), Some(&2));
        assert_eq!(global.counts.get("Running"), None);

        let names: Vec<String> = emit_metrics(&namespaces, &global)
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        assert!(names.contains(&"global.running".to_string()));
        assert!(!names.iter().any(|n| n.ends_with("Running") || n.ends_with("PENDING")));
    }

    #[test]
    fn test_emit_metrics_names_are_unique() {
        let input = pods(&[("a", "Count"), ("a", "Running"), ("b", "Running")]);
        let (namespaces, global) = ingest(&input);
        let metrics = emit_metrics(&namespaces, &global);

        let mut names: Vec<String> = metrics.iter().map(|(name, _)| name.to_string()).collect();
        let emitted = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), emitted);

        let global_count: Vec<u64> = metrics
            .iter()
            .filter(|(name, _)| *name == MetricName::GlobalCount)
            .map(|(_, value)| *value)
            .collect();
        assert_eq!(global_count, vec![3]);
        let project_count = metrics
            .iter()
            .find(|(name, _)| name.to_string() == "project.a.count")
            .map(|(_, value)| *value);
        assert_eq!(project_count, Some(2));
    }

    #[test]
    fn test_ingest_empty() {
        let (namespaces, global) = ingest(&[]);
        assert!(namespaces.is_empty());
        assert_eq!(global, GlobalCounters::default());
        assert!(emit_metrics(&namespaces, &global).is_empty());
    }

    #[test]
    fn test_global_counts_equal_sum_of_namespaces() {
        let input = pods(&[
            ("a", "Running"),
            ("b", "Running"),
            ("b", "Succeeded"),
            ("c", "Unknown"),
            ("c", "Running"),
            ("c", "Succeeded"),
        ]);
        let (namespaces, global) = ingest(&input);

        for (phase, count) in &global.counts {
            let summed: u64 = namespaces
                .iter()
                .map(|ns| ns.counts.get(phase).copied().unwrap_or(0))
                .sum();
            assert_eq!(*count, summed, "phase {}", phase);
        }
        let totals: u64 = namespaces.iter().map(|ns| ns.total).sum();
        assert_eq!(global.total, totals);
        assert_eq!(global.total, input.len() as u64);
    }

    #[test]
    fn test_emit_metrics_names() {
        let input = pods(&[("a", "Running"), ("a", "Running"), ("b", "Pending")]);
        let (namespaces, global) = ingest(&input);
        let metrics = emit_metrics(&namespaces, &global);

        let rendered: HashSet<(String, u64)> = metrics
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        let expected: HashSet<(String, u64)> = [
            ("global.count", 3),
            ("global.running", 2),
            ("global.pending", 1),
            ("project.a.count", 2),
            ("project.a.running", 2),
            ("project.b.count", 1),
            ("project.b.pending", 1),
        ]
        .iter()
        .map(|(n, v)| (n.to_string(), *v))
        .collect();

        assert_eq!(rendered, expected);
        assert_eq!(metrics.len(), expected.len());
    }
}
