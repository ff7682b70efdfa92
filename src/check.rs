use tracing::debug;

use crate::limits::LimitStore;
use crate::metrics;
use crate::report::{CheckOutput, CheckReport};
use crate::types::{EvaluatedMetric, PodRecord};

/// Runs the pod-count check against a fixed limit table
pub struct PodCheck<'a> {
    limits: &'a LimitStore,
}

impl<'a> PodCheck<'a> {
    pub fn new(limits: &'a LimitStore) -> Self {
        Self { limits }
    }

    /// Aggregate, resolve limits and evaluate every metric of a snapshot
    pub fn evaluate_all(&self, pods: &[PodRecord]) -> Vec<EvaluatedMetric> {
        let (namespaces, global) = metrics::ingest(pods);
        debug!("aggregated {} pods across {} namespaces", global.total, namespaces.len());

        metrics::emit_metrics(&namespaces, &global)
            .into_iter()
            .map(|(name, value)| {
                let thresholds = metrics::resolve(self.limits, &name);
                let evaluated = metrics::evaluate(name, value, thresholds);
                debug!(
                    "{} = {} (warn {:?}, crit {:?}) -> {}",
                    evaluated.name, evaluated.value, evaluated.warn, evaluated.crit, evaluated.status
                );
                evaluated
            })
            .collect()
    }

    pub fn report(&self, pods: &[PodRecord]) -> CheckReport {
        CheckReport::new(self.evaluate_all(pods))
    }

    pub fn run(&self, pods: &[PodRecord]) -> CheckOutput {
        self.report(pods).render()
    }
}
