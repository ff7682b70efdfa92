use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use k8s_openapi::api::core::v1::Pod;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{PodRecord, SnapshotSource};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read pod snapshot from {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode pod snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Pod list document as returned by `kubectl get pods -o json`. The list
/// `kind` differs between the API (`PodList`) and kubectl (`List`), so only
/// `items` is read.
#[derive(Debug, Deserialize)]
pub struct PodListDocument {
    #[serde(default)]
    pub items: Vec<Pod>,
}

pub fn read_snapshot(source: &SnapshotSource) -> Result<Vec<PodRecord>, SnapshotError> {
    match source {
        SnapshotSource::Stdin => {
            debug!("reading pod snapshot from stdin");
            read_document(io::stdin().lock(), "stdin")
        }
        SnapshotSource::File(path) => read_snapshot_file(path),
    }
}

pub fn read_snapshot_file(path: &Path) -> Result<Vec<PodRecord>, SnapshotError> {
    debug!("reading pod snapshot from {}", path.display());
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|source| SnapshotError::Read {
        origin: origin.clone(),
        source,
    })?;
    read_document(file, &origin)
}

pub fn parse_snapshot<R: Read>(reader: R) -> Result<Vec<PodRecord>, SnapshotError> {
    read_document(reader, "input")
}

/// I/O failures surface as `Read`; only malformed JSON is a `Decode` error.
fn read_document<R: Read>(mut reader: R, origin: &str) -> Result<Vec<PodRecord>, SnapshotError> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|source| SnapshotError::Read {
            origin: origin.to_string(),
            source,
        })?;
    let document: PodListDocument = serde_json::from_str(&raw)?;
    Ok(pod_records(&document.items))
}

/// Pods missing a namespace or a phase are skipped.
pub fn pod_records(pods: &[Pod]) -> Vec<PodRecord> {
    pods.iter().filter_map(pod_record).collect()
}

fn pod_record(pod: &Pod) -> Option<PodRecord> {
    let name = pod.metadata.name.as_deref().unwrap_or("<unnamed>");
    let namespace = match pod.metadata.namespace.as_deref() {
        Some(ns) if !ns.is_empty() => ns,
        _ => {
            warn!("skipping pod {} without namespace", name);
            return None;
        }
    };
    match pod.status.as_ref().and_then(|s| s.phase.as_deref()) {
        Some(phase) if !phase.is_empty() => Some(PodRecord::new(namespace, phase)),
        _ => {
            warn!("skipping pod {}/{} without phase", namespace, name);
            None
        }
    }
}
