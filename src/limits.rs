use std::collections::HashMap;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::debug;

use crate::types::{Config, LimitKind};

#[derive(Debug, Error, PartialEq)]
pub enum LimitParseError {
    #[error("limit `{spec}` must have the form name=value")]
    MissingSeparator { spec: String },
    #[error("limit `{spec}` has an empty name")]
    EmptyName { spec: String },
    #[error("limit `{spec}` has an empty value")]
    EmptyValue { spec: String },
    #[error("limit `{spec}` has a non-numeric value `{value}`")]
    InvalidNumber { spec: String, value: String },
}

/// Warning and critical limits, one table per kind keyed by metric name.
#[derive(Debug, Clone, Default)]
pub struct LimitStore {
    entries: HashMap<LimitKind, HashMap<String, f64>>,
}

impl LimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `name=value` spec and store it, replacing any earlier value
    /// for the same name and kind.
    pub fn add(&mut self, kind: LimitKind, spec: &str) -> Result<(), LimitParseError> {
        let (name, value) = parse_limit_spec(spec)?;
        debug!("{} limit {} = {}", kind, name, value);
        self.entries
            .entry(kind)
            .or_default()
            .insert(name.to_string(), value);
        Ok(())
    }

    pub fn lookup(&self, name: &str, kind: LimitKind) -> Option<f64> {
        self.entries
            .get(&kind)
            .and_then(|limits| limits.get(name))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_specs<W, C>(warnings: W, criticals: C) -> Result<Self, LimitParseError>
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut store = Self::new();
        for spec in warnings {
            store.add(LimitKind::Warning, spec.as_ref())?;
        }
        for spec in criticals {
            store.add(LimitKind::Critical, spec.as_ref())?;
        }
        Ok(store)
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::from_specs(&cfg.warning_limits, &cfg.critical_limits).context("Invalid limit table")
    }
}

fn parse_limit_spec(spec: &str) -> Result<(&str, f64), LimitParseError> {
    let (name, value) = spec.split_once('=').ok_or_else(|| LimitParseError::MissingSeparator {
        spec: spec.to_string(),
    })?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() {
        return Err(LimitParseError::EmptyName { spec: spec.to_string() });
    }
    if value.is_empty() {
        return Err(LimitParseError::EmptyValue { spec: spec.to_string() });
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok((name, v)),
        _ => Err(LimitParseError::InvalidNumber {
            spec: spec.to_string(),
            value: value.to_string(),
        }),
    }
}
