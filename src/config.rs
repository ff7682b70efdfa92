use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use crate::types::{Config, SnapshotSource};

/// Check pod counts per namespace and phase against warning/critical limits
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "kube-pod-check")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Warning limit as name=value (repeatable), e.g. global.pending=5
    #[arg(short, long = "warning", value_name = "NAME=VALUE")]
    pub warning: Vec<String>,

    /// Critical limit as name=value (repeatable), e.g. all.project.failed=0
    #[arg(short, long = "critical", value_name = "NAME=VALUE")]
    pub critical: Vec<String>,

    /// Pod list JSON file; `-` or absent reads stdin
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    let cli = parse_cli(std::env::args_os())?;
    load_config_with_env(&cli, &SystemEnvironment)
}

/// Parse command-line flags. Usage errors are returned instead of exiting so
/// they end up in the UNKNOWN state; `--help` and `--version` still exit.
pub fn parse_cli<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let rendered = e.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            anyhow!(
                "invalid arguments: {}",
                first_line.trim_start_matches("error: ")
            )
        }
    })
}

/// Merge environment and command-line settings. Environment limits come
/// first so a flag for the same name replaces them.
pub fn load_config_with_env<E: EnvironmentProvider>(cli: &Cli, env: &E) -> Result<Config> {
    let mut warning_limits = split_list(env.get_var("POD_CHECK_WARNING"));
    warning_limits.extend(cli.warning.iter().cloned());

    let mut critical_limits = split_list(env.get_var("POD_CHECK_CRITICAL"));
    critical_limits.extend(cli.critical.iter().cloned());

    let snapshot = match cli.file.clone() {
        Some(path) => snapshot_source(path),
        None => env
            .get_var("POD_CHECK_SNAPSHOT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| snapshot_source(PathBuf::from(s)))
            .unwrap_or(SnapshotSource::Stdin),
    };

    let debug = cli.debug
        || env
            .get_var("POD_CHECK_DEBUG")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
            .unwrap_or(false);

    Ok(Config {
        warning_limits,
        critical_limits,
        snapshot,
        debug,
    })
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn snapshot_source(path: PathBuf) -> SnapshotSource {
    if path.as_os_str() == "-" {
        SnapshotSource::Stdin
    } else {
        SnapshotSource::File(path)
    }
}
