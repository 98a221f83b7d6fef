use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// On-disk config file. Every key is optional; CLI flags win over it.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    #[serde(default)]
    pub fixtures_dir: Option<PathBuf>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub show_ink_bounds: Option<bool>,
    #[serde(default)]
    pub show_logical_bounds: Option<bool>,
    #[serde(default)]
    pub show_top_accent_attachment: Option<bool>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub binary: Option<PathBuf>,
    #[serde(default)]
    pub build_command: Option<String>,
    #[serde(default)]
    pub jobs: Option<usize>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFlags {
    pub show_ink_bounds: bool,
    pub show_logical_bounds: bool,
    pub show_top_accent_attachment: bool,
}

/// Fully resolved settings for one batch pass.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub fixtures_dir: PathBuf,
    pub pattern: String,
    pub font: Option<PathBuf>,
    pub flags: RenderFlags,
    pub output_dir: PathBuf,
    pub binary: PathBuf,
    pub build_command: String,
    pub jobs: usize,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub path: PathBuf,
    pub stem: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct FixtureEntry {
    pub fixture: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Serialize, Clone)]
pub struct Invocation {
    pub fixture: PathBuf,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub expected_output: PathBuf,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    Failed,
    SpawnError,
    TimedOut,
}

impl OutcomeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Ok => "ok",
            OutcomeStatus::Failed => "failed",
            OutcomeStatus::SpawnError => "spawn_error",
            OutcomeStatus::TimedOut => "timed_out",
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct InvocationOutcome {
    pub fixture: PathBuf,
    pub status: OutcomeStatus,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub expected_output: PathBuf,
    pub output_written: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub built: bool,
    pub jobs: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
    pub outcomes: Vec<InvocationOutcome>,
}

#[derive(Debug, Serialize)]
pub struct DryRunReport {
    pub build_command: String,
    pub jobs: usize,
    pub invocations: Vec<Invocation>,
}

#[derive(Debug, Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}
