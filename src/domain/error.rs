use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    #[error("fixtures directory not found: {0}")]
    FixturesDirMissing(PathBuf),
    #[error("invalid fixture pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("jobs must be at least 1")]
    InvalidJobs,
    #[error("build command is empty")]
    EmptyBuildCommand,
    #[error("failed to start build command `{command}`: {source}")]
    BuildSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("build command `{command}` failed ({status})")]
    BuildFailed { command: String, status: ExitStatus },
    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{failed} of {total} invocations failed")]
    InvocationsFailed { failed: usize, total: usize },
}
