use crate::domain::error::HarnessError;
use std::process::Command;

/// Splits a build command line into program and arguments.
pub fn parse_build_command(command: &str) -> Result<(String, Vec<String>), HarnessError> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or(HarnessError::EmptyBuildCommand)?;
    Ok((program, parts.collect()))
}

/// Runs the build command with inherited stdio. A non-zero exit aborts the
/// batch before any renderer is started.
pub fn build_renderer(command: &str) -> Result<(), HarnessError> {
    let (program, args) = parse_build_command(command)?;
    log::info!("building renderer: {}", command);

    let status = Command::new(&program)
        .args(&args)
        .status()
        .map_err(|source| HarnessError::BuildSpawn {
            command: command.to_string(),
            source,
        })?;

    if !status.success() {
        log::error!("build failed: {}", status);
        return Err(HarnessError::BuildFailed {
            command: command.to_string(),
            status,
        });
    }
    Ok(())
}
