use crate::cli::{FixtureOpts, RunOpts, DEFAULT_CONFIG_FILE};
use crate::domain::constants::{
    DEFAULT_BINARY, DEFAULT_BUILD_COMMAND, DEFAULT_FIXTURES_DIR, DEFAULT_JOBS, DEFAULT_OUTPUT_DIR,
    DEFAULT_PATTERN,
};
use crate::domain::error::HarnessError;
use crate::domain::models::{ConfigFile, RenderFlags, RunSection, RunSettings};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Loads the config file named on the command line, or `./mathimg-batch.toml`
/// when it exists. An explicitly named file must exist.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(ConfigFile::default());
            }
            p
        }
    };
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let cfg = parse_config(&path, &raw)?;
    log::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

pub fn parse_config(path: &Path, raw: &str) -> Result<ConfigFile, HarnessError> {
    toml::from_str(raw).map_err(|source| HarnessError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Expands a leading `~` against `$HOME`. Other paths pass through unchanged.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/")
    };
    match (rest, std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(raw),
    }
}

pub fn resolve_fixture_source(opts: &FixtureOpts, file: &RunSection) -> (PathBuf, String) {
    let dir = opts
        .fixtures_dir
        .clone()
        .or_else(|| file.fixtures_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_DIR));
    let pattern = opts
        .pattern
        .clone()
        .or_else(|| file.pattern.clone())
        .unwrap_or_else(|| DEFAULT_PATTERN.to_string());
    (dir, pattern)
}

pub fn resolve_output_dir(cli: Option<&PathBuf>, file: &RunSection) -> PathBuf {
    cli.cloned()
        .or_else(|| file.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// `--x` or `--no-x` on the command line, else the config value, else off.
fn pick_flag(on: bool, off: bool, file: Option<bool>) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        file.unwrap_or(false)
    }
}

/// Merges CLI values over config values over built-in defaults.
pub fn resolve_run_settings(
    opts: &RunOpts,
    jobs: Option<usize>,
    timeout_secs: Option<u64>,
    file: &RunSection,
) -> Result<RunSettings, HarnessError> {
    let (fixtures_dir, pattern) = resolve_fixture_source(&opts.fixtures, file);

    let jobs = jobs.or(file.jobs).unwrap_or(DEFAULT_JOBS);
    if jobs == 0 {
        return Err(HarnessError::InvalidJobs);
    }

    let font = opts
        .font
        .as_deref()
        .or(file.font.as_deref())
        .filter(|f| !f.trim().is_empty())
        .map(expand_home);

    let flags = RenderFlags {
        show_ink_bounds: pick_flag(
            opts.show_ink_bounds,
            opts.no_show_ink_bounds,
            file.show_ink_bounds,
        ),
        show_logical_bounds: pick_flag(
            opts.show_logical_bounds,
            opts.no_show_logical_bounds,
            file.show_logical_bounds,
        ),
        show_top_accent_attachment: pick_flag(
            opts.show_top_accent_attachment,
            opts.no_show_top_accent_attachment,
            file.show_top_accent_attachment,
        ),
    };

    Ok(RunSettings {
        fixtures_dir,
        pattern,
        font,
        flags,
        output_dir: resolve_output_dir(opts.output_dir.as_ref(), file),
        binary: opts
            .binary
            .clone()
            .or_else(|| file.binary.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY)),
        build_command: opts
            .build_command
            .clone()
            .or_else(|| file.build_command.clone())
            .unwrap_or_else(|| DEFAULT_BUILD_COMMAND.to_string()),
        jobs,
        timeout: timeout_secs
            .or(file.timeout_secs)
            .filter(|s| *s > 0)
            .map(Duration::from_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags_or_config() {
        let s = resolve_run_settings(&RunOpts::default(), None, None, &RunSection::default())
            .unwrap();
        assert_eq!(s.fixtures_dir, PathBuf::from("tests/testfiles"));
        assert_eq!(s.pattern, r"\.xml$");
        assert_eq!(s.output_dir, PathBuf::from("svgs"));
        assert_eq!(s.jobs, 8);
        assert!(s.font.is_none());
        assert!(s.timeout.is_none());
        assert_eq!(s.flags, RenderFlags::default());
    }

    #[test]
    fn cli_wins_over_config_file() {
        let file: ConfigFile = toml::from_str(
            r#"
[run]
fixtures_dir = "from-file"
output_dir = "file-svgs"
font = "/fonts/file.otf"
jobs = 2
show_ink_bounds = true
"#,
        )
        .unwrap();
        let opts = RunOpts {
            output_dir: Some(PathBuf::from("cli-svgs")),
            font: Some("/fonts/cli.otf".to_string()),
            ..RunOpts::default()
        };
        let s = resolve_run_settings(&opts, Some(4), None, &file.run).unwrap();
        assert_eq!(s.fixtures_dir, PathBuf::from("from-file"));
        assert_eq!(s.output_dir, PathBuf::from("cli-svgs"));
        assert_eq!(s.font, Some(PathBuf::from("/fonts/cli.otf")));
        assert_eq!(s.jobs, 4);
        assert!(s.flags.show_ink_bounds);
        assert!(!s.flags.show_logical_bounds);
    }

    #[test]
    fn cli_can_switch_off_flags_enabled_in_config() {
        let file = parse_config(
            Path::new("mathimg-batch.toml"),
            "[run]\nshow_ink_bounds = true\nshow_logical_bounds = true\n",
        )
        .unwrap();
        let opts = RunOpts {
            no_show_ink_bounds: true,
            ..RunOpts::default()
        };
        let s = resolve_run_settings(&opts, None, None, &file.run).unwrap();
        assert!(!s.flags.show_ink_bounds);
        assert!(s.flags.show_logical_bounds);
    }

    #[test]
    fn misspelled_section_is_rejected() {
        let err = parse_config(Path::new("typo.toml"), "[runn]\njobs = 2\n").unwrap_err();
        assert!(err.to_string().contains("typo.toml"));
    }

    #[test]
    fn zero_jobs_is_rejected() {
        let err = resolve_run_settings(&RunOpts::default(), Some(0), None, &RunSection::default())
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidJobs));
    }

    #[test]
    fn unknown_config_keys_are_reported() {
        let err = parse_config(Path::new("bad.toml"), "[run]\nparallel = 3\n").unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/abs/font.otf"), PathBuf::from("/abs/font.otf"));
        assert_eq!(expand_home("rel/~/font.otf"), PathBuf::from("rel/~/font.otf"));
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(
                expand_home("~/fonts/latinmodern-math.otf"),
                PathBuf::from(home).join("fonts/latinmodern-math.otf")
            );
        }
    }
}
