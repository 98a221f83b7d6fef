use crate::domain::constants::STDERR_TAIL_LINES;
use crate::domain::models::{
    Fixture, Invocation, InvocationOutcome, OutcomeStatus, RenderFlags, RunSettings,
};
use crate::services::fixtures::output_path;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long to keep draining stderr after a timed-out renderer was killed.
const STDERR_GRACE: Duration = Duration::from_millis(500);

/// Renderer arguments in the order `-f <font>, flags, <input>, <output-dir>`.
pub fn renderer_args(
    font: Option<&Path>,
    flags: RenderFlags,
    input: &Path,
    output_dir: &Path,
) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(font) = font {
        args.push("-f".to_string());
        args.push(font.to_string_lossy().into_owned());
    }
    if flags.show_ink_bounds {
        args.push("--show-ink-bounds".to_string());
    }
    if flags.show_logical_bounds {
        args.push("--show-logical-bounds".to_string());
    }
    if flags.show_top_accent_attachment {
        args.push("--show-top-accent-attachment".to_string());
    }
    args.push(input.to_string_lossy().into_owned());
    args.push(output_dir.to_string_lossy().into_owned());
    args
}

pub fn plan_invocation(settings: &RunSettings, fixture: &Fixture) -> Invocation {
    Invocation {
        fixture: fixture.path.clone(),
        program: settings.binary.clone(),
        args: renderer_args(
            settings.font.as_deref(),
            settings.flags,
            &fixture.path,
            &settings.output_dir,
        ),
        expected_output: output_path(&settings.output_dir, fixture),
    }
}

pub fn plan_invocations(settings: &RunSettings, fixtures: &[Fixture]) -> Vec<Invocation> {
    fixtures
        .iter()
        .map(|f| plan_invocation(settings, f))
        .collect()
}

/// Executes one renderer invocation. Implementations are shared across the
/// worker pool.
pub trait Invoke: Sync {
    fn invoke(&self, invocation: &Invocation) -> InvocationOutcome;
}

/// Runs the renderer as a child process, capturing its stderr.
pub struct ProcessInvoker {
    pub timeout: Option<Duration>,
}

enum Finished {
    Exited(ExitStatus),
    TimedOut,
}

impl ProcessInvoker {
    fn wait(&self, child: &mut Child) -> std::io::Result<Finished> {
        let Some(limit) = self.timeout else {
            return child.wait().map(Finished::Exited);
        };
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Finished::Exited(status));
            }
            if started.elapsed() >= limit {
                kill_tree(child);
                let _ = child.wait();
                return Ok(Finished::TimedOut);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Puts the renderer in its own process group so a timeout can take down
/// anything it spawned.
#[cfg(unix)]
fn isolate(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn isolate(_cmd: &mut Command) {}

#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;
    if let Err(e) = killpg(Pid::from_raw(child.id() as i32), Signal::SIGKILL) {
        log::debug!("killpg {} failed: {}", child.id(), e);
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

/// Removes an output left over from an earlier run so `output_written`
/// reflects this invocation only.
fn clear_stale_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => log::debug!("removed stale {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("could not remove stale {}: {}", path.display(), e),
    }
}

impl Invoke for ProcessInvoker {
    fn invoke(&self, invocation: &Invocation) -> InvocationOutcome {
        let started = Instant::now();
        log::debug!(
            "{} {}",
            invocation.program.display(),
            invocation.args.join(" ")
        );

        clear_stale_output(&invocation.expected_output);

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        isolate(&mut cmd);
        let spawned = cmd.spawn();
        let mut child = match spawned {
            Ok(c) => c,
            Err(e) => {
                log::error!(
                    "could not start {}: {}",
                    invocation.program.display(),
                    e
                );
                return outcome(invocation, OutcomeStatus::SpawnError, None, started, e.to_string());
            }
        };

        // Drained on a separate thread so a chatty renderer can't fill the pipe
        // while we wait on it.
        let reader = child.stderr.take().map(|mut pipe| {
            let (tx, rx) = mpsc::channel();
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
            rx
        });

        let finished = self.wait(&mut child);
        let timed_out = matches!(finished, Ok(Finished::TimedOut));
        let stderr = reader
            .and_then(|rx| {
                if timed_out {
                    rx.recv_timeout(STDERR_GRACE).ok()
                } else {
                    rx.recv().ok()
                }
            })
            .map(|bytes| tail_lines(&String::from_utf8_lossy(&bytes), STDERR_TAIL_LINES))
            .unwrap_or_default();

        match finished {
            Ok(Finished::Exited(status)) if status.success() => {
                outcome(invocation, OutcomeStatus::Ok, status.code(), started, stderr)
            }
            Ok(Finished::Exited(status)) => {
                log::warn!("{}: renderer exited with {}", invocation.fixture.display(), status);
                outcome(invocation, OutcomeStatus::Failed, status.code(), started, stderr)
            }
            Ok(Finished::TimedOut) => {
                log::warn!("{}: renderer timed out", invocation.fixture.display());
                outcome(invocation, OutcomeStatus::TimedOut, None, started, stderr)
            }
            Err(e) => outcome(invocation, OutcomeStatus::Failed, None, started, e.to_string()),
        }
    }
}

fn outcome(
    invocation: &Invocation,
    status: OutcomeStatus,
    exit_code: Option<i32>,
    started: Instant,
    stderr: String,
) -> InvocationOutcome {
    InvocationOutcome {
        fixture: invocation.fixture.clone(),
        status,
        exit_code,
        duration_ms: started.elapsed().as_millis() as u64,
        expected_output: invocation.expected_output.clone(),
        output_written: invocation.expected_output.exists(),
        stderr,
    }
}

pub fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
