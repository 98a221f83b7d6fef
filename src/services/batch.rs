use crate::domain::error::HarnessError;
use crate::domain::models::{Invocation, InvocationOutcome, OutcomeStatus, RunReport, RunSettings};
use crate::services::fixtures::{discover_fixtures, warn_on_collisions};
use crate::services::invoke::{plan_invocations, Invoke};
use anyhow::Context;
use rayon::prelude::*;
use std::path::Path;

/// Creates the output directory if needed. Calling it on an existing
/// directory is a no-op.
pub fn ensure_output_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))
}

/// Runs every invocation on a pool of `jobs` worker threads. Each worker
/// blocks on one renderer at a time, so at most `jobs` run concurrently.
/// Outcomes come back in invocation order.
pub fn run_pool<I: Invoke>(
    invocations: &[Invocation],
    jobs: usize,
    invoker: &I,
) -> anyhow::Result<Vec<InvocationOutcome>> {
    if jobs == 0 {
        return Err(HarnessError::InvalidJobs.into());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("mathimg-worker-{i}"))
        .build()
        .context("starting worker pool")?;
    Ok(pool.install(|| {
        invocations
            .par_iter()
            .map(|inv| invoker.invoke(inv))
            .collect()
    }))
}

pub fn summarize(
    outcomes: Vec<InvocationOutcome>,
    built: bool,
    jobs: usize,
    output_dir: &Path,
) -> RunReport {
    let succeeded = outcomes
        .iter()
        .filter(|o| o.status == OutcomeStatus::Ok)
        .count();
    RunReport {
        built,
        jobs,
        total: outcomes.len(),
        succeeded,
        failed: outcomes.len() - succeeded,
        output_dir: output_dir.to_path_buf(),
        outcomes,
    }
}

/// The whole batch pass: output dir, build, enumerate, fan out.
///
/// A build failure returns before any fixture is enumerated or rendered.
/// Individual renderer failures are recorded in the report, never raised.
pub fn run_batch<B, I>(
    settings: &RunSettings,
    skip_build: bool,
    build: B,
    invoker: &I,
) -> anyhow::Result<RunReport>
where
    B: FnOnce(&str) -> Result<(), HarnessError>,
    I: Invoke,
{
    ensure_output_dir(&settings.output_dir)?;

    if skip_build {
        log::info!("skipping build, using {}", settings.binary.display());
    } else {
        build(&settings.build_command)?;
    }

    let fixtures = discover_fixtures(&settings.fixtures_dir, &settings.pattern)?;
    warn_on_collisions(&fixtures);
    let invocations = plan_invocations(settings, &fixtures);
    log::info!(
        "rendering {} fixtures with {} workers",
        invocations.len(),
        settings.jobs
    );

    let outcomes = run_pool(&invocations, settings.jobs, invoker)?;
    let report = summarize(outcomes, !skip_build, settings.jobs, &settings.output_dir);
    for o in report.outcomes.iter().filter(|o| o.status == OutcomeStatus::Ok) {
        if !o.output_written {
            log::warn!(
                "{}: renderer succeeded but {} is missing",
                o.fixture.display(),
                o.expected_output.display()
            );
        }
    }
    log::info!("{} of {} fixtures rendered", report.succeeded, report.total);
    Ok(report)
}
