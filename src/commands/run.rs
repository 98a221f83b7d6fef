use crate::*;

pub fn handle_run_commands(cli: &Cli, config: &ConfigFile) -> anyhow::Result<bool> {
    let Commands::Run {
        opts,
        no_build,
        dry_run,
        jobs,
        timeout_secs,
    } = &cli.command
    else {
        return Ok(false);
    };

    let settings = resolve_run_settings(opts, *jobs, *timeout_secs, &config.run)?;

    if *dry_run {
        let fixtures = discover_fixtures(&settings.fixtures_dir, &settings.pattern)?;
        warn_on_collisions(&fixtures);
        let report = DryRunReport {
            build_command: settings.build_command.clone(),
            jobs: settings.jobs,
            invocations: plan_invocations(&settings, &fixtures),
        };
        print_one(cli.json, &report, |r| {
            let mut lines = vec![format!("build: {}", r.build_command)];
            lines.extend(r.invocations.iter().map(|i| {
                format!("{} {}", i.program.display(), i.args.join(" "))
            }));
            lines
        })?;
        return Ok(true);
    }

    let invoker = ProcessInvoker {
        timeout: settings.timeout,
    };
    let report = run_batch(&settings, *no_build, build_renderer, &invoker)?;

    print_with_status(cli.json, report.failed == 0, &report, |r| {
        let mut lines: Vec<String> = r
            .outcomes
            .iter()
            .map(|o| {
                format!(
                    "{}\t{}\t{}",
                    o.status.as_str(),
                    o.fixture.display(),
                    o.expected_output.display()
                )
            })
            .collect();
        lines.push(format!(
            "rendered {} of {} fixtures into {}",
            r.succeeded,
            r.total,
            r.output_dir.display()
        ));
        lines
    })?;

    if report.failed > 0 {
        return Err(HarnessError::InvocationsFailed {
            failed: report.failed,
            total: report.total,
        }
        .into());
    }
    Ok(true)
}
