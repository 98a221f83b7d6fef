use crate::*;

pub fn handle_inspect_commands(cli: &Cli, config: &ConfigFile) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::List {
            fixtures,
            output_dir,
        } => {
            let (dir, pattern) = resolve_fixture_source(fixtures, &config.run);
            let output_dir = resolve_output_dir(output_dir.as_ref(), &config.run);
            let found = discover_fixtures(&dir, &pattern)?;
            warn_on_collisions(&found);
            let entries = fixture_entries(&found, &output_dir);
            print_out(cli.json, &entries, |e| {
                format!("{}\t{}", e.fixture.display(), e.output.display())
            })?;
        }
        Commands::Doctor { opts } => {
            let settings = resolve_run_settings(opts, None, None, &config.run)?;
            let report = doctor(&settings);
            print_one(cli.json, &report, |r| {
                let mut lines = vec![format!("overall: {}", r.overall)];
                lines.extend(r.checks.iter().map(|c| format!("{}\t{}", c.name, c.status)));
                lines
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}
