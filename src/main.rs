use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::error::HarnessError;
pub use domain::models::*;
pub use services::batch::run_batch;
pub use services::builder::build_renderer;
pub use services::config::{
    load_config, resolve_fixture_source, resolve_output_dir, resolve_run_settings,
};
pub use services::doctor::doctor;
pub use services::fixtures::{discover_fixtures, fixture_entries, warn_on_collisions};
pub use services::invoke::{plan_invocations, ProcessInvoker};
pub use services::output::{print_one, print_out, print_with_status};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if handle_inspect_commands(&cli, &config)? {
        return Ok(());
    }
    if handle_run_commands(&cli, &config)? {
        return Ok(());
    }
    unreachable!("every command has a handler")
}
