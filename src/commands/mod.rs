//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `run.rs` — the batch pass (`run`, including `--dry-run`).
//! - `inspect.rs` — read-only commands (`list`, `doctor`).
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate batch logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod inspect;
pub mod run;

pub use inspect::handle_inspect_commands;
pub use run::handle_run_commands;
