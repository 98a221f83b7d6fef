//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep fixture/invocation/report structs in one place.
//! - Avoid cyclic imports between services.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — fixtures, invocations, outcomes, reports, config file schema.
//! - `constants.rs` — built-in defaults (paths, pattern, jobs, build command).
//! - `error.rs` — `HarnessError`.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem or process side effects.
//!
//! ## Compatibility note
//! Changes in the report structs affect `--json` outputs.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod error;
pub mod models;
