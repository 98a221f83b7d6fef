//! Service layer containing the batch logic and its side effects.
//!
//! ## Service map
//! - `config.rs` — config file loading and CLI/file/default merging.
//! - `fixtures.rs` — fixture discovery, output naming, collision detection.
//! - `builder.rs` — renderer build step.
//! - `invoke.rs` — renderer argv assembly and subprocess execution.
//! - `batch.rs` — bounded worker pool and the end-to-end run pipeline.
//! - `doctor.rs` — environment checks.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod batch;
pub mod builder;
pub mod config;
pub mod doctor;
pub mod fixtures;
pub mod invoke;
pub mod output;
