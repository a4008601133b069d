//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call the configuration service or supervisor
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Touch the settings file directly
//! - Spawn server processes themselves

pub mod config;
pub mod open;
pub mod paths;
pub mod run;
