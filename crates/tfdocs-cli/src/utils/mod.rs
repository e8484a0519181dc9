//! Shared helpers for commands.

pub mod cli_args;
pub mod formatting;
pub mod logging;
pub mod session;
