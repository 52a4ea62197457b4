//! Monitor for a Rekor transparency log
//!
//! Fetches checkpoints, entries and consistency proofs from a Rekor
//! instance and verifies them offline with `tlog-verify`. The binary in
//! `main.rs` is a thin wrapper around [`Cli`].

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::Cli;
