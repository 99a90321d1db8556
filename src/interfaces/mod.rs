//! User-facing surfaces

pub mod cli;
