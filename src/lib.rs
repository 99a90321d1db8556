//! linkvault - URL shortener core
//!
//! Maps long URLs to short, unique codes and resolves them back. The
//! interesting part is allocation: codes are reserved through an atomic
//! reserve-if-absent on a pluggable store, so concurrent callers can never
//! be handed the same code.
//!
//! # Architecture
//! - `services`: code generation and the `ShortenService` allocation loop
//! - `storage`: the `UniquenessStore` trait and its memory, SQL and Redis backends
//! - `config`: TOML + environment configuration
//! - `runtime`: startup and shutdown of the store and service
//! - `interfaces`: the command-line surface
//! - `system`: logging setup

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
