//! Service layer
//!
//! Allocation logic shared by every surface (CLI today; an HTTP layer
//! would call the same `ShortenService`).

pub mod code_generator;
mod shorten_service;

pub use code_generator::{CodeGenerator, validate_custom};
pub use shorten_service::*;
