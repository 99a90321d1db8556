//! Application lifecycle: build the store and service at startup, tear
//! them down at exit.

pub mod lifetime;

pub use lifetime::shutdown::graceful_shutdown;
pub use lifetime::startup::{StartupContext, prepare_startup};
