//! Signal handling for clean shutdown of the watch loop.
//!
//! SIGINT and SIGTERM both set a shared flag that the watch loop polls every
//! tick. No display update fires after the flag is observed, which is the
//! only teardown ordering the loop needs.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

/// Register SIGINT/SIGTERM handlers and return the shutdown flag they set.
pub fn setup_signal_handler() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));
    flag::register(SIGTERM, Arc::clone(&shutdown)).context("Failed to register SIGTERM handler")?;
    flag::register(SIGINT, Arc::clone(&shutdown)).context("Failed to register SIGINT handler")?;
    Ok(shutdown)
}
