//! Application coordinator that manages the complete lifecycle of armswatch.
//!
//! This module handles resource acquisition, initialization, and the watch
//! loop. It manages:
//! - Configuration loading
//! - Signal handler setup
//! - Terminal setup with an RAII cursor guard
//! - The guarded per-tick display update
//!
//! The `Armswatch` struct uses a builder pattern to support the different
//! startup contexts:
//! - Live watch: `Armswatch::new(debug_enabled).run()`
//! - One-shot frame (status/simulate): `Armswatch::new(debug_enabled).one_shot().run()`

use std::sync::atomic::Ordering;
use std::time::Duration as StdDuration;

use anyhow::Result;

use crate::{
    config::{self, Config},
    display::{Display, TerminalGuard},
    schedule::EventScheduler,
    signals::setup_signal_handler,
    time_source,
};

/// Builder for configuring and running the armswatch application.
pub struct Armswatch {
    debug_enabled: bool,
    show_headers: bool,
    one_shot: bool,
    config_dir: Option<String>,
}

impl Armswatch {
    /// Create a new runner with defaults matching a normal live watch.
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            show_headers: true,
            one_shot: false,
            config_dir: None,
        }
    }

    /// Render a single frame and exit instead of looping.
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    /// Use a custom configuration directory.
    pub fn with_config_dir(mut self, config_dir: Option<String>) -> Self {
        self.config_dir = config_dir;
        self
    }

    /// Skip the version header (for embedding in scripts).
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Execute the application with the configured settings.
    ///
    /// Handles the full lifecycle: header, config load, signal handler and
    /// terminal setup, the watch loop, and graceful teardown. Configuration
    /// failures are logged and exit with status 1.
    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();
            if self.debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled");
            }
        }

        let config = match Config::load(self.config_dir.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log_error_exit!("Configuration failed");
                eprintln!("{e:?}");
                std::process::exit(1);
            }
        };

        if self.debug_enabled {
            let path = config::get_config_path(self.config_dir.as_deref())?;
            config.log_config(&path);
        }

        let scheduler = EventScheduler::new(config.reference_date(), config.server_utc_offset());
        let mut display = Display::new(&config);

        if self.one_shot {
            let now = time_source::now();
            if time_source::is_simulated() {
                log_block_start!("Schedule as of {}", now.format("%Y-%m-%d %H:%M:%S"));
            }
            log_pipe!();
            display.render_frame(&scheduler, now)?;
            log_end!();
            return Ok(());
        }

        let shutdown = setup_signal_handler()?;
        let _term = TerminalGuard::new();
        let interval = StdDuration::from_secs(config.update_interval());

        log_block_start!("Watching the Arms Race schedule (Ctrl+C to stop)");
        log_pipe!();

        while !shutdown.load(Ordering::SeqCst) {
            let now = time_source::now();
            // One bad tick must not cancel future ticks
            if let Err(e) = display.render_frame(&scheduler, now) {
                log_pipe!();
                log_warning!("Display update failed: {e}");
            }
            time_source::sleep(interval);
        }

        // Shutdown flag observed: no frame is drawn past this point
        log_pipe!();
        log_decorated!("Shutting down armswatch...");
        log_end!();
        Ok(())
    }
}
