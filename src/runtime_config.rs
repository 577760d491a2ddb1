//! Environment-variable runtime configuration.
//!
//! `POSTWIRE_STACK_SIZE` sets the stack size for serving coroutines,
//! in decimal (`32768`) or hex (`0x8000`) bytes. Default is 16 KiB;
//! raise it for handlers with deep call chains or large locals, since
//! total memory is stack size × concurrent coroutines.

use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for serving coroutines in bytes.
    pub stack_size: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = match env::var("POSTWIRE_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(0x4000)
                } else {
                    val.parse().unwrap_or(0x4000)
                }
            }
            Err(_) => 0x4000,
        };
        RuntimeConfig { stack_size }
    }

    /// Apply the stack size to the May runtime. Call once at startup,
    /// before the server starts.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}
