//! CLI identity strings, the process-wide verbosity level, and the display
//! macros used across the programs layer.

use std::sync::atomic::{AtomicU32, Ordering};

/// Tool name, shown in the usage banner.
pub const TOOL_NAME: &str = "lz4opt";

/// Tool version, shown in the usage banner.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Verbosity level ──────────────────────────────────────────────────────────
//
// 0 — silent, 1 — errors only, 2 — normal (default), 3 — verbose progress
// and summaries, 4 — diagnostic.  Process-wide so every module can emit
// without threading a logger through the drivers.
static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current verbosity level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the verbosity level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Write a formatted message to **stderr** unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Write a formatted message to **stderr** when the verbosity level is at
/// least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
