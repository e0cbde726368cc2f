//! Convenient macros for application messaging and logging.
//!
//! The macros route every user-facing message either to the `tracing`
//! subscriber (debug mode) or to plain console output (normal mode), so
//! commands never have to care which one is active.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either variable is set:
//! - **`AVATASK_DEBUG`**: application-specific debug flag
//! - **`RUST_LOG`**: standard Rust logging configuration
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: general message display
//! - **`msg_success!`**: success notifications with ✅ prefix
//! - **`msg_info!`**: informational messages with ℹ️ prefix
//! - **`msg_warning!`**: warning messages with ⚠️ prefix
//! - **`msg_error!`**: error messages with ❌ prefix
//! - **`msg_bail_anyhow!`**: early return with an `anyhow::Error`
//! - **`msg_debug!`**: debug-only messages with 🔍 prefix
//!
//! ```rust,no_run
//! use avatask::libs::messages::Message;
//! use avatask::{msg_error, msg_success};
//!
//! msg_success!(Message::TaskCreated);
//! msg_error!(Message::TaskDeleteFailed);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `AVATASK_DEBUG` or `RUST_LOG` is set. Cached after the first call.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("AVATASK_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a general message.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with the ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error message with the ❌ prefix to stderr.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Debug-only output; silent in normal mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
