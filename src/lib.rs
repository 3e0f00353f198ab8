//! Startup-time configuration loading for the `siprelayd` SIP relay daemon.
//!
//! See the [`configuration`] module for details.

pub mod configuration;
pub mod logging;
