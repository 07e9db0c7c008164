//! sms-dispatch library
//!
//! Sends transactional SMS and one-time passwords through Termii and plain
//! SMS through SmartHive.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
