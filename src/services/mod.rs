//! Service layer for dispatch operations.
//!
//! Services encapsulate provider logic and are driven by the CLI handlers.

pub mod notifications;

pub use notifications::{
    DispatchContext, NotificationProvider, SmartHiveProvider, TermiiOtpProvider, TermiiSmsProvider,
};
