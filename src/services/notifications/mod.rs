//! SMS dispatch with pluggable providers.
//!
//! The core trait `NotificationProvider` is implemented once per provider
//! endpoint: Termii transactional SMS, Termii OTP and SmartHive SMS.

mod provider;
mod smarthive_provider;
mod termii_otp_provider;
mod termii_sms_provider;

pub use provider::{DispatchContext, NotificationProvider};
pub use smarthive_provider::SmartHiveProvider;
pub use termii_otp_provider::TermiiOtpProvider;
pub use termii_sms_provider::TermiiSmsProvider;
