mod notification;
mod smarthive;
mod termii;

pub use notification::{ApiKey, DispatchResponse, OutboundMessage, ResponseBody};
pub use smarthive::{SmartHiveConfig, SmartHiveMessageType, SmartHiveRoute, SmartHiveSmsRequest};
pub use termii::{
    OtpPolicy, OtpSendReceipt, OtpVerification, OtpVerifyResponse, PinType, SmsType,
    TermiiChannel, TermiiConfig, TermiiOtpRequest, TermiiOtpVerifyRequest, TermiiSmsRequest,
};
