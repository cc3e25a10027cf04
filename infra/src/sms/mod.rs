//! SMS Gateway Module
//!
//! Client for the TweetSMS HTTP gateway used to message beneficiaries.
//!
//! ## Features
//!
//! - **Validation**: recipient, sender and message checks before any request
//! - **Typed results**: transport and gateway errors come back as [`SmsFailure`]
//! - **Bilingual errors**: every gateway code maps to English and Arabic text
//! - **Transport trait**: HTTP via reqwest, or an in-memory mock for development
//! - **Security**: phone number masking in logs

pub mod error_codes;
pub mod mock_transport;
pub mod response;
pub mod transport;
pub mod tweetsms;

pub use error_codes::{describe_gateway_error, lookup_gateway_error, GatewayErrorMessage, GATEWAY_ERRORS};
pub use mock_transport::{MockGatewayTransport, RecordedMethod, RecordedRequest};
pub use response::{
    decode_balance_body, decode_send_body, PassThroughBody, SendReceipt, SmsFailure,
    SmsFailureKind, TRANSPORT_FAILURE_CODE, UNKNOWN_RESPONSE_CODE,
};
pub use transport::{GatewayReply, GatewayTransport, ReqwestTransport};
pub use tweetsms::{SmsRequest, TweetSmsClient};

pub use bp_shared::phone::mask_phone_number;

#[cfg(test)]
mod tests;
