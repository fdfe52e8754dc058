//! Trade validation.
//!
//! This module provides:
//! - [`RawRecord`] / [`RawValue`]: unvalidated field mappings from ingestion
//! - [`TradeField`]: canonical field names and spreadsheet aliases
//! - [`validate`]: the gatekeeper turning a raw record into an
//!   [`FxOptionTrade`](crate::instruments::FxOptionTrade) or a rejection
//! - [`RejectionReason`] / [`RejectionCode`]: closed rejection taxonomy

mod gatekeeper;
mod raw;
mod rejection;

pub use gatekeeper::{validate, MAX_TIME_TO_EXPIRY, MAX_VOLATILITY, TRADE_DATE_FORMAT};
pub use raw::{RawRecord, RawValue, TradeField};
pub use rejection::{RejectionCode, RejectionReason, ValidationError, ValidationRule};
