//! Foreign exchange option instruments.
//!
//! This module provides:
//! - [`FxOptionType`]: call or put
//! - [`FxOptionTrade`]: a validated vanilla European FX option trade

mod option;

pub use option::{FxOptionTrade, FxOptionType, ParseOptionTypeError};
