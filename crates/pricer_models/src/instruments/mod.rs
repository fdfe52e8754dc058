//! Financial instrument definitions.
//!
//! Only vanilla European FX options are modelled. Instruments are organised
//! by asset class:
//! - [`fx`]: FX derivatives (`FxOptionTrade`)

pub mod fx;

pub use fx::{FxOptionTrade, FxOptionType};
