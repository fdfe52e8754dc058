//! # Pricer Pricing (Layer 3: Pricing Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns validated trades into risk figures:
//! - Garman-Kohlhagen PV, Delta and Vega per trade ([`engine`])
//! - Position scaling by the signed base-currency notional ([`priced`])
//! - Degenerate-input handling ([`policy`])
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): conventions, currencies, `PricingError`
//! - Layer 2 (pricer_models): `FxOptionTrade`, Garman-Kohlhagen closed form
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::validation::{validate, RawRecord};
//! use pricer_pricing::price;
//!
//! let record = RawRecord::new(0)
//!     .with("TradeID", "FX-1")
//!     .with("Underlying", "GBP/USD")
//!     .with("Notional", 750_000.0)
//!     .with("NotionalCurrency", "GBP")
//!     .with("Strike", 1.27)
//!     .with("Spot", 1.25)
//!     .with("Vol", 0.09)
//!     .with("RateDomestic", 0.05)
//!     .with("RateForeign", 0.045)
//!     .with("Expiry", 1.0)
//!     .with("OptionType", "Put");
//!
//! let priced = price(&validate(&record).unwrap()).unwrap();
//! assert!(priced.pv() > 0.0);
//! assert!(priced.delta() < 0.0);
//! assert!(priced.vega() > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod policy;
pub mod priced;

pub use engine::{price, PricingEngine};
pub use policy::{DegeneratePolicy, ParsePolicyError};
pub use priced::{PricedTrade, UnitFigures};
