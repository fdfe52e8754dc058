//! # pricer_core: Foundation Types for the FX Options Risk Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Currency types: `Currency`, `CurrencyPair` (`types::currency`, `types::currency_pair`)
//! - Error types: `CurrencyError`, `PricingError` (`types::error`)
//! - Numeric reporting conventions shared by pricing and normalisation (`conventions`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation of currency codes for reports
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let pair: CurrencyPair = "USD/JPY".parse().unwrap();
//! assert_eq!(pair.base(), Currency::USD);
//! assert_eq!(pair.quote().code(), "JPY");
//! assert!(pair.contains(Currency::USD));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod conventions;
pub mod types;
