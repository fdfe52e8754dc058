//! # Pricer Models (L2: Business Logic)
//!
//! FX option trades, trade validation, and the Garman-Kohlhagen closed form.
//!
//! This crate provides:
//! - [`instruments`]: the validated [`FxOptionTrade`](instruments::FxOptionTrade)
//! - [`validation`]: raw records and the validation gatekeeper
//! - [`analytical`]: normal distribution and Garman-Kohlhagen PV, Delta, Vega
//!
//! ## Design Principles
//!
//! - **Validate once**: a trade can only be built by the gatekeeper, so
//!   downstream stages never re-check field invariants
//! - **Closed rejection taxonomy**: every failure maps to one `RejectionCode`
//! - **Generic analytics**: closed forms are generic over `T: Float`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod validation;
