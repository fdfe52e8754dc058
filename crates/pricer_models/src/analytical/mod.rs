//! Analytical pricing formulas for European FX options.
//!
//! This module provides:
//! - Standard normal CDF and PDF
//! - Garman-Kohlhagen closed form with PV, Delta and Vega
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Supports both `f64` and `f32`
//! - **No NaN leakage**: Degenerate `σ·√T` is refused at construction
//! - **Symmetric CDF**: `N(-x) = 1 - N(x)` to rounding, keeping parity tight

pub mod distributions;
pub mod error;
pub mod garman_kohlhagen;

pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use garman_kohlhagen::{FxGreeks, GarmanKohlhagen, GarmanKohlhagenParams};
