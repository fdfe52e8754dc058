//! FX Risk CLI library
//!
//! Command implementations, run configuration and report writing behind
//! the `fxrisk` binary.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the A-P-S architecture, this crate
//! wires the loader (`adapter_loader`) to the pricing pipeline
//! (`pricer_risk`) and turns a [`PortfolioRun`](pricer_risk::PortfolioRun)
//! into report files.

#![warn(clippy::all)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod commands;
pub mod config;
pub mod error;
pub mod report;

pub use error::{CliError, Result};
