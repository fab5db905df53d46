//! # optcalc Models (L2: Calculators)
//!
//! The numerical core of the options calculators.
//!
//! This crate provides:
//! - Standard normal CDF/PDF, including the legacy reference approximation
//! - Black-Scholes pricing and Greeks for European calls and puts
//! - A Newton-Raphson implied-volatility solver with an optional safeguarded mode
//! - Max-pain aggregation over an open-interest table
//! - Scenario arithmetic: breakeven, ROI, Sharpe/Sortino, margin leverage
//! - A [`calculators`] facade bundling all of the above behind one configuration
//!
//! ## Design Principles
//!
//! - **Pure functions**: no I/O, no shared state; every call is independent
//! - **Tagged failures**: invalid inputs return an error value instead of a NaN
//! - **Generic over `T: Float`** for the closed-form pricing formulas

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod calculators;
pub mod config;
pub mod instruments;
pub mod open_interest;
pub mod scenarios;

pub use calculators::Calculator;
pub use config::CalculatorConfig;
