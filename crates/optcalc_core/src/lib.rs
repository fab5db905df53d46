//! # optcalc_core: Foundation Layer for the Options Calculators
//!
//! ## Layer 1 (Foundation) Role
//!
//! optcalc_core is the bottom layer of the workspace, providing:
//! - Option side: `OptionType` (`types::option_type`)
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//! - Root-finding solvers: Newton-Raphson and Brent (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other optcalc_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use optcalc_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//! use optcalc_core::types::OptionType;
//!
//! let side: OptionType = "put".parse().unwrap();
//! assert!(side.is_put());
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 4.0, |x: f64| 2.0 * x, 1.0).unwrap();
//! assert!((root - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionType` and the error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
