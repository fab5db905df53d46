//! Numerical building blocks shared by the calculators.
//!
//! - [`solvers`]: Root-finding algorithms used by the implied-volatility solver

pub mod solvers;
