//! Shared test fixtures for LPForge crates.
//!
//! This crate provides reference problems and pure checking functions.
//! It does NOT depend on `lpforge-solver`, so the solver can use it as a
//! dev-dependency.
//!
//! - [`catalog`] - Reference linear programs with their known outcomes
//! - [`check`] - Feasibility and objective checks for reported solutions
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! lpforge-test = { workspace = true }
//! ```
//!
//! Then pull the problems you need:
//!
//! ```
//! use lpforge_test::catalog;
//!
//! let entry = catalog::standard();
//! assert_eq!(entry.problem.num_variables(), 2);
//! ```

pub mod catalog;
pub mod check;

pub use catalog::{CatalogEntry, Expected};
pub use check::{assert_close, assert_feasible};
