//! # autoguide-core
//!
//! Core crate for the AutoGuide back-office client. Contains collaborator
//! traits, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other AutoGuide crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
