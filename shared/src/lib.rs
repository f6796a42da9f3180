//! Shared types and domain logic for the Business Administration Platform
//!
//! This crate contains the record models, the quotation workbook import
//! pipeline, and the wire types shared between the backend and other
//! components of the system.

pub mod import;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
