//! HTTP handlers for the Business Administration Platform

pub mod health;
pub mod quotation;

pub use health::*;
pub use quotation::*;
