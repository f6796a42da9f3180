//! Business logic services for the Business Administration Platform

pub mod quotation;
pub mod workbook;

pub use quotation::QuotationService;
