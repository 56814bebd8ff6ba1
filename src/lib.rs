//! TMB Calculator Library
//!
//! Basal Metabolic Rate (BMR) and Total Daily Energy Expenditure (TDEE)
//! estimation with input validation.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod metabolism;
pub mod models;
pub mod tools;
