//! TMB Tools module
//!
//! MCP tool implementations for the TMB calculator.

pub mod calculator;
pub mod status;
