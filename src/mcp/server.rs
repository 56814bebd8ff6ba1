//! TMB MCP Server Implementation
//!
//! Implements the MCP server with all TMB tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::models::RawFields;
use crate::tools::calculator::{self, raw_value_from_json, text_from_json};
use crate::tools::status::StatusTracker;

/// TMB MCP Service
#[derive(Clone)]
pub struct TmbService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    config: ServerConfig,
    tool_router: ToolRouter<TmbService>,
}

impl TmbService {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config.default_unit_system))),
            config,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Calculator Parameter Structs
// ============================================================================

/// Raw calculator fields. Numbers may be JSON numbers or strings.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculatorParams {
    /// Unit system: metric (kg, cm) or imperial (lb, ft + in). Defaults to the server setting.
    pub unit_system: Option<serde_json::Value>,
    /// Body weight: kg for metric, lb for imperial (> 0)
    pub weight: Option<serde_json::Value>,
    /// Height in centimeters, metric only (>= 30)
    pub height_cm: Option<serde_json::Value>,
    /// Height feet component, imperial only (>= 1)
    pub height_ft: Option<serde_json::Value>,
    /// Height inches component, imperial only (0 to 11)
    pub height_in: Option<serde_json::Value>,
    /// Age in years (> 0)
    pub age: Option<serde_json::Value>,
    /// Gender: male or female
    pub gender: Option<serde_json::Value>,
    /// Body fat percentage (0 to 100). Omit or pass "" when unknown.
    pub body_fat: Option<serde_json::Value>,
    /// Activity multiplier: exactly 1.2, 1.375, 1.55, 1.725 or 1.9
    pub activity_level: Option<serde_json::Value>,
}

impl CalculatorParams {
    fn into_raw(self) -> (Option<String>, RawFields) {
        let raw = RawFields {
            weight: raw_value_from_json(self.weight),
            height_cm: raw_value_from_json(self.height_cm),
            height_ft: raw_value_from_json(self.height_ft),
            height_in: raw_value_from_json(self.height_in),
            age: raw_value_from_json(self.age),
            gender: text_from_json(self.gender),
            body_fat: raw_value_from_json(self.body_fat),
            activity_level: raw_value_from_json(self.activity_level),
        };
        (text_from_json(self.unit_system), raw)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl TmbService {
    // --- Status ---

    #[tool(description = "Get the current status of the TMB service including build info, configuration, and process information")]
    async fn tmb_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the BMR/TDEE calculator: required fields, validation rules, activity levels and formulas. Call this before the first estimate.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "List the five fixed activity levels with their multipliers and labels")]
    fn list_activity_levels(&self) -> Result<CallToolResult, McpError> {
        to_json(&calculator::list_activity_levels())
    }

    #[tool(description = "Validate calculator fields without computing. Returns valid plus one error message per invalid field.")]
    fn validate_input(&self, Parameters(p): Parameters<CalculatorParams>) -> Result<CallToolResult, McpError> {
        let (unit_system, raw) = p.into_raw();
        let result = calculator::validate_input(&raw, unit_system.as_deref(), self.config.default_unit_system);
        tracing::debug!(valid = result.valid, "validate_input");
        to_json(&result)
    }

    #[tool(description = "Estimate Basal Metabolic Rate and Total Daily Energy Expenditure. Uses Katch-McArdle when body_fat is given, Mifflin-St Jeor otherwise. Returns validation errors instead when input is invalid.")]
    fn estimate_energy(&self, Parameters(p): Parameters<CalculatorParams>) -> Result<CallToolResult, McpError> {
        let (unit_system, raw) = p.into_raw();
        let result = calculator::estimate_energy(&raw, unit_system.as_deref(), self.config.default_unit_system);
        tracing::info!(valid = result.valid, unit_system = %result.unit_system, "estimate_energy");
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for TmbService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tmb".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("TMB Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "TMB Calculator - Basal Metabolic Rate (BMR) and Total Daily Energy Expenditure (TDEE). \
                 IMPORTANT: Call calculator_instructions before the first estimate. \
                 Calculator: validate_input, estimate_energy, list_activity_levels. \
                 Status: tmb_status. \
                 Nothing is stored; every call is computed fresh."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, RawValue, UnitSystem};

    #[test]
    fn test_params_into_raw() {
        let params: CalculatorParams = serde_json::from_value(serde_json::json!({
            "unit_system": "imperial",
            "weight": 154,
            "height_ft": "5",
            "height_in": 9,
            "age": 30,
            "gender": "female",
            "body_fat": "",
            "activity_level": 1.375
        }))
        .unwrap();

        let (unit_system, raw) = params.into_raw();
        assert_eq!(unit_system.as_deref(), Some("imperial"));
        assert_eq!(raw.weight, Some(RawValue::Number(154.0)));
        assert_eq!(raw.height_ft, Some(RawValue::Text("5".to_string())));
        assert_eq!(raw.height_cm, None);
        assert_eq!(raw.body_fat, Some(RawValue::Text(String::new())));

        let response = calculator::estimate_energy(&raw, unit_system.as_deref(), UnitSystem::Metric);
        assert!(response.valid);
    }

    #[test]
    fn test_non_string_gender_is_a_field_error() {
        let params: CalculatorParams = serde_json::from_value(serde_json::json!({
            "weight": 70,
            "height_cm": 175,
            "age": 30,
            "gender": 1,
            "activity_level": 1.55
        }))
        .unwrap();

        let (unit_system, raw) = params.into_raw();
        let response = calculator::estimate_energy(&raw, unit_system.as_deref(), UnitSystem::Metric);
        assert!(!response.valid);
        assert_eq!(
            response.errors.get(&Field::Gender).map(String::as_str),
            Some("Gender must be male or female")
        );
        assert_eq!(response.errors.len(), 1);
    }

    #[test]
    fn test_non_string_unit_system_is_a_field_error() {
        let params: CalculatorParams = serde_json::from_value(serde_json::json!({
            "unit_system": 2,
            "weight": 70,
            "height_cm": 175,
            "age": 30,
            "gender": "male",
            "activity_level": 1.55
        }))
        .unwrap();

        let (unit_system, raw) = params.into_raw();
        assert_eq!(unit_system.as_deref(), Some("2"));

        let response = calculator::validate_input(&raw, unit_system.as_deref(), UnitSystem::Metric);
        assert!(!response.valid);
        assert_eq!(
            response.errors.get(&Field::UnitSystem).map(String::as_str),
            Some("Unit system must be metric or imperial")
        );
    }

    #[test]
    fn test_null_gender_is_missing() {
        let params: CalculatorParams =
            serde_json::from_value(serde_json::json!({ "gender": null, "unit_system": null })).unwrap();
        let (unit_system, raw) = params.into_raw();
        assert_eq!(unit_system, None);
        assert_eq!(raw.gender, None);
    }

    #[test]
    fn test_server_info() {
        let service = TmbService::new(ServerConfig::default());
        let info = service.get_info();
        assert_eq!(info.server_info.name, "tmb");
    }
}
