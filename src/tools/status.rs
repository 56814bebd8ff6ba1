//! TMB Status Tool
//!
//! Provides runtime status information about the TMB service, plus the
//! usage guide served by `calculator_instructions`.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::models::UnitSystem;

/// Calculator usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# TMB Calculator Instructions

This guide explains how to estimate Basal Metabolic Rate (BMR) and Total Daily
Energy Expenditure (TDEE) with the TMB tools.

## Workflow

1. Collect the fields below from the user.
2. Call `validate_input` whenever a field changes. Only proceed when `valid` is true.
3. Call `estimate_energy` with the same fields.
4. Report BMR, TDEE for the chosen level, and the per-level table.

`estimate_energy` validates again on its own. If anything is wrong it returns
`valid: false` with one message per field instead of an estimate.

---

## Fields

| Field | Required | Rule |
|-------|----------|------|
| `unit_system` | no (server default) | `metric` or `imperial` |
| `weight` | yes | > 0 and <= 1000000 (kg for metric, lb for imperial) |
| `height_cm` | metric only | 30 to 1000000 |
| `height_ft` | imperial only | 1 to 1000000 |
| `height_in` | imperial only | 0 to 11 |
| `age` | yes | > 0 and <= 1000000 (years) |
| `gender` | yes | `male` or `female` |
| `body_fat` | no | 0 to 100 (%); leave out or pass "" when unknown |
| `activity_level` | yes | exactly one of 1.2, 1.375, 1.55, 1.725, 1.9 |

Height fields of the other unit system are ignored.

Numbers may be sent as JSON numbers or strings.

---

## Activity Levels

| Multiplier | Level |
|------------|-------|
| 1.2 | Sedentary (office work) |
| 1.375 | Light exercise (1-2x/week) |
| 1.55 | Moderate exercise (3-5x/week) |
| 1.725 | Intense exercise (6-7x/week) |
| 1.9 | Athlete (2x/day) |

Do NOT round a user's description to an in-between value such as 1.5. Pick
one of the five levels.

---

## Formulas

**Body fat known** (Katch-McArdle, gender and age not used):
- lean mass = weight_kg x (1 - body_fat / 100)
- BMR = 370 + 21.6 x lean mass

A body fat of 0 counts as known.

**Body fat unknown** (Mifflin-St Jeor):
- Men: BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + 5
- Women: BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age - 161

**TDEE** = BMR x activity multiplier.

Imperial input is converted first: 1 lb = 0.45359237 kg, 1 in = 2.54 cm.

---

## Example

Metric, 70 kg, 175 cm, 30 years, male, no body fat, 1.55:
- BMR = 700 + 1093.75 - 150 + 5 = 1648.75 kcal/day
- TDEE = 1648.75 x 1.55 = 2555.56 kcal/day

Nothing is stored. Every call computes a fresh result.
"#;

/// Runtime status of the TMB service
#[derive(Debug, Clone, Serialize)]
pub struct TmbStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Configuration
    pub default_unit_system: UnitSystem,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    default_unit_system: UnitSystem,
}

impl StatusTracker {
    pub fn new(default_unit_system: UnitSystem) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            default_unit_system,
        }
    }

    pub fn get_status(&self) -> TmbStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TmbStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            default_unit_system: self.default_unit_system,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_process() {
        let tracker = StatusTracker::new(UnitSystem::Imperial);
        let status = tracker.get_status();
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.default_unit_system, UnitSystem::Imperial);
        assert_eq!(status.version, crate::build_info::VERSION);
    }

    #[test]
    fn test_instructions_list_every_activity_level() {
        for level in crate::models::ActivityLevel::ALL {
            assert!(CALCULATOR_INSTRUCTIONS.contains(level.label()));
        }
    }
}
