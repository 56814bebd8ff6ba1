//! One-shot BMR/TDEE calculation from the command line
//! Usage: cargo run --bin calculate_tmb -- [metric|imperial] weight=70 height_cm=175 age=30 gender=male activity_level=1.55 [body_fat=20]

use tmb::config::ServerConfig;
use tmb::metabolism;
use tmb::models::{Field, RawFields, UnitSystem};

/// Parse `[unit_system] key=value ...` into a unit system and raw fields
fn parse_args(args: &[String], default: UnitSystem) -> Result<(UnitSystem, RawFields), String> {
    let mut unit_system = default;
    let mut raw = RawFields::default();

    for (i, arg) in args.iter().enumerate() {
        let Some((key, value)) = arg.split_once('=') else {
            if i == 0 {
                unit_system = UnitSystem::from_str(arg)
                    .ok_or_else(|| format!("Unknown unit system: {}", arg))?;
                continue;
            }
            return Err(format!("Expected key=value, got '{}'", arg));
        };

        let field = Field::from_str(key).ok_or_else(|| format!("Unknown field: {}", key))?;
        if field == Field::UnitSystem {
            unit_system = UnitSystem::from_str(value)
                .ok_or_else(|| format!("Unknown unit system: {}", value))?;
        } else {
            raw.set(field, value);
        }
    }

    Ok((unit_system, raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = ServerConfig::from_env();

    let (unit_system, raw) = parse_args(&args, config.default_unit_system)?;
    println!(
        "Units: {} (weight in {}, height in {})",
        unit_system.as_str(),
        unit_system.weight_unit(),
        unit_system.height_unit()
    );

    match metabolism::estimate_raw(&raw, unit_system) {
        Ok(estimate) => {
            print!("{}", estimate.summary_text());
            Ok(())
        }
        Err(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            Err(errors.into())
        }
    }
}
