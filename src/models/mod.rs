//! Data models
//!
//! Rust structs representing calculator inputs and results.

mod estimate;
mod input;
mod profile;

pub use estimate::{BmrFormula, EnergyEstimate, LevelEnergy};
pub use input::{Field, HeightSpec, InputRecord, NormalizedInput, RawFields, RawValue};
pub use profile::{ActivityLevel, Gender, UnitSystem};
