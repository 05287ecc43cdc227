//! Static agronomic tables. Read-only after first access and shared by every request.

pub mod crops;
pub mod scenarios;
pub mod soil;
pub mod treatment;

pub use crops::{candidate, catalog};
pub use scenarios::{ScenarioRow, SCENARIOS};
pub use soil::{
    remedy, spec, water_profile, Deviation, Favorability, ParameterSpec, Remedy, SeverityBasis,
    WaterProfile,
};
pub use treatment::{DoseRow, SplitRow, StageRow, TreatmentProfile};
