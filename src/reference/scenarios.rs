use crate::models::ScenarioKind;

/// Weather and input assumptions behind one yield scenario.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRow {
    pub kind: ScenarioKind,
    pub rainfall: &'static str,
    pub fertilizer: &'static str,
    /// Share of the crop's optimal yield reached under these conditions.
    pub yield_factor: f64,
    pub confidence_pct: u8,
}

pub const SCENARIOS: &[ScenarioRow] = &[
    ScenarioRow {
        kind: ScenarioKind::Optimal,
        rainfall: "800-1000mm",
        fertilizer: "Full dose",
        yield_factor: 1.0,
        confidence_pct: 92,
    },
    ScenarioRow {
        kind: ScenarioKind::Average,
        rainfall: "600-800mm",
        fertilizer: "80% dose",
        yield_factor: 0.905,
        confidence_pct: 88,
    },
    ScenarioRow {
        kind: ScenarioKind::Drought,
        rainfall: "400-600mm",
        fertilizer: "Full dose",
        yield_factor: 0.69,
        confidence_pct: 85,
    },
    ScenarioRow {
        kind: ScenarioKind::ExcessRain,
        rainfall: ">1000mm",
        fertilizer: "Reduced dose",
        yield_factor: 0.76,
        confidence_pct: 82,
    },
];

/// Confidence lost when the crop is grown outside its preferred textures.
pub const OFF_TEXTURE_CONFIDENCE_PENALTY: u8 = 5;
