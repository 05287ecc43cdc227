use crate::models::{IdealRange, SoilParameter, SoilType};

/// How a parameter is judged once it leaves its ideal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Favorability {
    /// Either side of the range needs correction.
    Symmetric,
    /// Surplus is harmless and reported as `High`.
    HigherIsBetter,
    /// Anything below the range is fine.
    LowerIsBetter,
}

/// What distance-from-range is measured against when grading severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBasis {
    /// Relative to the violated boundary value.
    Boundary,
    /// Relative to the width of the ideal range.
    Width,
}

#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub parameter: SoilParameter,
    pub unit: &'static str,
    pub ideal: IdealRange,
    pub favorability: Favorability,
    /// Physically possible values; anything outside points at a unit mix-up.
    pub plausible: IdealRange,
    pub severity_basis: SeverityBasis,
    pub impact: &'static str,
}

static PH: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::Ph,
    unit: "",
    ideal: IdealRange::new(6.0, 7.0),
    favorability: Favorability::Symmetric,
    plausible: IdealRange::new(0.0, 14.0),
    severity_basis: SeverityBasis::Width,
    impact: "Locks up nutrients and limits root activity",
};

static NITROGEN: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::Nitrogen,
    unit: "kg/ha",
    ideal: IdealRange::new(40.0, 60.0),
    favorability: Favorability::HigherIsBetter,
    plausible: IdealRange::new(0.0, 2_000.0),
    severity_basis: SeverityBasis::Boundary,
    impact: "Stunted leaf growth and pale foliage",
};

static PHOSPHORUS: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::Phosphorus,
    unit: "kg/ha",
    ideal: IdealRange::new(25.0, 40.0),
    favorability: Favorability::HigherIsBetter,
    plausible: IdealRange::new(0.0, 1_000.0),
    severity_basis: SeverityBasis::Boundary,
    impact: "May affect root development and flowering",
};

static POTASSIUM: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::Potassium,
    unit: "kg/ha",
    ideal: IdealRange::new(120.0, 280.0),
    favorability: Favorability::HigherIsBetter,
    plausible: IdealRange::new(0.0, 3_000.0),
    severity_basis: SeverityBasis::Boundary,
    impact: "Weaker disease resistance and poor grain filling",
};

static ORGANIC_MATTER: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::OrganicMatter,
    unit: "%",
    ideal: IdealRange::new(2.5, 4.0),
    favorability: Favorability::HigherIsBetter,
    plausible: IdealRange::new(0.0, 100.0),
    severity_basis: SeverityBasis::Boundary,
    impact: "Poor soil structure and water retention",
};

static MOISTURE: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::Moisture,
    unit: "%",
    ideal: IdealRange::new(20.0, 30.0),
    favorability: Favorability::Symmetric,
    plausible: IdealRange::new(0.0, 100.0),
    severity_basis: SeverityBasis::Width,
    impact: "Moisture stress or waterlogging around the roots",
};

static TEMPERATURE: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::Temperature,
    unit: "°C",
    ideal: IdealRange::new(15.0, 30.0),
    favorability: Favorability::Symmetric,
    plausible: IdealRange::new(-30.0, 70.0),
    severity_basis: SeverityBasis::Width,
    impact: "Slow germination and reduced microbial activity",
};

static SALINITY: ParameterSpec = ParameterSpec {
    parameter: SoilParameter::Salinity,
    unit: "dS/m",
    ideal: IdealRange::new(0.0, 2.0),
    favorability: Favorability::LowerIsBetter,
    plausible: IdealRange::new(0.0, 100.0),
    severity_basis: SeverityBasis::Boundary,
    impact: "Salt stress reduces water uptake",
};

pub static PARAMETERS: [&ParameterSpec; 8] = [
    &PH,
    &NITROGEN,
    &PHOSPHORUS,
    &POTASSIUM,
    &ORGANIC_MATTER,
    &MOISTURE,
    &TEMPERATURE,
    &SALINITY,
];

pub fn spec(parameter: SoilParameter) -> &'static ParameterSpec {
    match parameter {
        SoilParameter::Ph => &PH,
        SoilParameter::Nitrogen => &NITROGEN,
        SoilParameter::Phosphorus => &PHOSPHORUS,
        SoilParameter::Potassium => &POTASSIUM,
        SoilParameter::OrganicMatter => &ORGANIC_MATTER,
        SoilParameter::Moisture => &MOISTURE,
        SoilParameter::Temperature => &TEMPERATURE,
        SoilParameter::Salinity => &SALINITY,
    }
}

/// Which side of the ideal range a reading sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Below,
    Within,
    Above,
}

/// Corrective advice for one parameter on one side of its range.
#[derive(Debug, Clone, Copy)]
pub struct Remedy {
    pub hint: &'static str,
    pub category: &'static str,
    pub action: &'static str,
    pub timing: &'static str,
    pub improvement: &'static str,
}

const fn hint_only(hint: &'static str) -> Remedy {
    Remedy {
        hint,
        category: "",
        action: "",
        timing: "",
        improvement: "",
    }
}

pub fn remedy(parameter: SoilParameter, deviation: Deviation) -> Remedy {
    use Deviation::*;
    use SoilParameter::*;

    match (parameter, deviation) {
        (Ph, Below) => Remedy {
            hint: "Apply lime to increase pH",
            category: "Soil Amendment",
            action: "Apply agricultural lime at 1-2 t/acre",
            timing: "2-3 weeks before sowing",
            improvement: "Raises pH toward neutral and frees locked phosphorus",
        },
        (Ph, Above) => Remedy {
            hint: "Add organic matter to lower pH",
            category: "Soil Amendment",
            action: "Incorporate compost or elemental sulphur",
            timing: "During land preparation",
            improvement: "Gradually lowers pH and improves micronutrient uptake",
        },
        (Ph, Within) => hint_only("Optimal pH level"),
        (Nitrogen, Below) => Remedy {
            hint: "Apply nitrogen fertilizer",
            category: "Fertilizer",
            action: "Apply urea at 40 kg/acre in two split doses",
            timing: "At sowing and at first top-dressing",
            improvement: "Restores vegetative growth and leaf colour",
        },
        (Nitrogen, Above) => hint_only("Nitrogen is ample; trim top-dressing"),
        (Nitrogen, Within) => hint_only("Maintain current levels"),
        (Phosphorus, Below) => Remedy {
            hint: "Apply phosphorus fertilizer",
            category: "Fertilizer",
            action: "Apply DAP (Di-ammonium Phosphate) at 50 kg/acre",
            timing: "Before sowing",
            improvement: "15-20% yield increase",
        },
        (Phosphorus, Above) => hint_only("Phosphorus is ample; skip basal DAP"),
        (Phosphorus, Within) => hint_only("Good phosphorus levels"),
        (Potassium, Below) => Remedy {
            hint: "Apply potassium fertilizer",
            category: "Fertilizer",
            action: "Apply MOP (Muriate of Potash) at 40 kg/acre",
            timing: "At sowing",
            improvement: "Better disease resistance and grain quality",
        },
        (Potassium, Above) => hint_only("Avoid over-application of potassium fertilizers"),
        (Potassium, Within) => hint_only("Good potassium levels"),
        (OrganicMatter, Below) => Remedy {
            hint: "Add compost or farmyard manure",
            category: "Organic Matter",
            action: "Add 2-3 tons of well-decomposed farmyard manure per acre",
            timing: "During land preparation",
            improvement: "Improved soil structure and water retention",
        },
        (OrganicMatter, Above) => hint_only("Rich in organic matter; no additions needed"),
        (OrganicMatter, Within) => hint_only("Maintain with compost"),
        (Moisture, Below) => Remedy {
            hint: "Irrigate to restore soil moisture",
            category: "Irrigation",
            action: "Irrigate to bring moisture back to 20-30%",
            timing: "Within the next 2-3 days",
            improvement: "Prevents moisture stress at critical stages",
        },
        (Moisture, Above) => Remedy {
            hint: "Improve drainage and pause irrigation",
            category: "Drainage",
            action: "Open drainage channels and hold irrigation",
            timing: "Immediately",
            improvement: "Avoids waterlogging and root rot",
        },
        (Moisture, Within) => hint_only("Good moisture level"),
        (Temperature, Below) => Remedy {
            hint: "Delay sowing until the soil warms",
            category: "Crop Management",
            action: "Use black plastic mulch or delay sowing",
            timing: "Before sowing",
            improvement: "Faster, more uniform germination",
        },
        (Temperature, Above) => Remedy {
            hint: "Mulch and irrigate in evening hours",
            category: "Crop Management",
            action: "Apply straw mulch and irrigate in evening hours",
            timing: "During hot spells",
            improvement: "Lower root-zone temperature",
        },
        (Temperature, Within) => hint_only("Good soil temperature"),
        (Salinity, Above) => Remedy {
            hint: "Leach salts and apply gypsum",
            category: "Soil Amendment",
            action: "Apply gypsum at 1 t/acre and leach with good-quality water",
            timing: "Before sowing",
            improvement: "Reduced salt stress and better water uptake",
        },
        (Salinity, _) => hint_only("Salinity is within safe limits"),
    }
}

/// Irrigation interval and depth multipliers for a soil texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterProfile {
    pub soil_type: SoilType,
    pub interval_factor: f64,
    pub depth_factor: f64,
}

/// Textures with treatment reference data.
pub const WATER_PROFILES: &[WaterProfile] = &[
    WaterProfile {
        soil_type: SoilType::Loamy,
        interval_factor: 1.0,
        depth_factor: 1.0,
    },
    WaterProfile {
        soil_type: SoilType::Clay,
        interval_factor: 1.3,
        depth_factor: 1.15,
    },
    WaterProfile {
        soil_type: SoilType::Sandy,
        interval_factor: 0.6,
        depth_factor: 0.7,
    },
    WaterProfile {
        soil_type: SoilType::Silty,
        interval_factor: 1.1,
        depth_factor: 1.05,
    },
];

pub fn water_profile(soil_type: SoilType) -> Option<&'static WaterProfile> {
    WATER_PROFILES.iter().find(|p| p.soil_type == soil_type)
}

/// Yield multiplier for a texture the crop does not prefer.
pub fn texture_yield_factor(soil_type: SoilType) -> f64 {
    match soil_type {
        SoilType::Loamy => 1.0,
        SoilType::Silty => 0.97,
        SoilType::Clay => 0.93,
        SoilType::Peaty => 0.90,
        SoilType::Sandy => 0.85,
        SoilType::Chalky => 0.85,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_parameter_has_a_spec() {
        for parameter in SoilParameter::iter() {
            assert_eq!(spec(parameter).parameter, parameter);
        }
    }

    #[test]
    fn test_parameter_table_matches_lookup() {
        let listed: Vec<SoilParameter> = PARAMETERS.iter().map(|s| s.parameter).collect();
        assert_eq!(listed, SoilParameter::iter().collect::<Vec<_>>());
        for s in PARAMETERS {
            assert!(std::ptr::eq(spec(s.parameter), s));
        }
    }

    #[test]
    fn test_ideal_ranges_sit_inside_plausible_bounds() {
        for s in PARAMETERS {
            assert!(s.ideal.min <= s.ideal.max);
            assert!(s.plausible.contains(s.ideal.min));
            assert!(s.plausible.contains(s.ideal.max));
        }
    }

    #[test]
    fn test_below_range_remedies_carry_actions() {
        for s in PARAMETERS {
            if s.favorability == Favorability::LowerIsBetter {
                continue;
            }
            assert!(!remedy(s.parameter, Deviation::Below).action.is_empty());
        }
    }
}
