use crate::error::{AdvisorError, Result};
use crate::models::{ClassificationResult, IdealRange, SoilParameter, StatusBand};
use crate::reference::{remedy, spec, Deviation, Favorability, SeverityBasis};

/// Share of the violated boundary a one-sided parameter may miss by and still read `Moderate`.
pub const MODERATE_TOLERANCE: f64 = 0.20;

pub fn deviation(value: f64, ideal: &IdealRange) -> Deviation {
    if value < ideal.min {
        Deviation::Below
    } else if value > ideal.max {
        Deviation::Above
    } else {
        Deviation::Within
    }
}

fn distance(value: f64, ideal: &IdealRange) -> f64 {
    match deviation(value, ideal) {
        Deviation::Below => ideal.min - value,
        Deviation::Above => value - ideal.max,
        Deviation::Within => 0.0,
    }
}

/// Scale a boundary-relative measure against; falls back to the range width at zero.
fn boundary_scale(boundary: f64, ideal: &IdealRange) -> f64 {
    if boundary.abs() > f64::EPSILON {
        boundary.abs()
    } else {
        ideal.width()
    }
}

pub fn classify(
    parameter: SoilParameter,
    value: f64,
    ideal: IdealRange,
) -> Result<ClassificationResult> {
    let reference = spec(parameter);

    if !value.is_finite() {
        return Err(AdvisorError::invalid_measurement(
            parameter,
            format!("{value} is not a finite number"),
        ));
    }
    if !reference.plausible.contains(value) {
        return Err(AdvisorError::invalid_measurement(
            parameter,
            format!(
                "{value} is outside the physical range {}-{}; check the unit ({})",
                reference.plausible.min,
                reference.plausible.max,
                if reference.unit.is_empty() { "none" } else { reference.unit },
            ),
        ));
    }

    let side = deviation(value, &ideal);
    let status = match (reference.favorability, side) {
        (_, Deviation::Within) => StatusBand::Good,
        (Favorability::Symmetric, _) => StatusBand::NeedsAttention,
        (Favorability::HigherIsBetter, Deviation::Above) => StatusBand::High,
        (Favorability::HigherIsBetter, Deviation::Below) => {
            let floor = ideal.min - MODERATE_TOLERANCE * boundary_scale(ideal.min, &ideal);
            if value >= floor {
                StatusBand::Moderate
            } else {
                StatusBand::Low
            }
        }
        (Favorability::LowerIsBetter, Deviation::Below) => StatusBand::Good,
        (Favorability::LowerIsBetter, Deviation::Above) => {
            let ceiling = ideal.max + MODERATE_TOLERANCE * boundary_scale(ideal.max, &ideal);
            if value <= ceiling {
                StatusBand::Moderate
            } else {
                StatusBand::NeedsAttention
            }
        }
    };

    Ok(ClassificationResult {
        parameter,
        value,
        unit: reference.unit.to_string(),
        status,
        ideal,
        distance: distance(value, &ideal),
        recommendation: remedy(parameter, side).hint.to_string(),
    })
}

/// Classifies against the parameter's reference ideal range.
pub fn classify_reading(parameter: SoilParameter, value: f64) -> Result<ClassificationResult> {
    classify(parameter, value, spec(parameter).ideal)
}

/// Distance outside the range relative to the parameter's severity basis.
pub fn relative_distance(result: &ClassificationResult) -> f64 {
    if result.distance == 0.0 {
        return 0.0;
    }

    let basis = match spec(result.parameter).severity_basis {
        SeverityBasis::Width => result.ideal.width(),
        SeverityBasis::Boundary => {
            let boundary = match deviation(result.value, &result.ideal) {
                Deviation::Above => result.ideal.max,
                _ => result.ideal.min,
            };
            boundary_scale(boundary, &result.ideal)
        }
    };

    if basis > 0.0 {
        result.distance / basis
    } else {
        f64::INFINITY
    }
}
