use crate::error::{AdvisorError, Result};
use crate::models::{CropCandidate, ScenarioProjection, YieldRequest};
use crate::reference::scenarios::{OFF_TEXTURE_CONFIDENCE_PENALTY, SCENARIOS};
use crate::reference::soil::texture_yield_factor;
use crate::reference::candidate;
use crate::utils::round_to;

/// Scenario yields for one crop on one field, in scenario table order.
pub fn predict(request: &YieldRequest) -> Result<Vec<ScenarioProjection>> {
    request.validate()?;

    let crop = candidate(request.crop).ok_or_else(|| {
        AdvisorError::unsupported("crop", request.crop, "no yield reference data")
    })?;

    Ok(project_scenarios(crop, request))
}

fn project_scenarios(crop: &CropCandidate, request: &YieldRequest) -> Vec<ScenarioProjection> {
    let on_texture = crop.prefers_soil(request.soil_type);
    let soil_factor = if on_texture {
        1.0
    } else {
        texture_yield_factor(request.soil_type)
    };
    let penalty = if on_texture {
        0
    } else {
        OFF_TEXTURE_CONFIDENCE_PENALTY
    };

    SCENARIOS
        .iter()
        .map(|row| {
            let yield_t_per_acre = round_to(crop.yield_t_per_acre * row.yield_factor * soil_factor, 2);
            ScenarioProjection {
                scenario: row.kind,
                rainfall: row.rainfall.to_string(),
                fertilizer: row.fertilizer.to_string(),
                yield_t_per_acre,
                total_production_t: round_to(yield_t_per_acre * request.area_acres, 1),
                confidence_pct: row.confidence_pct.saturating_sub(penalty),
                change_vs_prior_pct: request
                    .prior_yield
                    .map(|prior| round_to((yield_t_per_acre - prior) / prior * 100.0, 1)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crop, ScenarioKind, SoilType};

    fn request(crop: Crop, soil_type: SoilType, area_acres: f64) -> YieldRequest {
        YieldRequest {
            crop,
            soil_type,
            area_acres,
            prior_yield: None,
        }
    }

    #[test]
    fn test_wheat_scenarios_on_loam() {
        let projections = predict(&request(Crop::Wheat, SoilType::Loamy, 25.0)).unwrap();
        assert_eq!(projections.len(), 4);

        let optimal = &projections[0];
        assert_eq!(optimal.scenario, ScenarioKind::Optimal);
        assert_eq!(optimal.yield_t_per_acre, 4.2);
        assert_eq!(optimal.total_production_t, 105.0);
        assert_eq!(optimal.confidence_pct, 92);

        let yields: Vec<f64> = projections.iter().map(|p| p.yield_t_per_acre).collect();
        assert_eq!(yields, vec![4.2, 3.8, 2.9, 3.19]);
    }

    #[test]
    fn test_off_texture_lowers_yield_and_confidence() {
        let loam = predict(&request(Crop::Wheat, SoilType::Loamy, 1.0)).unwrap();
        let sand = predict(&request(Crop::Wheat, SoilType::Sandy, 1.0)).unwrap();
        for (l, s) in loam.iter().zip(&sand) {
            assert!(s.yield_t_per_acre < l.yield_t_per_acre);
            assert_eq!(s.confidence_pct + 5, l.confidence_pct);
        }
    }

    #[test]
    fn test_change_against_prior_yield() {
        let mut req = request(Crop::Wheat, SoilType::Loamy, 10.0);
        req.prior_yield = Some(3.5);
        let projections = predict(&req).unwrap();
        assert_eq!(projections[0].change_vs_prior_pct, Some(20.0));
        assert!(projections[2].change_vs_prior_pct.unwrap() < 0.0);
    }

    #[test]
    fn test_rejects_bad_area() {
        let err = predict(&request(Crop::Rice, SoilType::Clay, 0.0)).unwrap_err();
        assert_eq!(err.field(), "area_acres");
    }
}
