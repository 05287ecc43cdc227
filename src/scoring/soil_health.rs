use std::cmp::Ordering;
use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::classification::{classify_reading, deviation, relative_distance};
use super::ranking::rank;
use crate::error::Result;
use crate::models::{
    BudgetBand, ClassificationResult, Crop, CropCandidate, Deficiency, DemandLevel, FarmProfile,
    Season, Severity, SoilAction, SoilHealth, SoilHealthReport, SoilSample, StatusBand, SuitableCrop,
};
use crate::reference::{remedy, spec};
use crate::settings::{SeverityFractions, Settings};

pub fn is_deficient(status: StatusBand) -> bool {
    !matches!(status, StatusBand::Good | StatusBand::High)
}

pub fn severity(relative_distance: f64, fractions: &SeverityFractions) -> Severity {
    if relative_distance <= fractions.low {
        Severity::Low
    } else if relative_distance <= fractions.medium {
        Severity::Medium
    } else {
        Severity::High
    }
}

/// Weighted mean goodness of the classified readings, `0..=100`.
pub fn overall_score(classifications: &[ClassificationResult], settings: &Settings) -> u8 {
    let soil = &settings.soil;
    let (weighted, total_weight) = classifications.iter().fold((0.0, 0.0), |(sum, w), c| {
        let weight = soil.weights.weight(c.parameter);
        (sum + weight * soil.goodness.score(c.status), w + weight)
    });

    if total_weight <= 0.0 {
        return 0;
    }
    (weighted / total_weight).round().clamp(0.0, 100.0) as u8
}

pub fn assess(
    sample: &SoilSample,
    candidates: &[CropCandidate],
    settings: &Settings,
) -> Result<SoilHealthReport> {
    sample.validate()?;

    let classifications = sample
        .readings
        .iter()
        .map(|(parameter, value)| classify_reading(*parameter, *value))
        .collect::<Result<Vec<_>>>()?;

    let overall_score = overall_score(&classifications, settings);
    let category = settings.soil.categories.category(overall_score as f64);

    let mut deficiencies = Vec::new();
    let mut recommendations = Vec::new();
    let mut warnings = Vec::new();

    for c in &classifications {
        let side = deviation(c.value, &c.ideal);
        if c.status == StatusBand::High {
            warnings.push(remedy(c.parameter, side).hint.to_string());
            continue;
        }
        if !is_deficient(c.status) {
            continue;
        }

        let severity = severity(relative_distance(c), &settings.soil.severity);
        deficiencies.push(Deficiency {
            parameter: c.parameter,
            status: c.status,
            severity,
            impact: spec(c.parameter).impact.to_string(),
        });

        let fix = remedy(c.parameter, side);
        if !fix.action.is_empty() {
            recommendations.push(SoilAction {
                parameter: c.parameter,
                category: fix.category.to_string(),
                priority: severity.into(),
                action: fix.action.to_string(),
                timing: fix.timing.to_string(),
                expected_improvement: fix.improvement.to_string(),
            });
        }
    }

    let weights = &settings.soil.weights;
    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| {
                weights
                    .weight(b.parameter)
                    .partial_cmp(&weights.weight(a.parameter))
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.parameter.cmp(&b.parameter))
    });

    let suitable_crops = suitable_crops(sample, category, candidates, settings);

    Ok(SoilHealthReport {
        overall_score,
        category,
        soil_type: sample.soil_type,
        classifications,
        deficiencies,
        recommendations,
        warnings,
        suitable_crops,
    })
}

/// Ranks the catalogue against a profile synthesized from the soil report.
fn suitable_crops(
    sample: &SoilSample,
    category: SoilHealth,
    candidates: &[CropCandidate],
    settings: &Settings,
) -> Vec<SuitableCrop> {
    let seasons: Vec<Season> = match sample.season {
        Some(season) => vec![season],
        None => Season::iter().collect(),
    };

    let mut best: BTreeMap<Crop, SuitableCrop> = BTreeMap::new();
    for season in seasons {
        let profile = FarmProfile {
            soil_health: category,
            season,
            budget: BudgetBand::High,
            market_demand: DemandLevel::Medium,
            area_acres: 1.0,
            soil_type: sample.soil_type,
            prior_yield: None,
        };

        for r in rank(&profile, candidates, settings) {
            let entry = best.entry(r.crop).or_insert(SuitableCrop {
                crop: r.crop,
                suitability: r.suitability,
                season,
            });
            if r.suitability > entry.suitability {
                entry.suitability = r.suitability;
                entry.season = season;
            }
        }
    }

    let mut crops: Vec<SuitableCrop> = best.into_values().collect();
    crops.sort_by(|a, b| {
        b.suitability
            .cmp(&a.suitability)
            .then_with(|| a.crop.name().cmp(b.crop.name()))
    });
    crops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, SoilParameter, SoilType};
    use crate::reference::catalog;

    fn sample(readings: &[(SoilParameter, f64)]) -> SoilSample {
        SoilSample {
            soil_type: SoilType::Loamy,
            season: None,
            readings: readings.iter().copied().collect(),
        }
    }

    fn healthy() -> Vec<(SoilParameter, f64)> {
        vec![
            (SoilParameter::Ph, 6.5),
            (SoilParameter::Nitrogen, 50.0),
            (SoilParameter::Phosphorus, 30.0),
            (SoilParameter::Potassium, 200.0),
        ]
    }

    #[test]
    fn test_severity_bands() {
        let f = Settings::default().soil.severity;
        assert_eq!(severity(0.2, &f), Severity::Low);
        assert_eq!(severity(0.35, &f), Severity::Medium);
        assert_eq!(severity(0.51, &f), Severity::High);
    }

    #[test]
    fn test_healthy_sample_is_excellent() {
        let settings = Settings::default();
        let report = assess(&sample(&healthy()), catalog(), &settings).unwrap();
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.category, SoilHealth::Excellent);
        assert!(report.deficiencies.is_empty());
        assert!(report.recommendations.is_empty());
        assert!(!report.suitable_crops.is_empty());
    }

    #[test]
    fn test_deficiencies_and_priorities() {
        let settings = Settings::default();
        let mut readings = healthy();
        readings[0] = (SoilParameter::Ph, 5.0);
        readings[2] = (SoilParameter::Phosphorus, 22.0);
        readings.push((SoilParameter::OrganicMatter, 2.0));

        let report = assess(&sample(&readings), catalog(), &settings).unwrap();
        let params: Vec<_> = report.deficiencies.iter().map(|d| d.parameter).collect();
        assert_eq!(
            params,
            vec![
                SoilParameter::Ph,
                SoilParameter::Phosphorus,
                SoilParameter::OrganicMatter
            ]
        );

        // pH off by a full range width is the most urgent
        assert_eq!(report.deficiencies[0].severity, Severity::High);
        assert_eq!(report.recommendations[0].parameter, SoilParameter::Ph);
        assert_eq!(report.recommendations[0].priority, Priority::High);
        assert_eq!(report.recommendations[1].parameter, SoilParameter::Phosphorus);
        assert!(report.recommendations[1].action.contains("DAP"));
    }

    #[test]
    fn test_surplus_raises_warning_not_deficiency() {
        let settings = Settings::default();
        let mut readings = healthy();
        readings[3] = (SoilParameter::Potassium, 320.0);
        let report = assess(&sample(&readings), catalog(), &settings).unwrap();
        assert!(report.deficiencies.is_empty());
        assert_eq!(
            report.warnings,
            vec!["Avoid over-application of potassium fertilizers".to_string()]
        );
        assert!(report.overall_score < 100);
    }

    #[test]
    fn test_missing_required_reading_is_rejected() {
        let settings = Settings::default();
        let err = assess(&sample(&[]), catalog(), &settings).unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.field(), "ph");

        let mut readings = healthy();
        readings.remove(1);
        let err = assess(&sample(&readings), catalog(), &settings).unwrap_err();
        assert_eq!(err.field(), "nitrogen");
    }

    #[test]
    fn test_invalid_reading_fails_whole_report() {
        let settings = Settings::default();
        let mut readings = healthy();
        readings.push((SoilParameter::Moisture, f64::INFINITY));
        let err = assess(&sample(&readings), catalog(), &settings).unwrap_err();
        assert_eq!(err.field(), "moisture");
    }

    #[test]
    fn test_suitable_crops_respect_named_season() {
        let settings = Settings::default();
        let mut s = sample(&healthy());
        s.season = Some(Season::Kharif);
        let report = assess(&s, catalog(), &settings).unwrap();
        assert!(report.suitable_crops.iter().all(|c| c.season == Season::Kharif));
        assert!(report.suitable_crops.iter().any(|c| c.crop == Crop::Rice));
        for pair in report.suitable_crops.windows(2) {
            assert!(pair[0].suitability >= pair[1].suitability);
        }
    }
}
