use strum::Display;

use super::financial::{project, FinancialProjection};
use super::suitability::{score, SuitabilityScore};
use crate::models::{CropCandidate, FarmProfile, Recommendation};
use crate::settings::Settings;
use crate::utils::format_rupees;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterResult {
    Pass,
    Reject(Filter),
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Filter {
    #[strum(serialize = "below-viability")]
    BelowViability { score: u8, threshold: u8 },
}

pub fn apply_filters(suitability: &SuitabilityScore, threshold: u8) -> FilterResult {
    if !suitability.is_viable(threshold) {
        return FilterResult::Reject(Filter::BelowViability {
            score: suitability.score,
            threshold,
        });
    }

    FilterResult::Pass
}

/// A scored candidate together with the viability verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub recommendation: Recommendation,
    pub filter: FilterResult,
}

pub fn assess(profile: &FarmProfile, candidate: &CropCandidate, settings: &Settings) -> Assessment {
    let suitability = score(profile, candidate, &settings.suitability);
    let finance = project(profile, candidate, &settings.finance);
    let filter = apply_filters(&suitability, settings.suitability.viability_threshold);

    Assessment {
        recommendation: build_recommendation(profile, candidate, suitability, finance),
        filter,
    }
}

fn build_recommendation(
    profile: &FarmProfile,
    candidate: &CropCandidate,
    suitability: SuitabilityScore,
    finance: FinancialProjection,
) -> Recommendation {
    let within_budget = profile.budget.covers(candidate.cost_per_acre);
    let mut tips = candidate.tips.clone();
    if !within_budget {
        tips.push(format!(
            "Needs about {}/acre, above your budget band; consider a smaller area or crop credit",
            format_rupees(candidate.cost_per_acre.round() as i64)
        ));
    }

    Recommendation {
        crop: candidate.crop,
        suitability: suitability.score,
        risk: candidate.risk,
        investment: finance.investment,
        revenue: finance.revenue,
        profit: finance.profit,
        margin_pct: finance.margin_pct,
        margin_substituted: finance.margin_substituted,
        growing_period: candidate.growing_period,
        market_price_per_quintal: candidate.market_price_per_quintal,
        expected_production_t: finance.expected_production_t,
        within_budget,
        criteria: suitability.criteria,
        reasons: suitability.reasons,
        tips,
    }
}

/// Every candidate scored, in catalogue order, including the rejected ones.
pub fn evaluate(
    profile: &FarmProfile,
    candidates: &[CropCandidate],
    settings: &Settings,
) -> Vec<Assessment> {
    candidates
        .iter()
        .map(|c| assess(profile, c, settings))
        .collect()
}

pub fn rank(
    profile: &FarmProfile,
    candidates: &[CropCandidate],
    settings: &Settings,
) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = evaluate(profile, candidates, settings)
        .into_iter()
        .filter(|a| a.filter == FilterResult::Pass)
        .map(|a| a.recommendation)
        .collect();
    sort_recommendations(&mut ranked);
    ranked
}

/// Suitability descending, then margin descending, then crop name ascending.
pub fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.suitability
            .cmp(&a.suitability)
            .then_with(|| b.margin_pct.cmp(&a.margin_pct))
            .then_with(|| a.crop.name().cmp(b.crop.name()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetBand, Crop, DemandLevel, Season, SoilHealth, SoilType};
    use crate::reference::catalog;

    fn profile() -> FarmProfile {
        FarmProfile {
            soil_health: SoilHealth::Good,
            season: Season::Rabi,
            budget: BudgetBand::Medium,
            market_demand: DemandLevel::Medium,
            area_acres: 1.0,
            soil_type: SoilType::Loamy,
            prior_yield: None,
        }
    }

    #[test]
    fn test_filter_below_viability() {
        let weak = SuitabilityScore {
            score: 49,
            criteria: Vec::new(),
            reasons: Vec::new(),
        };
        let result = apply_filters(&weak, 50);
        assert_eq!(
            result,
            FilterResult::Reject(Filter::BelowViability {
                score: 49,
                threshold: 50
            })
        );
        assert_eq!(Filter::BelowViability { score: 0, threshold: 0 }.to_string(), "below-viability");

        let at = SuitabilityScore { score: 50, ..weak };
        assert_eq!(apply_filters(&at, 50), FilterResult::Pass);
    }

    #[test]
    fn test_rank_order() {
        let settings = Settings::default();
        let ranked = rank(&profile(), catalog(), &settings);
        assert!(!ranked.is_empty());
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.suitability > b.suitability
                    || (a.suitability == b.suitability && a.margin_pct > b.margin_pct)
                    || (a.suitability == b.suitability
                        && a.margin_pct == b.margin_pct
                        && a.crop.name() <= b.crop.name())
            );
        }
        assert!(ranked.iter().all(|r| r.suitability >= 50));
    }

    #[test]
    fn test_empty_candidates_give_empty_list() {
        let settings = Settings::default();
        assert!(rank(&profile(), &[], &settings).is_empty());
    }

    #[test]
    fn test_unreachable_threshold_gives_empty_list() {
        let mut settings = Settings::default();
        settings.suitability.viability_threshold = 100;
        let poor = FarmProfile {
            soil_health: SoilHealth::Poor,
            soil_type: SoilType::Peaty,
            ..profile()
        };
        assert!(rank(&poor, catalog(), &settings).is_empty());
        assert_eq!(evaluate(&poor, catalog(), &settings).len(), catalog().len());
    }

    #[test]
    fn test_over_budget_is_flagged_not_penalised() {
        let settings = Settings::default();
        let low_budget = FarmProfile {
            budget: BudgetBand::Low,
            season: Season::Kharif,
            ..profile()
        };
        let ranked = rank(&low_budget, catalog(), &settings);
        let rice = ranked.iter().find(|r| r.crop == Crop::Rice).unwrap();
        assert!(!rice.within_budget);
        assert!(rice.tips.iter().any(|t| t.contains("₹55,000")));
        assert_eq!(rice.suitability, 100);

        let maize = ranked.iter().find(|r| r.crop == Crop::Maize).unwrap();
        assert!(maize.within_budget);
    }

    fn listed(crop: Crop, suitability: u8, margin_pct: i64) -> Recommendation {
        let candidate = crate::reference::candidate(crop).unwrap();
        Recommendation {
            crop,
            suitability,
            risk: candidate.risk,
            investment: 0,
            revenue: 0,
            profit: 0,
            margin_pct,
            margin_substituted: false,
            growing_period: candidate.growing_period,
            market_price_per_quintal: candidate.market_price_per_quintal,
            expected_production_t: 0.0,
            within_budget: true,
            criteria: Vec::new(),
            reasons: Vec::new(),
            tips: Vec::new(),
        }
    }

    #[test]
    fn test_full_ties_fall_back_to_crop_name() {
        let mut recommendations = vec![
            listed(Crop::Wheat, 80, 40),
            listed(Crop::Soybean, 80, 40),
            listed(Crop::Barley, 80, 40),
            listed(Crop::Rice, 80, 45),
            listed(Crop::Onion, 90, 10),
        ];
        sort_recommendations(&mut recommendations);
        let order: Vec<Crop> = recommendations.iter().map(|r| r.crop).collect();
        assert_eq!(
            order,
            vec![Crop::Onion, Crop::Rice, Crop::Barley, Crop::Soybean, Crop::Wheat]
        );
    }
}
