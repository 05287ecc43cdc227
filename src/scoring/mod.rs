pub mod classification;
pub mod financial;
pub mod ranking;
pub mod soil_health;
pub mod suitability;

pub use classification::{classify, classify_reading, relative_distance, MODERATE_TOLERANCE};
pub use financial::{project, FinancialProjection};
pub use ranking::{apply_filters, evaluate, rank, Assessment, Filter, FilterResult};
pub use soil_health::{assess, overall_score};
pub use suitability::{score, SuitabilityScore};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BudgetBand, Crop, DemandLevel, FarmProfile, Season, SoilHealth, SoilParameter, SoilType,
        StatusBand,
    };
    use crate::reference::{candidate, catalog};
    use crate::settings::Settings;

    #[test]
    fn test_ph_scenarios() {
        let good = classify_reading(SoilParameter::Ph, 6.8).unwrap();
        assert_eq!(good.status, StatusBand::Good);

        let acidic = classify_reading(SoilParameter::Ph, 5.5).unwrap();
        assert_eq!(acidic.status, StatusBand::NeedsAttention);
        assert!(acidic.recommendation.contains("lime"));
    }

    #[test]
    fn test_rejected_candidates_stay_visible() {
        let settings = Settings::default();
        let profile = FarmProfile {
            soil_health: SoilHealth::Fair,
            season: Season::Kharif,
            budget: BudgetBand::Low,
            market_demand: DemandLevel::Low,
            area_acres: 2.0,
            soil_type: SoilType::Sandy,
            prior_yield: None,
        };

        let all = evaluate(&profile, catalog(), &settings);
        let ranked = rank(&profile, catalog(), &settings);
        let rejected = all
            .iter()
            .filter(|a| matches!(a.filter, FilterResult::Reject(_)))
            .count();
        assert_eq!(ranked.len() + rejected, all.len());
    }

    #[test]
    fn test_suitability_feeds_ranking() {
        let settings = Settings::default();
        let profile = FarmProfile {
            soil_health: SoilHealth::Good,
            season: Season::Rabi,
            budget: BudgetBand::Medium,
            market_demand: DemandLevel::Medium,
            area_acres: 1.0,
            soil_type: SoilType::Loamy,
            prior_yield: None,
        };
        let wheat = candidate(Crop::Wheat).unwrap();
        let direct = score(&profile, wheat, &settings.suitability);
        let ranked = rank(&profile, catalog(), &settings);
        let listed = ranked.iter().find(|r| r.crop == Crop::Wheat).unwrap();
        assert_eq!(listed.suitability, direct.score);
        assert_eq!(listed.reasons, direct.reasons);
    }
}
