use serde::Serialize;

use crate::models::{CropCandidate, FarmProfile};
use crate::settings::Finance;
use crate::utils::{round_to, rupees};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialProjection {
    pub investment: i64,
    pub revenue: i64,
    pub profit: i64,
    pub margin_pct: i64,
    /// Set when revenue was not positive and the margin was reported as zero.
    pub margin_substituted: bool,
    pub expected_production_t: f64,
}

impl FinancialProjection {
    pub fn from_totals(investment: i64, revenue: i64) -> Self {
        let profit = revenue - investment;
        let (margin_pct, margin_substituted) = if revenue > 0 {
            ((profit as f64 / revenue as f64 * 100.0).round() as i64, false)
        } else {
            (0, true)
        };

        Self {
            investment,
            revenue,
            profit,
            margin_pct,
            margin_substituted,
            expected_production_t: 0.0,
        }
    }
}

pub fn project(
    profile: &FarmProfile,
    candidate: &CropCandidate,
    policy: &Finance,
) -> FinancialProjection {
    let area = profile.area_acres;
    let production_t = candidate.yield_t_per_acre * area;
    let price = candidate.market_price_per_quintal
        * policy.demand_multipliers.for_level(profile.market_demand);

    let investment = rupees(candidate.cost_per_acre * area);
    let revenue = rupees(production_t * policy.quintals_per_tonne * price);

    FinancialProjection {
        expected_production_t: round_to(production_t, 2),
        ..FinancialProjection::from_totals(investment, revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetBand, Crop, DemandLevel, Season, SoilHealth, SoilType};
    use crate::reference::candidate;
    use crate::settings::Settings;

    fn profile(area_acres: f64, market_demand: DemandLevel) -> FarmProfile {
        FarmProfile {
            soil_health: SoilHealth::Good,
            season: Season::Rabi,
            budget: BudgetBand::Medium,
            market_demand,
            area_acres,
            soil_type: SoilType::Loamy,
            prior_yield: None,
        }
    }

    #[test]
    fn test_margin_from_totals() {
        let p = FinancialProjection::from_totals(45_000, 85_000);
        assert_eq!(p.profit, 40_000);
        assert_eq!(p.margin_pct, 47);
        assert!(!p.margin_substituted);
    }

    #[test]
    fn test_zero_revenue_is_flagged() {
        let p = FinancialProjection::from_totals(10_000, 0);
        assert_eq!(p.profit, -10_000);
        assert_eq!(p.margin_pct, 0);
        assert!(p.margin_substituted);
    }

    #[test]
    fn test_losses_give_negative_margin() {
        let p = FinancialProjection::from_totals(90_000, 60_000);
        assert_eq!(p.margin_pct, -50);
    }

    #[test]
    fn test_project_scales_with_area() {
        let finance = Settings::default().finance;
        let wheat = candidate(Crop::Wheat).unwrap();

        let p = project(&profile(25.0, DemandLevel::Low), wheat, &finance);
        assert_eq!(p.investment, 1_125_000);
        // 4.2 t * 10 q/t * 2500 * 25 acres
        assert_eq!(p.revenue, 2_625_000);
        assert_eq!(p.expected_production_t, 105.0);

        let high = project(&profile(25.0, DemandLevel::High), wheat, &finance);
        assert!(high.revenue > p.revenue);
        assert_eq!(high.investment, p.investment);
    }
}
