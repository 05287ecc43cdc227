use std::cmp::Ordering;

use crate::models::{CriterionScore, Criterion, CropCandidate, FarmProfile};
use crate::settings::Suitability;

#[derive(Debug, Clone, PartialEq)]
pub struct SuitabilityScore {
    /// Rounded sum of criterion contributions, always within `[0, 100]`.
    pub score: u8,
    pub criteria: Vec<CriterionScore>,
    pub reasons: Vec<String>,
}

impl SuitabilityScore {
    pub fn is_viable(&self, threshold: u8) -> bool {
        self.score >= threshold
    }
}

pub fn score(
    profile: &FarmProfile,
    candidate: &CropCandidate,
    policy: &Suitability,
) -> SuitabilityScore {
    let name = candidate.crop.name();
    let mut scored: Vec<(CriterionScore, String)> = Vec::with_capacity(3);

    let health_gap = candidate
        .min_soil_health
        .rank()
        .saturating_sub(profile.soil_health.rank());
    let on_texture = candidate.prefers_soil(profile.soil_type);
    let texture_fit = if on_texture {
        1.0
    } else {
        policy.off_texture_fit
    };
    let soil_fit = policy.degrade(health_gap) * texture_fit;
    let mut soil_reason = if health_gap == 0 {
        format!("{} soil health meets {name} needs", profile.soil_health)
    } else {
        format!(
            "{} soil health is {health_gap} level(s) below the {} {name} prefers",
            profile.soil_health, candidate.min_soil_health
        )
    };
    if !on_texture {
        soil_reason.push_str(&format!(", {} is not a preferred texture", profile.soil_type));
    }
    scored.push(criterion(
        Criterion::SoilFit,
        policy.weights.soil_fit,
        soil_fit,
        soil_reason,
    ));

    let (season_fit, season_reason) = if candidate.preferred_seasons.contains(&profile.season) {
        (1.0, format!("{} is the main season for {name}", profile.season))
    } else if candidate.tolerated_seasons.contains(&profile.season) {
        (
            policy.tolerated_season_fit,
            format!("{name} can also be grown in {}", profile.season),
        )
    } else {
        (0.0, String::new())
    };
    scored.push(criterion(
        Criterion::SeasonalFit,
        policy.weights.seasonal_fit,
        season_fit,
        season_reason,
    ));

    let demand_gap = candidate
        .preferred_demand
        .rank()
        .saturating_sub(profile.market_demand.rank());
    let market_reason = if demand_gap == 0 {
        format!("{} market demand supports {name}", profile.market_demand)
    } else {
        format!(
            "{} market demand is short of the {} demand {name} needs",
            profile.market_demand, candidate.preferred_demand
        )
    };
    scored.push(criterion(
        Criterion::MarketFit,
        policy.weights.market_fit,
        policy.degrade(demand_gap),
        market_reason,
    ));

    let total: f64 = scored.iter().map(|(c, _)| c.contribution).sum();
    let score = total.round().clamp(0.0, 100.0) as u8;

    let mut reasons: Vec<(f64, String)> = scored
        .iter()
        .filter(|(c, _)| c.contribution > 0.0)
        .map(|(c, reason)| (c.contribution, format!("{reason} (+{:.0})", c.contribution)))
        .collect();
    // stable sort keeps criterion order on equal contributions
    reasons.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    SuitabilityScore {
        score,
        criteria: scored.into_iter().map(|(c, _)| c).collect(),
        reasons: reasons.into_iter().map(|(_, r)| r).collect(),
    }
}

fn criterion(
    criterion: Criterion,
    weight: f64,
    fit: f64,
    reason: String,
) -> (CriterionScore, String) {
    let fit = fit.clamp(0.0, 1.0);
    (
        CriterionScore {
            criterion,
            weight,
            fit,
            contribution: weight * fit,
        },
        reason,
    )
}
