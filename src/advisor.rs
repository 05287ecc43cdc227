use std::sync::Arc;

use crate::error::Result;
use crate::forecast;
use crate::models::{
    CropCandidate, FarmProfile, Recommendation, ScenarioProjection, SoilHealthReport, SoilSample,
    TreatmentPlan, TreatmentRequest, YieldRequest,
};
use crate::reference::catalog;
use crate::scoring::{self, Assessment};
use crate::settings::{settings, Settings};
use crate::treatment;

/// Entry point for the four advisory operations.
///
/// Holds an immutable policy snapshot and the crop catalogue; cloning is cheap and
/// clones can serve requests concurrently.
#[derive(Debug, Clone)]
pub struct Advisor {
    settings: Arc<Settings>,
    candidates: Arc<Vec<CropCandidate>>,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(settings().clone())
    }
}

impl Advisor {
    pub fn new(settings: Settings) -> Self {
        Self::with_candidates(settings, catalog().to_vec())
    }

    pub fn with_candidates(settings: Settings, candidates: Vec<CropCandidate>) -> Self {
        Self {
            settings: Arc::new(settings),
            candidates: Arc::new(candidates),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn candidates(&self) -> &[CropCandidate] {
        &self.candidates
    }

    pub fn get_recommendations(&self, profile: &FarmProfile) -> Result<Vec<Recommendation>> {
        profile.validate()?;
        let ranked = scoring::rank(profile, &self.candidates, &self.settings);
        tracing::debug!(
            "recommendations for {} / {} soil: {} of {} candidates viable",
            profile.season,
            profile.soil_health,
            ranked.len(),
            self.candidates.len()
        );
        Ok(ranked)
    }

    /// Every candidate with its viability verdict, for explaining rejections.
    pub fn evaluate_candidates(&self, profile: &FarmProfile) -> Result<Vec<Assessment>> {
        profile.validate()?;
        Ok(scoring::evaluate(profile, &self.candidates, &self.settings))
    }

    pub fn predict_yield(&self, request: &YieldRequest) -> Result<Vec<ScenarioProjection>> {
        let projections = forecast::predict(request)?;
        tracing::debug!(
            "yield scenarios for {} on {} acres of {}",
            request.crop,
            request.area_acres,
            request.soil_type
        );
        Ok(projections)
    }

    pub fn optimize_treatment(&self, request: &TreatmentRequest) -> Result<TreatmentPlan> {
        treatment::plan(request)
    }

    pub fn assess_soil(&self, sample: &SoilSample) -> Result<SoilHealthReport> {
        let report = scoring::assess(sample, &self.candidates, &self.settings)?;
        tracing::debug!(
            "soil assessment: score {} ({}), {} deficiencies",
            report.overall_score,
            report.category,
            report.deficiencies.len()
        );
        Ok(report)
    }
}
