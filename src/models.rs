use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{AdvisorError, Result};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SoilHealth {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SoilHealth {
    pub fn rank(self) -> usize {
        self as usize
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[strum(to_string = "Kharif (Summer)", serialize = "kharif", serialize = "summer")]
    Kharif,
    #[strum(to_string = "Rabi (Winter)", serialize = "rabi", serialize = "winter")]
    Rabi,
    #[strum(to_string = "Zaid (Spring)", serialize = "zaid", serialize = "spring")]
    Zaid,
}

/// Investment budget per acre.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBand {
    #[strum(to_string = "Low (< ₹50,000/acre)", serialize = "low")]
    Low,
    #[strum(to_string = "Medium (₹50,000-₹1,00,000/acre)", serialize = "medium")]
    Medium,
    #[strum(to_string = "High (> ₹1,00,000/acre)", serialize = "high")]
    High,
}

impl BudgetBand {
    /// Per-acre spend covered by the band; `None` means no upper bound.
    pub fn per_acre_range(self) -> (f64, Option<f64>) {
        match self {
            Self::Low => (0.0, Some(50_000.0)),
            Self::Medium => (50_000.0, Some(100_000.0)),
            Self::High => (100_000.0, None),
        }
    }

    pub fn covers(self, cost_per_acre: f64) -> bool {
        match self.per_acre_range().1 {
            Some(max) => cost_per_acre <= max,
            None => true,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

impl DemandLevel {
    pub fn rank(self) -> usize {
        self as usize
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Loamy,
    Clay,
    Sandy,
    Silty,
    Peaty,
    Chalky,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Crop {
    Wheat,
    Rice,
    Maize,
    Barley,
    Mustard,
    Cotton,
    Sugarcane,
    Potato,
    Tomato,
    Onion,
    Soybean,
}

impl Crop {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    #[strum(
        to_string = "Fruit Development",
        serialize = "fruit_development",
        serialize = "fruit-development"
    )]
    FruitDevelopment,
    Maturity,
}

/// Measured soil parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SoilParameter {
    #[strum(to_string = "pH", serialize = "ph")]
    Ph,
    #[strum(serialize = "n", serialize = "nitrogen", to_string = "Nitrogen")]
    Nitrogen,
    #[strum(serialize = "p", serialize = "phosphorus", to_string = "Phosphorus")]
    Phosphorus,
    #[strum(serialize = "k", serialize = "potassium", to_string = "Potassium")]
    Potassium,
    #[strum(
        to_string = "Organic Matter",
        serialize = "organic_matter",
        serialize = "om"
    )]
    OrganicMatter,
    Moisture,
    Temperature,
    Salinity,
}

impl SoilParameter {
    /// Stable snake_case key, matching the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Self::Ph => "ph",
            Self::Nitrogen => "nitrogen",
            Self::Phosphorus => "phosphorus",
            Self::Potassium => "potassium",
            Self::OrganicMatter => "organic_matter",
            Self::Moisture => "moisture",
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
        }
    }

    /// Parameters every soil sample has to carry.
    pub fn required() -> [SoilParameter; 4] {
        [Self::Ph, Self::Nitrogen, Self::Phosphorus, Self::Potassium]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBand {
    Low,
    #[strum(to_string = "Medium")]
    Moderate,
    Good,
    High,
    #[strum(to_string = "Needs Attention")]
    NeedsAttention,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Low => Priority::Low,
            Severity::Medium => Priority::Medium,
            Severity::High => Priority::High,
        }
    }
}

/// Closed interval `[min, max]`; both boundaries count as inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub min: u16,
    pub max: u16,
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} days", self.min, self.max)
    }
}

/// Farm-level inputs driving recommendation scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
    pub soil_health: SoilHealth,
    pub season: Season,
    pub budget: BudgetBand,
    pub market_demand: DemandLevel,
    pub area_acres: f64,
    pub soil_type: SoilType,
    pub prior_yield: Option<f64>,
}

impl FarmProfile {
    pub fn validate(&self) -> Result<()> {
        positive("area_acres", self.area_acres)?;
        if let Some(prior) = self.prior_yield {
            positive("prior_yield", prior)?;
        }
        Ok(())
    }
}

/// Farm profile as received from a caller; every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FarmProfileInput {
    pub soil_health: Option<SoilHealth>,
    pub season: Option<Season>,
    pub budget: Option<BudgetBand>,
    pub market_demand: Option<DemandLevel>,
    pub area_acres: Option<f64>,
    pub soil_type: Option<SoilType>,
    pub prior_yield: Option<f64>,
}

impl TryFrom<FarmProfileInput> for FarmProfile {
    type Error = AdvisorError;

    fn try_from(input: FarmProfileInput) -> Result<Self> {
        let profile = FarmProfile {
            soil_health: required("soil_health", input.soil_health)?,
            season: required("season", input.season)?,
            budget: required("budget", input.budget)?,
            market_demand: required("market_demand", input.market_demand)?,
            area_acres: required("area_acres", input.area_acres)?,
            soil_type: required("soil_type", input.soil_type)?,
            prior_yield: input.prior_yield,
        };
        profile.validate()?;
        Ok(profile)
    }
}

/// Reference economics and preferred conditions of one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCandidate {
    pub crop: Crop,
    pub preferred_seasons: Vec<Season>,
    pub tolerated_seasons: Vec<Season>,
    pub min_soil_health: SoilHealth,
    pub preferred_soils: Vec<SoilType>,
    pub preferred_demand: DemandLevel,
    pub cost_per_acre: f64,
    /// Yield under optimal conditions, tonnes per acre.
    pub yield_t_per_acre: f64,
    pub market_price_per_quintal: f64,
    pub growing_period: DayRange,
    pub risk: RiskLevel,
    pub tips: Vec<String>,
}

impl CropCandidate {
    pub fn prefers_soil(&self, soil_type: SoilType) -> bool {
        self.preferred_soils.contains(&soil_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    #[strum(serialize = "soil-fit")]
    SoilFit,
    #[strum(serialize = "seasonal-fit")]
    SeasonalFit,
    #[strum(serialize = "market-fit")]
    MarketFit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: Criterion,
    pub weight: f64,
    /// Degree of match in `[0, 1]`.
    pub fit: f64,
    pub contribution: f64,
}

/// One ranked crop suggestion. Built per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub crop: Crop,
    pub suitability: u8,
    pub risk: RiskLevel,
    pub investment: i64,
    pub revenue: i64,
    pub profit: i64,
    pub margin_pct: i64,
    pub margin_substituted: bool,
    pub growing_period: DayRange,
    pub market_price_per_quintal: f64,
    pub expected_production_t: f64,
    pub within_budget: bool,
    pub criteria: Vec<CriterionScore>,
    pub reasons: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub parameter: SoilParameter,
    pub value: f64,
    pub unit: String,
    pub status: StatusBand,
    pub ideal: IdealRange,
    /// Distance outside the ideal range, zero when inside.
    pub distance: f64,
    pub recommendation: String,
}

/// Soil measurements for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub soil_type: SoilType,
    pub season: Option<Season>,
    pub readings: BTreeMap<SoilParameter, f64>,
}

impl SoilSample {
    /// Every required parameter has to be present before anything is scored.
    pub fn validate(&self) -> Result<()> {
        for parameter in SoilParameter::required() {
            if !self.readings.contains_key(&parameter) {
                return Err(AdvisorError::missing(parameter.key()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilSampleInput {
    pub soil_type: Option<SoilType>,
    pub season: Option<Season>,
    #[serde(default)]
    pub readings: BTreeMap<SoilParameter, f64>,
}

impl TryFrom<SoilSampleInput> for SoilSample {
    type Error = AdvisorError;

    fn try_from(input: SoilSampleInput) -> Result<Self> {
        let sample = SoilSample {
            soil_type: required("soil_type", input.soil_type)?,
            season: input.season,
            readings: input.readings,
        };
        sample.validate()?;
        Ok(sample)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deficiency {
    pub parameter: SoilParameter,
    pub status: StatusBand,
    pub severity: Severity,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilAction {
    pub parameter: SoilParameter,
    pub category: String,
    pub priority: Priority,
    pub action: String,
    pub timing: String,
    pub expected_improvement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitableCrop {
    pub crop: Crop,
    pub suitability: u8,
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilHealthReport {
    pub overall_score: u8,
    pub category: SoilHealth,
    pub soil_type: SoilType,
    pub classifications: Vec<ClassificationResult>,
    pub deficiencies: Vec<Deficiency>,
    pub recommendations: Vec<SoilAction>,
    pub warnings: Vec<String>,
    pub suitable_crops: Vec<SuitableCrop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldRequest {
    pub crop: Crop,
    pub soil_type: SoilType,
    pub area_acres: f64,
    pub prior_yield: Option<f64>,
}

impl YieldRequest {
    pub fn validate(&self) -> Result<()> {
        positive("area_acres", self.area_acres)?;
        if let Some(prior) = self.prior_yield {
            positive("prior_yield", prior)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YieldRequestInput {
    pub crop: Option<Crop>,
    pub soil_type: Option<SoilType>,
    pub area_acres: Option<f64>,
    pub prior_yield: Option<f64>,
}

impl TryFrom<YieldRequestInput> for YieldRequest {
    type Error = AdvisorError;

    fn try_from(input: YieldRequestInput) -> Result<Self> {
        let request = YieldRequest {
            crop: required("crop", input.crop)?,
            soil_type: required("soil_type", input.soil_type)?,
            area_acres: required("area_acres", input.area_acres)?,
            prior_yield: input.prior_yield,
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    #[strum(to_string = "Optimal Conditions")]
    Optimal,
    #[strum(to_string = "Average Conditions")]
    Average,
    #[strum(to_string = "Drought Scenario")]
    Drought,
    #[strum(to_string = "Excess Rain")]
    ExcessRain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: ScenarioKind,
    pub rainfall: String,
    pub fertilizer: String,
    pub yield_t_per_acre: f64,
    pub total_production_t: f64,
    pub confidence_pct: u8,
    pub change_vs_prior_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRequest {
    pub crop: Crop,
    pub field_size_acres: f64,
    pub soil_type: SoilType,
    pub growth_stage: GrowthStage,
    /// Calendar date of plan week 1; dates the action schedule when present.
    pub start_date: Option<NaiveDate>,
}

impl TreatmentRequest {
    pub fn validate(&self) -> Result<()> {
        positive("field_size_acres", self.field_size_acres)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreatmentRequestInput {
    pub crop: Option<Crop>,
    pub field_size_acres: Option<f64>,
    pub soil_type: Option<SoilType>,
    pub growth_stage: Option<GrowthStage>,
    pub start_date: Option<NaiveDate>,
}

impl TryFrom<TreatmentRequestInput> for TreatmentRequest {
    type Error = AdvisorError;

    fn try_from(input: TreatmentRequestInput) -> Result<Self> {
        let request = TreatmentRequest {
            crop: required("crop", input.crop)?,
            field_size_acres: required("field_size_acres", input.field_size_acres)?,
            soil_type: required("soil_type", input.soil_type)?,
            growth_stage: required("growth_stage", input.growth_stage)?,
            start_date: input.start_date,
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    #[strum(to_string = "Nitrogen")]
    Nitrogen,
    #[strum(to_string = "Phosphorus")]
    Phosphorus,
    #[strum(to_string = "Potassium")]
    Potassium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSplit {
    pub stage: GrowthStage,
    pub week: u32,
    pub kg_per_acre: f64,
    pub total_kg: f64,
    pub critical: bool,
    pub catch_up: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerDose {
    pub nutrient: Nutrient,
    pub product: String,
    pub kg_per_acre: f64,
    pub total_kg: f64,
    pub cost: i64,
    pub timing: String,
    pub benefit: String,
    pub splits: Vec<ApplicationSplit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationEvent {
    pub stage: GrowthStage,
    pub label: String,
    pub week: u32,
    pub interval_days: u32,
    pub depth_mm: f64,
    pub duration_days: u32,
    pub applications: u32,
    pub volume_m3_per_application: f64,
    pub critical: bool,
    pub catch_up: bool,
}

impl IrrigationEvent {
    pub fn frequency(&self) -> String {
        if self.catch_up {
            "Single recovery irrigation".to_string()
        } else {
            format!("Every {} days", self.interval_days)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub starts_on: Option<NaiveDate>,
    pub tasks: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub crop: Crop,
    pub field_size_acres: f64,
    pub soil_type: SoilType,
    pub growth_stage: GrowthStage,
    pub fertilizer: Vec<FertilizerDose>,
    pub irrigation: Vec<IrrigationEvent>,
    pub schedule: Vec<WeekPlan>,
    pub total_fertilizer_cost: i64,
    pub total_water_mm: f64,
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| AdvisorError::missing(field))
}

fn positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AdvisorError::validation(
            field,
            format!("expected a positive number, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn full_input() -> FarmProfileInput {
        FarmProfileInput {
            soil_health: Some(SoilHealth::Good),
            season: Some(Season::Rabi),
            budget: Some(BudgetBand::Medium),
            market_demand: Some(DemandLevel::High),
            area_acres: Some(5.0),
            soil_type: Some(SoilType::Loamy),
            prior_yield: None,
        }
    }

    #[test]
    fn test_profile_requires_every_field() {
        assert!(FarmProfile::try_from(full_input()).is_ok());

        let input = FarmProfileInput {
            season: None,
            ..full_input()
        };
        let err = FarmProfile::try_from(input).unwrap_err();
        assert_eq!(err.field(), "season");
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_profile_rejects_non_positive_area() {
        for area in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let input = FarmProfileInput {
                area_acres: Some(area),
                ..full_input()
            };
            let err = FarmProfile::try_from(input).unwrap_err();
            assert_eq!(err.field(), "area_acres");
        }
    }

    #[test]
    fn test_soil_sample_requires_npk_and_ph() {
        let mut readings = BTreeMap::new();
        readings.insert(SoilParameter::Ph, 6.5);
        readings.insert(SoilParameter::Nitrogen, 50.0);
        readings.insert(SoilParameter::Phosphorus, 30.0);
        let input = SoilSampleInput {
            soil_type: Some(SoilType::Loamy),
            season: None,
            readings,
        };
        let err = SoilSample::try_from(input).unwrap_err();
        assert_eq!(err.field(), "potassium");
    }

    #[test]
    fn test_enum_parsing_is_lenient() {
        assert_eq!(Season::from_str("rabi").unwrap(), Season::Rabi);
        assert_eq!(Season::from_str("Winter").unwrap(), Season::Rabi);
        assert_eq!(Season::Kharif.to_string(), "Kharif (Summer)");
        assert_eq!(SoilParameter::from_str("pH").unwrap(), SoilParameter::Ph);
        assert_eq!(SoilParameter::from_str("om").unwrap(), SoilParameter::OrganicMatter);
        assert_eq!(
            GrowthStage::from_str("fruit-development").unwrap(),
            GrowthStage::FruitDevelopment
        );
        assert_eq!(StatusBand::Moderate.to_string(), "Medium");
    }

    #[test]
    fn test_ideal_range_is_inclusive() {
        let range = IdealRange::new(6.0, 7.0);
        assert!(range.contains(6.0));
        assert!(range.contains(7.0));
        assert!(!range.contains(5.99));
    }

    #[test]
    fn test_budget_band_cover() {
        assert!(BudgetBand::Low.covers(50_000.0));
        assert!(!BudgetBand::Low.covers(50_001.0));
        assert!(BudgetBand::High.covers(1_000_000.0));
    }
}
