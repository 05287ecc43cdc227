use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{AdvisorError, Result};
use crate::models::{DemandLevel, SoilHealth, SoilParameter, StatusBand};

static SETTINGS: OnceLock<Settings> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub suitability: Suitability,
    pub finance: Finance,
    pub soil: Soil,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suitability {
    pub weights: CriterionWeights,
    pub viability_threshold: u8,
    /// Fit retained per ordinal step short of the crop's preference.
    pub degradation_curve: Vec<f64>,
    pub tolerated_season_fit: f64,
    pub off_texture_fit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    pub soil_fit: f64,
    pub seasonal_fit: f64,
    pub market_fit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finance {
    pub demand_multipliers: DemandMultipliers,
    pub quintals_per_tonne: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Soil {
    pub weights: ParameterWeights,
    pub goodness: GoodnessScores,
    pub severity: SeverityFractions,
    pub categories: CategoryCutoffs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterWeights {
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub organic_matter: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub salinity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodnessScores {
    pub good: f64,
    pub high: f64,
    pub moderate: f64,
    pub low: f64,
    pub needs_attention: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityFractions {
    /// Relative distance up to which a deficiency is `Low`.
    pub low: f64,
    /// Relative distance up to which a deficiency is `Medium`.
    pub medium: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCutoffs {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: Server {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            suitability: Suitability {
                weights: CriterionWeights {
                    soil_fit: 40.0,
                    seasonal_fit: 30.0,
                    market_fit: 30.0,
                },
                viability_threshold: 50,
                degradation_curve: vec![1.0, 0.6, 0.25, 0.0],
                tolerated_season_fit: 0.5,
                off_texture_fit: 0.75,
            },
            finance: Finance {
                demand_multipliers: DemandMultipliers {
                    low: 1.0,
                    medium: 1.05,
                    high: 1.1,
                },
                quintals_per_tonne: 10.0,
            },
            soil: Soil {
                weights: ParameterWeights {
                    ph: 2.0,
                    nitrogen: 2.0,
                    phosphorus: 2.0,
                    potassium: 2.0,
                    organic_matter: 1.0,
                    moisture: 1.0,
                    temperature: 0.5,
                    salinity: 1.0,
                },
                goodness: GoodnessScores {
                    good: 100.0,
                    high: 80.0,
                    moderate: 60.0,
                    low: 30.0,
                    needs_attention: 30.0,
                },
                severity: SeverityFractions {
                    low: 0.20,
                    medium: 0.50,
                },
                categories: CategoryCutoffs {
                    excellent: 85.0,
                    good: 70.0,
                    fair: 50.0,
                },
            },
        }
    }
}

impl Settings {
    pub fn load() -> &'static Settings {
        SETTINGS.get_or_init(Self::load_from_files)
    }

    fn load_from_files() -> Settings {
        let default_path = Path::new("settings.default.ron");
        let override_path = Path::new("settings.ron");

        let mut settings = read_ron(default_path).unwrap_or_default();
        if let Some(overrides) = read_ron(override_path) {
            settings = overrides;
        }

        settings
    }

    /// Rejects policies that would push scores outside `[0, 100]`.
    pub fn validate(&self) -> Result<()> {
        let w = &self.suitability.weights;
        let total = w.soil_fit + w.seasonal_fit + w.market_fit;
        if (total - 100.0).abs() > 1e-6 || [w.soil_fit, w.seasonal_fit, w.market_fit]
            .iter()
            .any(|x| *x < 0.0)
        {
            return Err(AdvisorError::validation(
                "suitability.weights",
                format!("criterion weights must be non-negative and sum to 100, got {total}"),
            ));
        }

        if self.suitability.viability_threshold > 100 {
            return Err(AdvisorError::validation(
                "suitability.viability_threshold",
                "threshold must be within 0-100",
            ));
        }

        let curve = &self.suitability.degradation_curve;
        let bounded = curve.iter().all(|f| (0.0..=1.0).contains(f));
        let monotone = curve.windows(2).all(|pair| pair[0] >= pair[1]);
        if curve.is_empty() || !bounded || !monotone {
            return Err(AdvisorError::validation(
                "suitability.degradation_curve",
                "curve must be non-empty, within 0-1 and non-increasing",
            ));
        }

        for (field, fit) in [
            ("suitability.tolerated_season_fit", self.suitability.tolerated_season_fit),
            ("suitability.off_texture_fit", self.suitability.off_texture_fit),
        ] {
            if !(0.0..=1.0).contains(&fit) {
                return Err(AdvisorError::validation(field, "fit must be within 0-1"));
            }
        }

        let sev = &self.soil.severity;
        if !(sev.low > 0.0 && sev.low <= sev.medium) {
            return Err(AdvisorError::validation(
                "soil.severity",
                "severity fractions must be positive and ascending",
            ));
        }

        Ok(())
    }
}

impl Suitability {
    /// Fit after falling `steps` ordinal levels short; past the curve's end it stays at the last entry.
    pub fn degrade(&self, steps: usize) -> f64 {
        self.degradation_curve
            .get(steps)
            .or(self.degradation_curve.last())
            .copied()
            .unwrap_or(0.0)
    }
}

impl DemandMultipliers {
    pub fn for_level(&self, level: DemandLevel) -> f64 {
        match level {
            DemandLevel::Low => self.low,
            DemandLevel::Medium => self.medium,
            DemandLevel::High => self.high,
        }
    }
}

impl ParameterWeights {
    pub fn weight(&self, parameter: SoilParameter) -> f64 {
        match parameter {
            SoilParameter::Ph => self.ph,
            SoilParameter::Nitrogen => self.nitrogen,
            SoilParameter::Phosphorus => self.phosphorus,
            SoilParameter::Potassium => self.potassium,
            SoilParameter::OrganicMatter => self.organic_matter,
            SoilParameter::Moisture => self.moisture,
            SoilParameter::Temperature => self.temperature,
            SoilParameter::Salinity => self.salinity,
        }
    }
}

impl GoodnessScores {
    pub fn score(&self, status: StatusBand) -> f64 {
        match status {
            StatusBand::Good => self.good,
            StatusBand::High => self.high,
            StatusBand::Moderate => self.moderate,
            StatusBand::Low => self.low,
            StatusBand::NeedsAttention => self.needs_attention,
        }
    }
}

impl CategoryCutoffs {
    pub fn category(&self, score: f64) -> SoilHealth {
        if score >= self.excellent {
            SoilHealth::Excellent
        } else if score >= self.good {
            SoilHealth::Good
        } else if score >= self.fair {
            SoilHealth::Fair
        } else {
            SoilHealth::Poor
        }
    }
}

fn read_ron(path: &Path) -> Option<Settings> {
    if !path.exists() {
        return None;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Could not read {}: {}", path.display(), e);
            return None;
        }
    };

    match ron::from_str::<Settings>(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
            None
        }
    }
}

pub fn settings() -> &'static Settings {
    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        let mut s = Settings::default();
        s.suitability.weights.market_fit = 40.0;
        let err = s.validate().unwrap_err();
        assert_eq!(err.field(), "suitability.weights");
    }

    #[test]
    fn test_curve_must_not_increase() {
        let mut s = Settings::default();
        s.suitability.degradation_curve = vec![1.0, 0.2, 0.6];
        assert_eq!(
            s.validate().unwrap_err().field(),
            "suitability.degradation_curve"
        );
    }

    #[test]
    fn test_degrade_saturates() {
        let s = Settings::default().suitability;
        assert_eq!(s.degrade(0), 1.0);
        assert_eq!(s.degrade(1), 0.6);
        assert_eq!(s.degrade(9), 0.0);
    }

    #[test]
    fn test_category_cutoffs() {
        let c = Settings::default().soil.categories;
        assert_eq!(c.category(85.0), SoilHealth::Excellent);
        assert_eq!(c.category(84.9), SoilHealth::Good);
        assert_eq!(c.category(50.0), SoilHealth::Fair);
        assert_eq!(c.category(49.0), SoilHealth::Poor);
    }

    #[test]
    fn test_default_file_matches_defaults() {
        let content = include_str!("../settings.default.ron");
        let parsed: Settings = ron::from_str(content).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
