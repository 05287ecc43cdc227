use std::sync::LazyLock;

use crate::models::{
    Crop, CropCandidate, DayRange, DemandLevel, RiskLevel, Season, SoilHealth, SoilType,
};

use DemandLevel as D;
use Season::{Kharif, Rabi, Zaid};
use SoilType::{Chalky, Clay, Loamy, Sandy, Silty};

struct CropRow {
    crop: Crop,
    preferred: &'static [Season],
    tolerated: &'static [Season],
    min_health: SoilHealth,
    soils: &'static [SoilType],
    demand: DemandLevel,
    cost_per_acre: f64,
    yield_t_per_acre: f64,
    price_per_quintal: f64,
    days: (u16, u16),
    risk: RiskLevel,
    tips: &'static [&'static str],
}

const CROP_ROWS: &[CropRow] = &[
    CropRow {
        crop: Crop::Wheat,
        preferred: &[Rabi],
        tolerated: &[Zaid],
        min_health: SoilHealth::Good,
        soils: &[Loamy, Clay, Silty],
        demand: D::Medium,
        cost_per_acre: 45_000.0,
        yield_t_per_acre: 4.2,
        price_per_quintal: 2_500.0,
        days: (120, 150),
        risk: RiskLevel::Low,
        tips: &[
            "Use certified seeds for better yield",
            "Apply fertilizer in 3 split doses",
            "Monitor for rust diseases during flowering",
        ],
    },
    CropRow {
        crop: Crop::Rice,
        preferred: &[Kharif],
        tolerated: &[Zaid],
        min_health: SoilHealth::Fair,
        soils: &[Clay, Silty, Loamy],
        demand: D::Medium,
        cost_per_acre: 55_000.0,
        yield_t_per_acre: 3.2,
        price_per_quintal: 2_200.0,
        days: (120, 150),
        risk: RiskLevel::Medium,
        tips: &[
            "Keep 5 cm standing water during tillering",
            "Transplant 21-25 day old seedlings",
            "Watch for stem borer after panicle initiation",
        ],
    },
    CropRow {
        crop: Crop::Maize,
        preferred: &[Kharif],
        tolerated: &[Rabi, Zaid],
        min_health: SoilHealth::Fair,
        soils: &[Loamy, Sandy, Silty],
        demand: D::Medium,
        cost_per_acre: 40_000.0,
        yield_t_per_acre: 3.0,
        price_per_quintal: 2_100.0,
        days: (90, 120),
        risk: RiskLevel::Low,
        tips: &[
            "Sow on ridges where drainage is poor",
            "Never let the crop wilt at tasselling",
            "Scout for fall armyworm in the whorl",
        ],
    },
    CropRow {
        crop: Crop::Barley,
        preferred: &[Rabi],
        tolerated: &[],
        min_health: SoilHealth::Poor,
        soils: &[Loamy, Sandy, Chalky],
        demand: D::Low,
        cost_per_acre: 35_000.0,
        yield_t_per_acre: 2.6,
        price_per_quintal: 2_200.0,
        days: (100, 120),
        risk: RiskLevel::Low,
        tips: &[
            "Plant early for better grain quality",
            "Avoid waterlogging during grain filling",
            "Consider malting barley for premium prices",
        ],
    },
    CropRow {
        crop: Crop::Mustard,
        preferred: &[Rabi],
        tolerated: &[],
        min_health: SoilHealth::Fair,
        soils: &[Loamy, Sandy],
        demand: D::Medium,
        cost_per_acre: 25_000.0,
        yield_t_per_acre: 1.2,
        price_per_quintal: 4_500.0,
        days: (90, 120),
        risk: RiskLevel::Medium,
        tips: &[
            "Ensure proper drainage in fields",
            "Use aphid-resistant varieties",
            "Harvest at right maturity for oil content",
        ],
    },
    CropRow {
        crop: Crop::Cotton,
        preferred: &[Kharif],
        tolerated: &[],
        min_health: SoilHealth::Good,
        soils: &[Clay, Loamy],
        demand: D::High,
        cost_per_acre: 70_000.0,
        yield_t_per_acre: 1.5,
        price_per_quintal: 6_600.0,
        days: (150, 180),
        risk: RiskLevel::High,
        tips: &[
            "Use pheromone traps for pink bollworm",
            "Keep the field weed free for the first 60 days",
            "Pick in multiple rounds to protect lint quality",
        ],
    },
    CropRow {
        crop: Crop::Sugarcane,
        preferred: &[Kharif],
        tolerated: &[Zaid],
        min_health: SoilHealth::Good,
        soils: &[Loamy, Clay],
        demand: D::High,
        cost_per_acre: 120_000.0,
        yield_t_per_acre: 35.0,
        price_per_quintal: 400.0,
        days: (300, 365),
        risk: RiskLevel::Medium,
        tips: &[
            "Use three-bud setts treated with fungicide",
            "Earth up the rows before the monsoon",
            "Trash mulching cuts irrigation needs",
        ],
    },
    CropRow {
        crop: Crop::Potato,
        preferred: &[Rabi],
        tolerated: &[],
        min_health: SoilHealth::Good,
        soils: &[Loamy, Sandy, Silty],
        demand: D::High,
        cost_per_acre: 90_000.0,
        yield_t_per_acre: 10.0,
        price_per_quintal: 1_200.0,
        days: (90, 120),
        risk: RiskLevel::High,
        tips: &[
            "Plant disease-free seed tubers",
            "Spray against late blight when nights turn humid",
            "Stop irrigation 10 days before haulm cutting",
        ],
    },
    CropRow {
        crop: Crop::Tomato,
        preferred: &[Rabi],
        tolerated: &[Kharif, Zaid],
        min_health: SoilHealth::Good,
        soils: &[Loamy, Sandy],
        demand: D::High,
        cost_per_acre: 95_000.0,
        yield_t_per_acre: 12.0,
        price_per_quintal: 1_100.0,
        days: (90, 120),
        risk: RiskLevel::High,
        tips: &[
            "Stake plants to keep fruit off the soil",
            "Use drip irrigation to avoid blossom-end rot",
            "Stagger transplanting to spread market risk",
        ],
    },
    CropRow {
        crop: Crop::Onion,
        preferred: &[Rabi],
        tolerated: &[Kharif],
        min_health: SoilHealth::Good,
        soils: &[Loamy, Silty],
        demand: D::High,
        cost_per_acre: 80_000.0,
        yield_t_per_acre: 10.0,
        price_per_quintal: 1_300.0,
        days: (120, 150),
        risk: RiskLevel::High,
        tips: &[
            "Cure bulbs well before storage",
            "Stop irrigation two weeks before harvest",
            "Watch for thrips during bulb formation",
        ],
    },
    CropRow {
        crop: Crop::Soybean,
        preferred: &[Kharif],
        tolerated: &[],
        min_health: SoilHealth::Fair,
        soils: &[Loamy, Clay],
        demand: D::Medium,
        cost_per_acre: 30_000.0,
        yield_t_per_acre: 1.2,
        price_per_quintal: 4_600.0,
        days: (90, 110),
        risk: RiskLevel::Medium,
        tips: &[
            "Treat seed with Rhizobium culture",
            "Sow after 100 mm of monsoon rain",
            "Drain excess water quickly after heavy rain",
        ],
    },
];

static CATALOG: LazyLock<Vec<CropCandidate>> = LazyLock::new(|| {
    CROP_ROWS
        .iter()
        .map(|row| CropCandidate {
            crop: row.crop,
            preferred_seasons: row.preferred.to_vec(),
            tolerated_seasons: row.tolerated.to_vec(),
            min_soil_health: row.min_health,
            preferred_soils: row.soils.to_vec(),
            preferred_demand: row.demand,
            cost_per_acre: row.cost_per_acre,
            yield_t_per_acre: row.yield_t_per_acre,
            market_price_per_quintal: row.price_per_quintal,
            growing_period: DayRange {
                min: row.days.0,
                max: row.days.1,
            },
            risk: row.risk,
            tips: row.tips.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
});

/// The full crop reference set.
pub fn catalog() -> &'static [CropCandidate] {
    &CATALOG
}

pub fn candidate(crop: Crop) -> Option<&'static CropCandidate> {
    catalog().iter().find(|c| c.crop == crop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_crop_has_a_row() {
        for crop in Crop::iter() {
            assert!(candidate(crop).is_some(), "{crop} missing from catalog");
        }
        assert_eq!(catalog().len(), Crop::iter().count());
    }

    #[test]
    fn test_rows_are_consistent() {
        for c in catalog() {
            assert!(!c.preferred_seasons.is_empty());
            assert!(c
                .tolerated_seasons
                .iter()
                .all(|s| !c.preferred_seasons.contains(s)));
            assert!(c.cost_per_acre > 0.0);
            assert!(c.growing_period.min <= c.growing_period.max);
        }
    }
}
