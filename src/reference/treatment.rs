use crate::models::{Crop, GrowthStage, Nutrient};

use GrowthStage::{Flowering, FruitDevelopment, Seedling, Vegetative};

/// One growth stage of a crop calendar with its irrigation need.
#[derive(Debug, Clone, Copy)]
pub struct StageRow {
    pub stage: GrowthStage,
    pub label: &'static str,
    /// Week after sowing the stage begins, 1-based.
    pub start_week: u32,
    pub duration_days: u32,
    pub interval_days: u32,
    pub depth_mm: f64,
    pub critical: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SplitRow {
    pub stage: GrowthStage,
    pub week: u32,
    /// Share of the per-acre dose applied in this split.
    pub fraction: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct DoseRow {
    pub nutrient: Nutrient,
    pub product: &'static str,
    pub kg_per_acre: f64,
    pub price_per_kg: f64,
    pub timing: &'static str,
    pub benefit: &'static str,
    pub splits: &'static [SplitRow],
}

#[derive(Debug, Clone, Copy)]
pub struct TreatmentProfile {
    pub crop: Crop,
    pub stages: &'static [StageRow],
    pub doses: &'static [DoseRow],
}

impl TreatmentProfile {
    pub fn stage(&self, stage: GrowthStage) -> Option<&'static StageRow> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}

const UREA_PRICE: f64 = 30.0;
const DAP_PRICE: f64 = 40.0;
const MOP_PRICE: f64 = 40.0;

const THIRD: f64 = 1.0 / 3.0;

const fn stage(
    stage: GrowthStage,
    label: &'static str,
    start_week: u32,
    duration_days: u32,
    interval_days: u32,
    depth_mm: f64,
    critical: bool,
) -> StageRow {
    StageRow {
        stage,
        label,
        start_week,
        duration_days,
        interval_days,
        depth_mm,
        critical,
    }
}

const fn split(stage: GrowthStage, week: u32, fraction: f64) -> SplitRow {
    SplitRow {
        stage,
        week,
        fraction,
    }
}

const fn urea(kg_per_acre: f64, timing: &'static str, splits: &'static [SplitRow]) -> DoseRow {
    DoseRow {
        nutrient: Nutrient::Nitrogen,
        product: "Urea",
        kg_per_acre,
        price_per_kg: UREA_PRICE,
        timing,
        benefit: "Promotes vegetative growth",
        splits,
    }
}

const fn dap(kg_per_acre: f64, timing: &'static str, splits: &'static [SplitRow]) -> DoseRow {
    DoseRow {
        nutrient: Nutrient::Phosphorus,
        product: "DAP",
        kg_per_acre,
        price_per_kg: DAP_PRICE,
        timing,
        benefit: "Root development and flowering",
        splits,
    }
}

const fn mop(kg_per_acre: f64, timing: &'static str, splits: &'static [SplitRow]) -> DoseRow {
    DoseRow {
        nutrient: Nutrient::Potassium,
        product: "MOP",
        kg_per_acre,
        price_per_kg: MOP_PRICE,
        timing,
        benefit: "Disease resistance and grain quality",
        splits,
    }
}

const BASAL: &[SplitRow] = &[split(Seedling, 1, 1.0)];

pub const PROFILES: &[TreatmentProfile] = &[
    TreatmentProfile {
        crop: Crop::Wheat,
        stages: &[
            stage(Seedling, "Sowing to Germination", 1, 15, 3, 25.0, true),
            stage(Vegetative, "Tillering and Vegetative Growth", 3, 45, 8, 40.0, false),
            stage(Flowering, "Flowering", 10, 20, 6, 50.0, true),
            stage(FruitDevelopment, "Grain Filling", 13, 25, 8, 45.0, true),
        ],
        doses: &[
            urea(
                120.0,
                "3 splits: sowing, tillering, flowering",
                &[
                    split(Seedling, 1, THIRD),
                    split(Vegetative, 4, THIRD),
                    split(Flowering, 10, THIRD),
                ],
            ),
            dap(60.0, "Basal application at sowing", BASAL),
            mop(
                40.0,
                "2 splits: sowing, flowering",
                &[split(Seedling, 1, 0.5), split(Flowering, 10, 0.5)],
            ),
        ],
    },
    TreatmentProfile {
        crop: Crop::Rice,
        stages: &[
            stage(Seedling, "Nursery and Transplanting", 1, 20, 2, 50.0, true),
            stage(Vegetative, "Tillering", 4, 35, 5, 50.0, false),
            stage(Flowering, "Panicle Initiation to Flowering", 9, 25, 3, 60.0, true),
            stage(FruitDevelopment, "Grain Filling", 13, 25, 6, 50.0, true),
        ],
        doses: &[
            urea(
                110.0,
                "Half at transplanting, quarters at tillering and panicle initiation",
                &[
                    split(Seedling, 1, 0.5),
                    split(Vegetative, 5, 0.25),
                    split(Flowering, 9, 0.25),
                ],
            ),
            dap(55.0, "Basal application at transplanting", BASAL),
            mop(
                35.0,
                "2 splits: transplanting, panicle initiation",
                &[split(Seedling, 1, 0.5), split(Flowering, 9, 0.5)],
            ),
        ],
    },
    TreatmentProfile {
        crop: Crop::Maize,
        stages: &[
            stage(Seedling, "Emergence", 1, 14, 4, 30.0, false),
            stage(Vegetative, "Knee-high Growth", 3, 35, 7, 40.0, false),
            stage(Flowering, "Tasselling and Silking", 8, 15, 4, 50.0, true),
            stage(FruitDevelopment, "Grain Filling", 11, 30, 7, 45.0, true),
        ],
        doses: &[
            urea(
                100.0,
                "3 splits: sowing, knee-high, tasselling",
                &[
                    split(Seedling, 1, THIRD),
                    split(Vegetative, 4, THIRD),
                    split(Flowering, 8, THIRD),
                ],
            ),
            dap(50.0, "Basal application at sowing", BASAL),
            mop(30.0, "Basal application at sowing", BASAL),
        ],
    },
    TreatmentProfile {
        crop: Crop::Cotton,
        stages: &[
            stage(Seedling, "Establishment", 1, 20, 6, 30.0, false),
            stage(Vegetative, "Square Formation", 4, 40, 10, 40.0, false),
            stage(Flowering, "Flowering", 10, 30, 7, 50.0, true),
            stage(FruitDevelopment, "Boll Development", 14, 40, 10, 50.0, true),
        ],
        doses: &[
            urea(
                130.0,
                "3 splits: sowing, squaring, flowering",
                &[
                    split(Seedling, 1, 0.25),
                    split(Vegetative, 5, 0.5),
                    split(Flowering, 10, 0.25),
                ],
            ),
            dap(65.0, "Basal application at sowing", BASAL),
            mop(
                50.0,
                "2 splits: sowing, flowering",
                &[split(Seedling, 1, 0.5), split(Flowering, 10, 0.5)],
            ),
        ],
    },
    TreatmentProfile {
        crop: Crop::Sugarcane,
        stages: &[
            stage(Seedling, "Germination", 1, 35, 7, 40.0, true),
            stage(Vegetative, "Tillering", 6, 60, 10, 50.0, true),
            stage(Flowering, "Grand Growth", 15, 120, 10, 60.0, false),
            stage(FruitDevelopment, "Ripening", 32, 60, 20, 40.0, false),
        ],
        doses: &[
            urea(
                200.0,
                "3 splits: planting, tillering, grand growth",
                &[
                    split(Seedling, 1, THIRD),
                    split(Vegetative, 8, THIRD),
                    split(Flowering, 15, THIRD),
                ],
            ),
            dap(100.0, "Basal application at planting", BASAL),
            mop(
                80.0,
                "2 splits: planting, tillering",
                &[split(Seedling, 1, 0.5), split(Vegetative, 8, 0.5)],
            ),
        ],
    },
    TreatmentProfile {
        crop: Crop::Potato,
        stages: &[
            stage(Seedling, "Sprouting", 1, 20, 7, 30.0, false),
            stage(Vegetative, "Stolon Initiation", 4, 20, 6, 35.0, true),
            stage(Flowering, "Tuber Initiation", 7, 20, 5, 40.0, true),
            stage(FruitDevelopment, "Tuber Bulking", 10, 35, 7, 45.0, true),
        ],
        doses: &[
            urea(
                130.0,
                "2 splits: planting, earthing up",
                &[split(Seedling, 1, 0.5), split(Vegetative, 4, 0.5)],
            ),
            dap(100.0, "Basal application at planting", BASAL),
            mop(80.0, "Basal application at planting", BASAL),
        ],
    },
    TreatmentProfile {
        crop: Crop::Tomato,
        stages: &[
            stage(Seedling, "Transplant Establishment", 1, 14, 3, 25.0, true),
            stage(Vegetative, "Vegetative Growth", 3, 28, 5, 35.0, false),
            stage(Flowering, "Flowering", 7, 21, 4, 40.0, true),
            stage(FruitDevelopment, "Fruit Set and Development", 10, 40, 4, 45.0, true),
        ],
        doses: &[
            urea(
                90.0,
                "3 splits: transplanting, vegetative, flowering",
                &[
                    split(Seedling, 1, THIRD),
                    split(Vegetative, 4, THIRD),
                    split(Flowering, 7, THIRD),
                ],
            ),
            dap(80.0, "Basal application at transplanting", BASAL),
            mop(
                60.0,
                "2 splits: transplanting, fruit set",
                &[split(Seedling, 1, 0.5), split(FruitDevelopment, 10, 0.5)],
            ),
        ],
    },
];

pub fn profile(crop: Crop) -> Option<&'static TreatmentProfile> {
    PROFILES.iter().find(|p| p.crop == crop)
}
