use chrono::Duration;
use std::collections::BTreeMap;

use crate::error::{AdvisorError, Result};
use crate::models::{
    ApplicationSplit, FertilizerDose, IrrigationEvent, Priority, TreatmentPlan, TreatmentRequest,
    WeekPlan,
};
use crate::reference::treatment::profile;
use crate::reference::{water_profile, DoseRow, StageRow, TreatmentProfile, WaterProfile};
use crate::utils::{round_to, rupees};

/// Water volume of one millimetre over one acre, in cubic metres.
pub const M3_PER_MM_ACRE: f64 = 4.0469;

/// Days a recovery irrigation for a missed critical stage is given to soak in.
const CATCH_UP_DAYS: u32 = 7;

pub fn plan(request: &TreatmentRequest) -> Result<TreatmentPlan> {
    request.validate()?;

    let crop = request.crop;
    let profile = profile(crop).ok_or_else(|| {
        AdvisorError::unsupported("crop", crop, "no fertilizer or irrigation reference data")
    })?;
    let water = water_profile(request.soil_type).ok_or_else(|| {
        AdvisorError::unsupported(
            "soil_type",
            crop,
            format!("no irrigation data for {} soil", request.soil_type),
        )
    })?;
    let current = profile.stage(request.growth_stage).ok_or_else(|| {
        AdvisorError::unsupported(
            "growth_stage",
            crop,
            format!("no treatment entry for the {} stage", request.growth_stage),
        )
    })?;

    let timeline = Timeline {
        offset: current.start_week - 1,
        current,
    };

    let fertilizer: Vec<FertilizerDose> = profile
        .doses
        .iter()
        .map(|dose| plan_dose(dose, profile, &timeline, request.field_size_acres))
        .collect();

    let irrigation: Vec<IrrigationEvent> = profile
        .stages
        .iter()
        .filter_map(|stage| plan_irrigation(stage, water, &timeline, request.field_size_acres))
        .collect();

    let total_fertilizer_cost = fertilizer.iter().map(|d| d.cost).sum();
    let total_water_mm = round_to(
        irrigation
            .iter()
            .map(|e| e.depth_mm * e.applications as f64)
            .sum(),
        1,
    );

    let schedule = build_schedule(&fertilizer, &irrigation, request);

    tracing::debug!(
        "planned {} from {}: {} doses, {} irrigation events, {} weeks",
        crop,
        request.growth_stage,
        fertilizer.len(),
        irrigation.len(),
        schedule.len()
    );

    Ok(TreatmentPlan {
        crop,
        field_size_acres: request.field_size_acres,
        soil_type: request.soil_type,
        growth_stage: request.growth_stage,
        fertilizer,
        irrigation,
        schedule,
        total_fertilizer_cost,
        total_water_mm,
    })
}

/// Maps crop-calendar weeks onto plan weeks starting at the requested stage.
struct Timeline {
    offset: u32,
    current: &'static StageRow,
}

impl Timeline {
    fn has_elapsed(&self, stage: &StageRow) -> bool {
        stage.stage < self.current.stage
    }

    fn plan_week(&self, calendar_week: u32) -> u32 {
        calendar_week.saturating_sub(self.offset).max(1)
    }
}

fn plan_dose(
    dose: &DoseRow,
    profile: &TreatmentProfile,
    timeline: &Timeline,
    acres: f64,
) -> FertilizerDose {
    let mut missed = 0.0;
    let mut splits = Vec::with_capacity(dose.splits.len() + 1);

    for split in dose.splits {
        let Some(stage) = profile.stage(split.stage) else {
            continue;
        };
        if timeline.has_elapsed(stage) {
            missed += split.fraction;
            continue;
        }
        splits.push(ApplicationSplit {
            stage: split.stage,
            week: timeline.plan_week(split.week),
            kg_per_acre: round_to(dose.kg_per_acre * split.fraction, 2),
            total_kg: round_to(dose.kg_per_acre * split.fraction * acres, 2),
            critical: stage.critical,
            catch_up: false,
        });
    }

    if missed > 0.0 {
        splits.insert(
            0,
            ApplicationSplit {
                stage: timeline.current.stage,
                week: 1,
                kg_per_acre: round_to(dose.kg_per_acre * missed, 2),
                total_kg: round_to(dose.kg_per_acre * missed * acres, 2),
                critical: timeline.current.critical,
                catch_up: true,
            },
        );
    }

    let total_kg = dose.kg_per_acre * acres;
    FertilizerDose {
        nutrient: dose.nutrient,
        product: dose.product.to_string(),
        kg_per_acre: dose.kg_per_acre,
        total_kg: round_to(total_kg, 2),
        cost: rupees(total_kg * dose.price_per_kg),
        timing: dose.timing.to_string(),
        benefit: dose.benefit.to_string(),
        splits,
    }
}

fn plan_irrigation(
    stage: &StageRow,
    water: &WaterProfile,
    timeline: &Timeline,
    acres: f64,
) -> Option<IrrigationEvent> {
    let interval_days = ((stage.interval_days as f64 * water.interval_factor).round() as u32).max(1);
    let depth_mm = round_to(stage.depth_mm * water.depth_factor, 1);
    let volume = round_to(depth_mm * M3_PER_MM_ACRE * acres, 1);

    if timeline.has_elapsed(stage) {
        if !stage.critical {
            return None;
        }
        return Some(IrrigationEvent {
            stage: stage.stage,
            label: stage.label.to_string(),
            week: 1,
            interval_days,
            depth_mm,
            duration_days: CATCH_UP_DAYS,
            applications: 1,
            volume_m3_per_application: volume,
            critical: true,
            catch_up: true,
        });
    }

    Some(IrrigationEvent {
        stage: stage.stage,
        label: stage.label.to_string(),
        week: timeline.plan_week(stage.start_week),
        interval_days,
        depth_mm,
        duration_days: stage.duration_days,
        applications: stage.duration_days.div_ceil(interval_days),
        volume_m3_per_application: volume,
        critical: stage.critical,
        catch_up: false,
    })
}

#[derive(Default)]
struct WeekSlot {
    tasks: Vec<String>,
    critical: bool,
    fertilizer: bool,
}

fn build_schedule(
    fertilizer: &[FertilizerDose],
    irrigation: &[IrrigationEvent],
    request: &TreatmentRequest,
) -> Vec<WeekPlan> {
    let mut weeks: BTreeMap<u32, WeekSlot> = BTreeMap::new();

    for event in irrigation {
        let slot = weeks.entry(event.week).or_default();
        slot.critical |= event.critical;
        slot.tasks.push(if event.catch_up {
            format!(
                "Recovery irrigation of {} mm for missed {} stage",
                event.depth_mm, event.label
            )
        } else {
            format!(
                "Irrigate {} mm every {} days ({})",
                event.depth_mm, event.interval_days, event.label
            )
        });
    }

    for dose in fertilizer {
        for split in &dose.splits {
            let slot = weeks.entry(split.week).or_default();
            slot.critical |= split.critical;
            slot.fertilizer = true;
            let verb = if split.catch_up { "Catch-up: apply" } else { "Apply" };
            slot.tasks.push(format!(
                "{verb} {} kg {} ({} kg/acre)",
                split.total_kg, dose.product, split.kg_per_acre
            ));
        }
    }

    weeks
        .into_iter()
        .map(|(week, slot)| WeekPlan {
            week,
            starts_on: request
                .start_date
                .map(|d| d + Duration::days(7 * (week as i64 - 1))),
            tasks: slot.tasks,
            priority: if slot.critical {
                Priority::High
            } else if slot.fertilizer {
                Priority::Medium
            } else {
                Priority::Low
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crop, GrowthStage, Nutrient, SoilType};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn request(crop: Crop, growth_stage: GrowthStage) -> TreatmentRequest {
        TreatmentRequest {
            crop,
            field_size_acres: 1.0,
            soil_type: SoilType::Loamy,
            growth_stage,
            start_date: None,
        }
    }

    fn dose(plan: &TreatmentPlan, nutrient: Nutrient) -> &FertilizerDose {
        plan.fertilizer
            .iter()
            .find(|d| d.nutrient == nutrient)
            .unwrap()
    }

    #[test]
    fn test_wheat_from_sowing() {
        let plan = plan(&request(Crop::Wheat, GrowthStage::Seedling)).unwrap();

        let urea = dose(&plan, Nutrient::Nitrogen);
        assert_eq!(urea.kg_per_acre, 120.0);
        assert_eq!(urea.cost, 3_600);
        let weeks: Vec<u32> = urea.splits.iter().map(|s| s.week).collect();
        assert_eq!(weeks, vec![1, 4, 10]);
        assert!(urea.splits.iter().all(|s| s.kg_per_acre == 40.0));

        assert_eq!(dose(&plan, Nutrient::Phosphorus).cost, 2_400);
        assert_eq!(dose(&plan, Nutrient::Potassium).cost, 1_600);
        assert_eq!(plan.total_fertilizer_cost, 7_600);

        assert_eq!(plan.irrigation.len(), 4);
        let first = &plan.irrigation[0];
        assert_eq!(first.depth_mm, 25.0);
        assert_eq!(first.applications, 5);
        assert!(first.critical);
        assert_eq!(plan.total_water_mm, 745.0);
    }

    #[test]
    fn test_late_start_compresses_without_losing_dose() {
        let plan = plan(&request(Crop::Wheat, GrowthStage::Flowering)).unwrap();

        let urea = dose(&plan, Nutrient::Nitrogen);
        let total: f64 = urea.splits.iter().map(|s| s.kg_per_acre).sum();
        assert_relative_eq!(total, 120.0, epsilon = 0.05);
        assert!(urea.splits[0].catch_up);
        assert_eq!(urea.splits[0].week, 1);
        assert_relative_eq!(urea.splits[0].kg_per_acre, 80.0);

        // critical seedling stage survives as a recovery irrigation, vegetative is dropped
        let stages: Vec<GrowthStage> = plan.irrigation.iter().map(|e| e.stage).collect();
        assert_eq!(
            stages,
            vec![
                GrowthStage::Seedling,
                GrowthStage::Flowering,
                GrowthStage::FruitDevelopment
            ]
        );
        assert!(plan.irrigation[0].catch_up);
        assert_eq!(plan.irrigation[2].week, 4);
    }

    #[test]
    fn test_week_priorities() {
        let plan = plan(&request(Crop::Wheat, GrowthStage::Seedling)).unwrap();
        let week = |n: u32| plan.schedule.iter().find(|w| w.week == n).unwrap();
        assert_eq!(week(1).priority, Priority::High);
        // tillering urea only, vegetative stage is not critical
        assert_eq!(week(4).priority, Priority::Medium);
        assert_eq!(week(3).priority, Priority::Low);
        assert_eq!(week(10).priority, Priority::High);
        assert!(plan.schedule.windows(2).all(|w| w[0].week < w[1].week));
    }

    #[test]
    fn test_field_size_and_soil_scale_irrigation() {
        let mut req = request(Crop::Maize, GrowthStage::Seedling);
        req.field_size_acres = 10.0;
        req.soil_type = SoilType::Sandy;
        let plan = plan(&req).unwrap();

        let first = &plan.irrigation[0];
        assert_eq!(first.interval_days, 2);
        assert_eq!(first.depth_mm, 21.0);
        assert_relative_eq!(first.volume_m3_per_application, 849.8, epsilon = 0.05);
        assert_eq!(dose(&plan, Nutrient::Nitrogen).total_kg, 1_000.0);
    }

    #[test]
    fn test_dated_schedule() {
        let mut req = request(Crop::Tomato, GrowthStage::Seedling);
        req.start_date = NaiveDate::from_ymd_opt(2024, 11, 1);
        let plan = plan(&req).unwrap();
        assert_eq!(plan.schedule[0].starts_on, NaiveDate::from_ymd_opt(2024, 11, 1));
        let week3 = plan.schedule.iter().find(|w| w.week == 3).unwrap();
        assert_eq!(week3.starts_on, NaiveDate::from_ymd_opt(2024, 11, 15));
    }

    #[test]
    fn test_unsupported_combinations() {
        let err = plan(&request(Crop::Wheat, GrowthStage::Maturity)).unwrap_err();
        assert_eq!(err.kind(), "unsupported-crop-or-stage");
        assert_eq!(err.field(), "growth_stage");

        let err = plan(&request(Crop::Barley, GrowthStage::Seedling)).unwrap_err();
        assert_eq!(err.field(), "crop");

        let mut req = request(Crop::Rice, GrowthStage::Seedling);
        req.soil_type = SoilType::Peaty;
        assert_eq!(plan(&req).unwrap_err().field(), "soil_type");
    }
}
