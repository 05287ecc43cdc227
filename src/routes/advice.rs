use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::advisor::Advisor;
use crate::error::AdvisorError;
use crate::models::{
    FarmProfile, FarmProfileInput, Recommendation, ScenarioProjection, SoilHealthReport,
    SoilSample, SoilSampleInput, TreatmentPlan, TreatmentRequest, TreatmentRequestInput,
    YieldRequest, YieldRequestInput,
};

type Reply<T> = Result<Json<T>, AdvisorError>;

pub fn router() -> Router<Advisor> {
    Router::new()
        .route("/recommendations", post(recommendations))
        .route("/yield", post(predict_yield))
        .route("/treatment", post(treatment))
        .route("/soil", post(soil))
}

async fn recommendations(
    State(advisor): State<Advisor>,
    Json(input): Json<FarmProfileInput>,
) -> Reply<Vec<Recommendation>> {
    let profile = FarmProfile::try_from(input)?;
    let ranked = advisor.get_recommendations(&profile)?;
    info!("POST /recommendations - {} crops ranked", ranked.len());
    Ok(Json(ranked))
}

async fn predict_yield(
    State(advisor): State<Advisor>,
    Json(input): Json<YieldRequestInput>,
) -> Reply<Vec<ScenarioProjection>> {
    let request = YieldRequest::try_from(input)?;
    let projections = advisor.predict_yield(&request)?;
    info!("POST /yield - {} on {} acres", request.crop, request.area_acres);
    Ok(Json(projections))
}

async fn treatment(
    State(advisor): State<Advisor>,
    Json(input): Json<TreatmentRequestInput>,
) -> Reply<TreatmentPlan> {
    let request = TreatmentRequest::try_from(input)?;
    let plan = advisor.optimize_treatment(&request)?;
    info!(
        "POST /treatment - {} at {}, {} scheduled weeks",
        plan.crop,
        plan.growth_stage,
        plan.schedule.len()
    );
    Ok(Json(plan))
}

async fn soil(
    State(advisor): State<Advisor>,
    Json(input): Json<SoilSampleInput>,
) -> Reply<SoilHealthReport> {
    let sample = SoilSample::try_from(input)?;
    let report = advisor.assess_soil(&sample)?;
    info!(
        "POST /soil - score {} ({})",
        report.overall_score, report.category
    );
    Ok(Json(report))
}
