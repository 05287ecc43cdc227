use axum::{http::StatusCode, response::IntoResponse, response::Response, Json, Router};

use crate::advisor::Advisor;
use crate::error::AdvisorError;

mod advice;
mod health;

pub fn router(advisor: Advisor) -> Router {
    Router::new()
        .merge(advice::router())
        .merge(health::router())
        .with_state(advisor)
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        tracing::warn!("rejected request: {} ({})", self, self.kind());
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self.report())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(Advisor::new(Settings::default()))
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn farm() -> Value {
        json!({
            "soil_health": "good",
            "season": "rabi",
            "budget": "medium",
            "market_demand": "medium",
            "area_acres": 5.0,
            "soil_type": "loamy"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_recommendations() {
        let (status, body) = post("/recommendations", farm()).await;
        assert_eq!(status, StatusCode::OK);
        let ranked = body.as_array().unwrap();
        assert!(!ranked.is_empty());
        assert!(ranked.iter().any(|r| r["crop"] == "wheat"));
    }

    #[tokio::test]
    async fn test_missing_field_is_unprocessable() {
        let mut input = farm();
        input.as_object_mut().unwrap().remove("season");
        let (status, body) = post("/recommendations", input).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "validation");
        assert_eq!(body["field"], "season");
    }

    #[tokio::test]
    async fn test_yield() {
        let (status, body) = post(
            "/yield",
            json!({ "crop": "wheat", "soil_type": "loamy", "area_acres": 25.0 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["scenario"], "optimal");
        assert_eq!(body[0]["total_production_t"], 105.0);
    }

    #[tokio::test]
    async fn test_treatment_at_maturity_is_rejected() {
        let (status, body) = post(
            "/treatment",
            json!({
                "crop": "wheat",
                "field_size_acres": 2.0,
                "soil_type": "loamy",
                "growth_stage": "maturity"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "unsupported-crop-or-stage");
        assert_eq!(body["field"], "growth_stage");
    }

    #[tokio::test]
    async fn test_soil_report() {
        let (status, body) = post(
            "/soil",
            json!({
                "soil_type": "loamy",
                "readings": { "ph": 6.5, "nitrogen": 50.0, "phosphorus": 30.0, "potassium": 200.0 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overall_score"], 100);
        assert_eq!(body["category"], "excellent");
    }
}
