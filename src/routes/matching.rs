use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{score, MatchError, Ranker};
use crate::models::{
    ErrorResponse, HealthResponse, RankProvidersRequest, RankWaitlistRequest, RankedCandidate,
    RankingResponse, ScoreRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub ranker: Ranker,
    pub matching: MatchingSettings,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match/score", web::post().to(score_pair))
        .route("/match/providers", web::post().to(rank_providers))
        .route("/waitlist/rank", web::post().to(rank_waitlist));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one patient against one provider
///
/// POST /api/v1/match/score
///
/// Request body:
/// ```json
/// {
///   "patient": { "id": "string", "diagnosis": "string", ... },
///   "provider": { "id": "string", "specialties": ["string"], ... },
///   "weights": { "specialty": 40, ... }
/// }
/// ```
async fn score_pair(state: web::Data<AppState>, req: web::Json<ScoreRequest>) -> impl Responder {
    let weights = req.weights.unwrap_or(*state.ranker.weights());

    match score(&req.provider, &req.patient, Some(&weights)) {
        Ok(result) => {
            tracing::debug!(
                "Scored provider {} for patient {}: {}",
                req.provider.id,
                req.patient.id,
                result.score
            );
            HttpResponse::Ok().json(result)
        }
        Err(e) => match_error_response(&e),
    }
}

/// Rank providers for a patient
///
/// POST /api/v1/match/providers
///
/// Request body:
/// ```json
/// {
///   "patient": { "id": "string", ... },
///   "providers": [{ "id": "string", "capacity": 2, ... }],
///   "weights": null,
///   "limit": 20
/// }
/// ```
async fn rank_providers(
    state: web::Data<AppState>,
    req: web::Json<RankProvidersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_providers request: {:?}", errors);
        return validation_error_response(&errors);
    }

    let ranker = ranker_for(&state, req.weights.as_ref());
    let limit = state.matching.effective_limit(req.limit);

    tracing::info!(
        "Ranking {} providers for patient {}, limit: {}",
        req.providers.len(),
        req.patient.id,
        limit
    );

    match ranker.rank_providers(&req.patient, &req.providers) {
        Ok(candidates) => ranking_response(req.providers.len(), candidates, limit),
        Err(e) => match_error_response(&e),
    }
}

/// Rank waiting patients for an opened slot
///
/// POST /api/v1/waitlist/rank
///
/// Request body:
/// ```json
/// {
///   "provider": { "id": "string", ... },
///   "patients": [{ "id": "string", "urgency": 3, "joinSequence": 12, "eligible": true }],
///   "limit": 5
/// }
/// ```
async fn rank_waitlist(
    state: web::Data<AppState>,
    req: web::Json<RankWaitlistRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_waitlist request: {:?}", errors);
        return validation_error_response(&errors);
    }

    let ranker = ranker_for(&state, req.weights.as_ref());
    let limit = state.matching.effective_limit(req.limit);

    tracing::info!(
        "Ranking {} waitlisted patients for provider {}, limit: {}",
        req.patients.len(),
        req.provider.id,
        limit
    );

    match ranker.rank_waitlist(&req.patients, &req.provider) {
        Ok(candidates) => ranking_response(req.patients.len(), candidates, limit),
        Err(e) => match_error_response(&e),
    }
}

/// Request weights replace the configured ones for the whole call
fn ranker_for(state: &AppState, weights: Option<&crate::models::MatchWeights>) -> Ranker {
    match weights {
        Some(w) => Ranker::new(*w),
        None => state.ranker.clone(),
    }
}

fn ranking_response(
    total_candidates: usize,
    mut candidates: Vec<RankedCandidate>,
    limit: usize,
) -> HttpResponse {
    let excluded = total_candidates - candidates.len();
    candidates.truncate(limit);

    let response = RankingResponse {
        ranking_id: uuid::Uuid::new_v4().to_string(),
        generated_at: chrono::Utc::now(),
        total_candidates,
        excluded,
        candidates,
    };

    tracing::info!(
        "Ranking {} returned {} candidates ({} excluded)",
        response.ranking_id,
        response.candidates.len(),
        excluded
    );

    HttpResponse::Ok().json(response)
}

fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn match_error_response(err: &MatchError) -> HttpResponse {
    tracing::warn!("Rejected matching request: {}", err);
    let status = StatusCode::UNPROCESSABLE_ENTITY;
    HttpResponse::build(status).json(ErrorResponse {
        error: "Invalid record".to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{configure_routes, handle_json_payload_error};
    use crate::models::{MatchFactor, MatchResult};
    use actix_web::{test, App};
    use serde_json::json;

    fn test_state() -> AppState {
        AppState {
            ranker: Ranker::with_default_weights(),
            matching: MatchingSettings {
                default_limit: Some(20),
                max_limit: Some(100),
            },
        }
    }

    fn provider_json(id: &str, specialty: &str, capacity: i64) -> serde_json::Value {
        json!({
            "id": id,
            "specialties": [specialty],
            "insuranceAccepted": ["Aetna"],
            "location": "Austin",
            "virtualAvailable": true,
            "inPersonAvailable": false,
            "capacity": capacity
        })
    }

    macro_rules! init_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_state()))
                    .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = init_app!();
        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let response: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.status, "healthy");
    }

    #[actix_web::test]
    async fn test_rank_providers_endpoint() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/match/providers")
            .set_json(json!({
                "patient": { "id": "p1", "diagnosis": "Anxiety", "insurance": "Aetna" },
                "providers": [
                    provider_json("grief", "Grief", 2),
                    provider_json("full", "Anxiety", 0),
                    provider_json("anxiety", "Anxiety", 1)
                ],
                "limit": 1
            }))
            .to_request();
        let response: RankingResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.total_candidates, 3);
        assert_eq!(response.excluded, 1);
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].id, "anxiety");
    }

    #[actix_web::test]
    async fn test_rank_waitlist_endpoint() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/waitlist/rank")
            .set_json(json!({
                "provider": provider_json("dr", "Anxiety", 1),
                "patients": [
                    { "id": "fit", "diagnosis": "Anxiety", "urgency": 3, "joinSequence": 1 },
                    { "id": "urgent", "urgency": 5, "joinSequence": 2 },
                    { "id": "booked", "urgency": 9, "eligible": false }
                ]
            }))
            .to_request();
        let response: RankingResponse = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<_> = response.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["urgent", "fit"]);
        assert_eq!(response.excluded, 1);
    }

    #[actix_web::test]
    async fn test_missing_identity_is_unprocessable() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/match/score")
            .set_json(json!({
                "patient": { "id": "" },
                "provider": provider_json("dr", "Anxiety", 1)
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_non_list_providers_is_bad_request() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/match/providers")
            .set_json(json!({
                "patient": { "id": "p1" },
                "providers": { "id": "dr" }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_zero_limit_fails_validation() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/match/providers")
            .set_json(json!({
                "patient": { "id": "p1" },
                "providers": [],
                "limit": 0
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_partial_weights_merge_with_defaults() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/match/score")
            .set_json(json!({
                "patient": { "id": "p1", "diagnosis": "Anxiety", "insurance": "Aetna", "location": "Austin" },
                "provider": provider_json("dr", "Anxiety", 1),
                "weights": { "gender": 0 }
            }))
            .to_request();
        let result: MatchResult = test::call_and_read_body_json(&app, req).await;

        // 40 + 25 + 15 + 15 from the defaults, gender switched off
        assert_eq!(result.score, 95);
        assert_eq!(result.reasons.len(), 4);
        assert!(!result.has_factor(MatchFactor::Gender));
    }

    #[actix_web::test]
    async fn test_request_weights_replace_configured() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/match/providers")
            .set_json(json!({
                "patient": { "id": "p1", "diagnosis": "Anxiety", "insurance": "Aetna" },
                "providers": [
                    provider_json("grief", "Grief", 1),
                    provider_json("anxiety", "Anxiety", 1)
                ],
                "weights": { "specialty": 0, "insurance": 0, "modality": 0, "location": 0, "gender": 100 }
            }))
            .to_request();
        let response: RankingResponse = test::call_and_read_body_json(&app, req).await;

        // Configured weights would put the anxiety specialist first
        let ids: Vec<_> = response.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["grief", "anxiety"]);
        assert!(response.candidates.iter().all(|c| c.result.score == 100));
    }

    #[actix_web::test]
    async fn test_null_and_empty_attributes_still_rank() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/match/providers")
            .set_json(json!({
                "patient": {
                    "id": "p1",
                    "diagnosis": "Anxiety",
                    "preferredGender": "",
                    "preferredModality": null
                },
                "providers": [
                    { "id": "a", "specialties": ["Anxiety"], "virtualAvailable": null, "capacity": 2 },
                    { "id": "b", "specialties": null, "gender": "", "inPersonAvailable": true, "capacity": 1 }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let response: RankingResponse = test::read_body_json(resp).await;
        let ids: Vec<_> = response.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
