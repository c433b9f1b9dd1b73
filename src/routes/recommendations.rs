use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{MatchError, MatchingEngine};
use crate::models::{
    AdviceRequest, AdviceResponse, CategoriesResponse, ErrorResponse, EvaluateFitRequest,
    HealthResponse, InsertProfessionResponse, NewProfession, RecommendationRequest,
    RecommendationsResponse,
};
use crate::routes::render;
use crate::services::{Advice, AdvisorClient, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchingEngine,
    /// `None` when the advisor is disabled; advice endpoints then serve the fallback text
    pub advisor: Option<Arc<AdvisorClient>>,
    pub matching: MatchingSettings,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/categories", web::get().to(list_categories))
        .route("/professions", web::post().to(insert_profession))
        .route("/advice", web::post().to(career_advice))
        .route("/advice/evaluate", web::post().to(evaluate_fit));
}

fn error_response(status: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status,
    };

    match status {
        400 => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.engine.store().health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank professions endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "skills": "Python, SQL",
///   "interests": ["IT"],
///   "experienceLevel": "1-3y",
///   "limit": 5
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendations request: {:?}", errors);
        return error_response(400, "Validation failed", errors.to_string());
    }

    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit);
    let query = req.to_query();

    tracing::info!(
        "Ranking professions: {} skills, {} interests, experience {}, limit {}",
        query.skills.len(),
        query.interests.len(),
        query.experience_level,
        limit
    );

    let matches = match state.engine.rank(&query, limit).await {
        Ok(matches) => matches,
        Err(MatchError::InvalidQuery(message)) => {
            return error_response(400, "Invalid query", message);
        }
        Err(e) => {
            tracing::error!("Failed to rank professions: {}", e);
            return error_response(500, "Failed to rank professions", e.to_string());
        }
    };

    if !matches.is_empty() {
        tracing::info!("Returning {} ranked professions", matches.len());
        let message = render::recommendations_text(&matches);
        return HttpResponse::Ok().json(RecommendationsResponse {
            matches,
            fallback: false,
            suggestions: vec![],
            message,
        });
    }

    let suggestions = match state
        .engine
        .fallback_sample(state.matching.fallback_sample_size)
        .await
    {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Failed to sample fallback professions: {}", e);
            vec![]
        }
    };

    tracing::info!("No matches, suggesting {} random professions", suggestions.len());

    HttpResponse::Ok().json(RecommendationsResponse {
        matches,
        fallback: true,
        message: render::fallback_text(&suggestions),
        suggestions,
    })
}

/// List distinct profession categories
///
/// GET /api/v1/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    match state.engine.categories().await {
        Ok(categories) => HttpResponse::Ok().json(CategoriesResponse {
            message: render::categories_text(&categories),
            categories,
        }),
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            error_response(500, "Failed to list categories", e.to_string())
        }
    }
}

/// Administrative insert of a profession
///
/// POST /api/v1/professions
async fn insert_profession(
    state: web::Data<AppState>,
    req: web::Json<NewProfession>,
) -> impl Responder {
    let profession = req.into_inner();
    let name = profession.name.clone();

    match state.engine.store().insert(profession).await {
        Ok(id) => {
            tracing::info!("Added profession {} ({})", id, name);
            HttpResponse::Created().json(InsertProfessionResponse { id })
        }
        Err(StoreError::InvalidRecord(message)) => {
            error_response(400, "Invalid profession", message)
        }
        Err(e) => {
            tracing::error!("Failed to insert profession: {}", e);
            error_response(500, "Failed to insert profession", e.to_string())
        }
    }
}

/// Free-text career advice from the LLM advisor
///
/// POST /api/v1/advice
async fn career_advice(
    state: web::Data<AppState>,
    req: web::Json<AdviceRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    let advice = match &state.advisor {
        Some(advisor) => {
            advisor
                .career_advice_or_fallback(&req.skills, &req.interests, req.experience_level.trim())
                .await
        }
        None => Advice::fallback(),
    };

    HttpResponse::Ok().json(AdviceResponse {
        advice: advice.text,
        fallback: advice.fallback,
    })
}

/// Free-text assessment of a single profession
///
/// POST /api/v1/advice/evaluate
async fn evaluate_fit(
    state: web::Data<AppState>,
    req: web::Json<EvaluateFitRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    let advice = match &state.advisor {
        Some(advisor) => {
            advisor
                .evaluate_fit_or_fallback(req.profession.trim(), &req.skills, &req.interests)
                .await
        }
        None => Advice::fallback(),
    };

    HttpResponse::Ok().json(AdviceResponse {
        advice: advice.text,
        fallback: advice.fallback,
    })
}
