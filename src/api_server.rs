// Axum API server module
//
// Purpose: JSON surface over translation lookup, coverage reporting,
// crop economics and the season calendar.
// Every endpoint takes an explicit `language`; the server holds no
// Active Language of its own.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::economics::{calculate, Crop, EconomicInputs, EconomicsError};
use crate::i18n::{available_languages, LanguageCode, Params, Resolver};
use crate::seasons::{planning_tip_keys, season_calendar};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Resolver>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Load the embedded dictionaries plus any `LOCALES_DIR` overrides.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading embedded dictionaries...");
        if let Some(dir) = &config.locales_dir {
            tracing::info!("Applying dictionary overrides from {}", dir.display());
        }
        let store = config.dictionary_store()?;

        let translator = Resolver::new(Arc::new(store))
            .with_default_language(config.default_language);

        Ok(Self {
            translator: Arc::new(translator),
            config: Arc::new(config),
        })
    }

    /// Requested language, or the configured default when none was given.
    fn language(&self, requested: Option<&str>) -> Result<LanguageCode, AppError> {
        match requested.map(str::trim).filter(|code| !code.is_empty()) {
            None => Ok(self.config.default_language),
            Some(code) => LanguageCode::parse(code)
                .ok_or_else(|| AppError::BadRequest(format!("Unsupported language '{}'", code))),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Translation endpoints
        .route("/api/languages", get(list_languages))
        .route("/api/translations/:lang", get(get_translations))
        .route("/api/translate", post(translate))
        .route("/api/translate/plural", post(translate_plural))
        .route("/api/coverage", get(get_coverage))

        // Planning endpoints
        .route("/api/economics", post(economic_analysis))
        .route("/api/seasons", get(get_seasons))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_languages() -> impl IntoResponse {
    Json(available_languages())
}

async fn get_translations(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let language = LanguageCode::parse(&lang)
        .ok_or_else(|| AppError::NotFound(format!("Language '{}' not found", lang)))?;
    let dictionary = state.translator.store().dictionary(language);

    Ok(Json(serde_json::json!({
        "language": language,
        "count": dictionary.len(),
        "translations": dictionary.to_sorted_map(),
    })))
}

#[derive(Debug, Deserialize)]
struct TranslateRequest {
    key: String,
    language: Option<String>,
    #[serde(default)]
    params: serde_json::Map<String, serde_json::Value>,
    fallback: Option<String>,
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let language = state.language(request.language.as_deref())?;
    let params = Params::from(&request.params);

    // Source is reported from the raw lookup; resolve_or does the rest
    let source = state.translator.lookup(language, &request.key).source();
    let text = state.translator.resolve_or(
        language,
        &request.key,
        &params,
        request.fallback.as_deref(),
    );

    Ok(Json(serde_json::json!({
        "text": text,
        "language": language,
        "source": source,
    })))
}

#[derive(Debug, Deserialize)]
struct PluralRequest {
    key: String,
    count: i64,
    language: Option<String>,
    #[serde(default)]
    params: serde_json::Map<String, serde_json::Value>,
}

async fn translate_plural(
    State(state): State<AppState>,
    Json(request): Json<PluralRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let language = state.language(request.language.as_deref())?;
    let text = state.translator.resolve_plural(
        language,
        &request.key,
        request.count,
        &Params::from(&request.params),
    );

    Ok(Json(serde_json::json!({
        "text": text,
        "language": language,
    })))
}

async fn get_coverage(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.translator.store();
    Json(store.coverage_report(state.translator.default_language()))
}

#[derive(Debug, Deserialize)]
struct EconomicsRequest {
    crop: String,
    area: f64,
    season: Option<String>,
    irrigation: Option<String>,
    language: Option<String>,
}

async fn economic_analysis(
    State(state): State<AppState>,
    Json(request): Json<EconomicsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let language = state.language(request.language.as_deref())?;

    let mut inputs = EconomicInputs::new(request.crop.parse::<Crop>()?, request.area);
    if let Some(season) = request.season.as_deref().filter(|s| !s.trim().is_empty()) {
        inputs = inputs.with_season(season.parse()?);
    }
    if let Some(method) = request.irrigation.as_deref().filter(|s| !s.trim().is_empty()) {
        inputs = inputs.with_irrigation(method.parse()?);
    }

    let report = calculate(&inputs)?;
    let localized = report.localize(&state.translator, language);

    Ok(Json(serde_json::json!({
        "report": report,
        "localized": localized,
    })))
}

#[derive(Debug, Deserialize)]
struct SeasonsQuery {
    language: Option<String>,
}

async fn get_seasons(
    State(state): State<AppState>,
    Query(query): Query<SeasonsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let language = state.language(query.language.as_deref())?;
    let none = Params::new();
    let t = |key: &str| state.translator.resolve(language, key, &none);

    let seasons: Vec<serde_json::Value> = season_calendar()
        .into_iter()
        .map(|plan| {
            serde_json::json!({
                "season": plan.season,
                "name": t(plan.name_key),
                "months": t(plan.months_key),
                "crops": plan.crops,
            })
        })
        .collect();
    let tips: Vec<String> = planning_tip_keys().into_iter().map(t).collect();

    Ok(Json(serde_json::json!({
        "language": language,
        "seasons": seasons,
        "tips": tips,
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl From<EconomicsError> for AppError {
    fn from(e: EconomicsError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
