use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{page, SchoolExplorer};
use crate::models::{
    ErrorResponse, HealthResponse, ListSchoolsQuery, RecommendResponse, School, SchoolPage,
    SearchRequest, SearchResponse, StudentProfile,
};
use crate::routes::validation_error;
use crate::services::{CatalogCache, CatalogError, FailureKind, SchoolCatalog};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<SchoolCatalog>,
    pub cache: Arc<CatalogCache>,
    pub explorer: SchoolExplorer,
}

impl AppState {
    async fn schools(&self) -> Result<Arc<Vec<School>>, CatalogError> {
        self.cache.get_or_load(&self.catalog).await
    }

    /// One page plus the catalog size; postgres pages in the database
    async fn school_page(&self, offset: usize, limit: usize) -> Result<(Vec<School>, usize), CatalogError> {
        match self.catalog.as_ref() {
            SchoolCatalog::Postgres(pg) => Ok((pg.list_page(offset, limit).await?, pg.count().await?)),
            _ => {
                let schools = self.schools().await?;
                Ok((page(schools.as_slice(), offset, limit), schools.len()))
            }
        }
    }
}

/// Configure all school directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schools", web::get().to(list_schools))
        .route("/schools/search", web::post().to(search_schools))
        .route("/schools/recommend", web::post().to(recommend_schools));
}

/// Map a catalog failure to a JSON error with a status matching its category
fn catalog_error(e: &CatalogError) -> HttpResponse {
    let (status, error) = match e.kind() {
        FailureKind::Network => (StatusCode::SERVICE_UNAVAILABLE, "Catalog unreachable"),
        FailureKind::Api => (StatusCode::BAD_GATEWAY, "Catalog service error"),
        FailureKind::Data => (StatusCode::BAD_GATEWAY, "Catalog data invalid"),
        FailureKind::Unknown => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load catalog"),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: e.to_string(),
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.catalog.as_ref() {
        SchoolCatalog::Postgres(pg) => pg.health_check().await.unwrap_or(false),
        _ => true,
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_source: state.catalog.source_name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Paged catalog listing
///
/// GET /api/v1/schools?offset=0&limit=20
async fn list_schools(
    state: web::Data<AppState>,
    query: web::Query<ListSchoolsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let (schools, total) = match state.school_page(query.offset, query.limit).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Failed to load catalog page: {}", e);
            return catalog_error(&e);
        }
    };

    HttpResponse::Ok().json(SchoolPage {
        schools,
        offset: query.offset,
        limit: query.limit,
        total,
    })
}

/// Directory search endpoint
///
/// POST /api/v1/schools/search
///
/// Request body:
/// ```json
/// {
///   "criteria": { "query": "finance", "region": "Europe", "rankingTier": "top-25", "feeTier": "all" },
///   "profile": { "gmatScore": 700, "experience": 4 },
///   "offset": 0,
///   "limit": 20
/// }
/// ```
async fn search_schools(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let schools = match state.schools().await {
        Ok(schools) => schools,
        Err(e) => {
            tracing::error!("Failed to load catalog for search: {}", e);
            return catalog_error(&e);
        }
    };

    let result = state
        .explorer
        .explore(schools.as_slice(), &req.criteria, req.profile.as_ref());

    tracing::debug!(
        "Search matched {} of {} schools (criteria: {:?})",
        result.schools.len(),
        result.total_schools,
        req.criteria
    );

    HttpResponse::Ok().json(SearchResponse {
        total_matches: result.schools.len(),
        schools: page(result.schools.as_slice(), req.offset, req.limit),
        recommendations: result.recommendation.map(|r| r.recommendations),
        total_schools: result.total_schools,
    })
}

/// Fit recommendation endpoint
///
/// POST /api/v1/schools/recommend
///
/// Request body:
/// ```json
/// {
///   "gmatScore": 720,
///   "experience": 5,
///   "preferredLocation": "Europe",
///   "budget": "medium",
///   "careerGoal": "consulting"
/// }
/// ```
async fn recommend_schools(
    state: web::Data<AppState>,
    profile: web::Json<StudentProfile>,
) -> impl Responder {
    let schools = match state.schools().await {
        Ok(schools) => schools,
        Err(e) => {
            tracing::error!("Failed to load catalog for recommendations: {}", e);
            return catalog_error(&e);
        }
    };

    let result = state.explorer.recommend(schools.as_slice(), &profile);

    tracing::info!(
        "Returning {} recommendations (from {} schools)",
        result.recommendations.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn test_state() -> AppState {
        AppState {
            catalog: Arc::new(SchoolCatalog::bundled().unwrap()),
            cache: Arc::new(CatalogCache::new(60)),
            explorer: SchoolExplorer::default(),
        }
    }

    #[actix_web::test]
    async fn test_health_reports_source() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["catalog_source"], "bundled");
    }

    #[actix_web::test]
    async fn test_list_pages_catalog() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/schools?offset=2&limit=3").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["schools"].as_array().unwrap().len(), 3);
        assert_eq!(body["schools"][0]["id"], 3);
        assert_eq!(body["offset"], 2);
    }

    #[actix_web::test]
    async fn test_list_rejects_oversized_limit() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/schools?limit=500").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_search_filters_and_ranks() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/schools/search")
            .set_json(json!({
                "criteria": {"region": "Europe", "rankingTier": "top-10", "feeTier": "all"},
                "profile": {"gmatScore": 710, "experience": 5, "preferredLocation": "Europe"}
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let schools = body["schools"].as_array().unwrap();
        assert!(!schools.is_empty());
        assert!(schools.iter().all(|s| s["region"] == "Europe"));
        assert!(schools.iter().all(|s| s["ranking"].as_u64().unwrap() <= 10));
        assert!(body["recommendations"].is_array());
    }

    #[actix_web::test]
    async fn test_recommend_returns_sorted_list() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/schools/recommend")
            .set_json(json!({"gmatScore": 720, "experience": 5, "budget": "all"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let scores: Vec<f64> = body["recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["fitScore"].as_f64().unwrap())
            .collect();

        assert!(!scores.is_empty());
        assert!(scores.len() <= 8);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| *s > 50.0));
    }
}
