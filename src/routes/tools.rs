use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;
use crate::models::{CutoffRequest, ErrorResponse, PercentileRequest};
use crate::routes::validation_error;
use crate::tools::{assess_eligibility, estimate_cost, percentile_report, predict_chance, CostInput, EligibilityInput};

/// Configure calculator routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/tools/percentile", web::post().to(percentile))
        .route("/tools/cutoff", web::post().to(cutoff))
        .route("/tools/eligibility", web::post().to(eligibility))
        .route("/tools/cost", web::post().to(cost));
}

/// GMAT score -> percentile and application advice
async fn percentile(req: web::Json<PercentileRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match percentile_report(req.gmat_score) {
        Some(report) => HttpResponse::Ok().json(report),
        None => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid score".to_string(),
            message: format!("GMAT score {} is outside the 200-800 scale", req.gmat_score),
            status_code: 400,
        }),
    }
}

async fn cutoff(req: web::Json<CutoffRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let chance = predict_chance(req.percentile, req.school_cutoff);

    HttpResponse::Ok().json(json!({
        "percentile": req.percentile,
        "schoolCutoff": req.school_cutoff,
        "margin": req.percentile - req.school_cutoff,
        "chance": chance,
    }))
}

async fn eligibility(req: web::Json<EligibilityInput>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    HttpResponse::Ok().json(assess_eligibility(&req))
}

async fn cost(req: web::Json<CostInput>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    HttpResponse::Ok().json(estimate_cost(&req))
}
