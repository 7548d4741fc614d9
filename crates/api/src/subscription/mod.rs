pub mod process_charges;
mod subscribers;
pub mod sync_reminders;

use crate::error::KollError;
use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use koll_scheduler_infra::KollContext;
use process_charges::ProcessDueChargesUseCase;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct ProcessChargesResponse {
    processed: usize,
}

async fn process_charges_controller(
    ctx: web::Data<KollContext>,
) -> Result<HttpResponse, KollError> {
    if !ctx.config.scheduler_enabled {
        return Ok(HttpResponse::Ok().json(json!({ "skipped": true })));
    }

    execute(ProcessDueChargesUseCase, &ctx)
        .await
        .map(|charges| {
            HttpResponse::Ok().json(ProcessChargesResponse {
                processed: charges.len(),
            })
        })
        .map_err(KollError::from)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/charges/process", web::post().to(process_charges_controller));
}
