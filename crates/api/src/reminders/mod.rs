pub mod check_reminders;
pub mod pipeline;

use crate::error::KollError;
use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use check_reminders::CheckRemindersUseCase;
use koll_scheduler_infra::KollContext;
use serde_json::json;

async fn check_reminders_controller(
    ctx: web::Data<KollContext>,
) -> Result<HttpResponse, KollError> {
    if !ctx.config.scheduler_enabled {
        return Ok(HttpResponse::Ok().json(json!({ "skipped": true })));
    }

    let usecase = CheckRemindersUseCase {
        mode: ctx.config.evaluation_mode,
    };
    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(report))
        .map_err(KollError::from)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders/check", web::post().to(check_reminders_controller));
}
