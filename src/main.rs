use std::collections::HashMap;

use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use matchbot_nlu::ChatPipeline;

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    context: HashMap<String, Value>,
    #[allow(dead_code)]
    user_id: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    default_catalog: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

#[post("/chat")]
async fn chat_endpoint(
    req: web::Json<ChatRequest>,
    pipeline: web::Data<ChatPipeline>,
) -> impl Responder {
    match pipeline.handle(&req.message, &req.context) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            detail: err.to_string(),
        }),
    }
}

#[get("/health")]
async fn health_endpoint(pipeline: web::Data<ChatPipeline>) -> impl Responder {
    let status = if pipeline.ready() { "ok" } else { "unavailable" };
    HttpResponse::Ok().json(HealthResponse {
        status,
        service: "matchbot-nlu",
        default_catalog: pipeline.used_default_catalog(),
    })
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = config::Config::builder()
        .set_default("data.intents_file", "data/intents.json")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8000_i64)?
        .add_source(config::File::with_name("Config").required(false))
        .build()?;

    let intents_file = settings.get_string("data.intents_file")?;
    let host = settings.get_string("server.host")?;
    let port = settings.get_int("server.port")? as u16;

    let pipeline = ChatPipeline::from_path(&intents_file);
    log::info!(
        "Initializing chat pipeline with {} intents...",
        pipeline.intent_count()
    );
    let data = web::Data::new(pipeline);

    log::info!("Starting server at http://{}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(health_endpoint)
            .service(chat_endpoint)
    })
    .bind((host, port))?
    .run()
    .await?;
    Ok(())
}
