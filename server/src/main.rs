use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use common::{db, models::Client};
use dotenv::dotenv;
use sqlx::{Pool, Postgres};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[actix_web::get("/api/client/getAll")]
async fn get_all_clients(app_state: web::Data<AppState>) -> impl Responder {
    let AppState { pool } = &**app_state;

    match db::get_all_clients(pool).await {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(e) => {
            error!("Failed to fetch clients: {}", e);
            HttpResponse::InternalServerError()
                .body(format!("An error occurred while fetching clients: {}", e))
        }
    }
}

#[actix_web::post("/api/client/add")]
async fn add_client(req: web::Json<Client>, app_state: web::Data<AppState>) -> impl Responder {
    let AppState { pool } = &**app_state;
    let candidate = req.into_inner();
    info!("Adding client {} {}", candidate.first_name, candidate.last_name);

    match db::add_client(pool, &candidate).await {
        Ok(created) => HttpResponse::Created()
            .insert_header(("Location", "/api/client/getAll"))
            .json(created),
        Err(e) => {
            error!("Failed to add client: {}", e);
            HttpResponse::InternalServerError()
                .body(format!("An error occurred while adding client: {}", e))
        }
    }
}

#[actix_web::put("/api/client/update")]
async fn update_client(req: web::Json<Client>, app_state: web::Data<AppState>) -> impl Responder {
    let AppState { pool } = &**app_state;
    let client = req.into_inner();
    info!("Updating client {}", client.client_id);

    match db::update_client(pool, &client).await {
        Ok(Some(updated)) => HttpResponse::Ok().json(updated),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(e) => {
            error!("Failed to update client {}: {}", client.client_id, e);
            HttpResponse::InternalServerError()
                .body(format!("An error occurred while updating client: {}", e))
        }
    }
}

#[actix_web::delete("/api/client/delete/{client_id}")]
async fn delete_client(path: web::Path<i32>, app_state: web::Data<AppState>) -> impl Responder {
    let AppState { pool } = &**app_state;
    let client_id = path.into_inner();
    info!("Deleting client {}", client_id);

    match db::delete_client(pool, client_id).await {
        Ok(Some(deleted)) => HttpResponse::Ok().json(deleted),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(e) => {
            error!("Failed to delete client {}: {}", client_id, e);
            HttpResponse::InternalServerError()
                .body(format!("An error occurred while deleting client: {}", e))
        }
    }
}

#[actix_web::get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

struct AppState {
    pool: Pool<Postgres>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    info!("Starting the client manager service");
    let pool = db::establish_connection(&config.database_url).await?;
    let app_state = web::Data::new(AppState { pool });

    let allowed_origins = config.allowed_origins.clone();
    info!("Starting HTTP server on {}", config.server_address());
    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_header()
            .allow_any_method();

        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .service(health_check)
            .service(get_all_clients)
            .service(add_client)
            .service(update_client)
            .service(delete_client)
    })
    .bind(config.server_address())?
    .run()
    .await?;

    Ok(())
}
