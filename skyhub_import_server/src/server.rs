use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::error;
use skyhub_import_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    OrderImportApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::skyhub::SkyHubGateway,
    routes::{health, import_orders, order_by_code},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    // The default failed-import subscriber: log the error together with the verbatim payload, so a failed reference
    // can be diagnosed and replayed without going back to the marketplace.
    let mut hooks = EventHooks::default();
    hooks.on_import_failed(|event| {
        Box::pin(async move {
            error!("🔔️ Importing order [{}] failed: {}. Payload: {}", event.code, event.error, event.payload);
        })
    });
    let handlers = EventHandlers::new(32, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let gateway =
        SkyHubGateway::new(config.skyhub.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let api = OrderImportApi::new(db.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("soi::access_log"))
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(health)
            .service(web::resource("/import").route(web::post().to(import_orders::<SqliteDatabase, SkyHubGateway>)))
            .service(web::resource("/order/{code}").route(web::get().to(order_by_code::<SqliteDatabase>)))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
