use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::info;

use crate::{
    config::ProxyConfig,
    errors::ServerError,
    image_source::BackendImageSource,
    routes::{health, ProxyImageRoute},
};

pub async fn run_server(config: ProxyConfig) -> Result<(), ServerError> {
    let srv = create_server_instance(config)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ProxyConfig) -> Result<Server, ServerError> {
    let source = BackendImageSource::new(&config.image_backend_url, config.backend_timeout)
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🖼️ Proxying images from {}", config.image_backend_url);
    let cache = config.cache;
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mc_proxy::access_log"))
            .app_data(web::Data::new(source.clone()))
            .app_data(web::Data::new(cache))
            .service(health)
            .service(ProxyImageRoute::<BackendImageSource>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
