use dotenvy::dotenv;
use log::info;
use mc_image_proxy::{cli::handle_command_line_args, config::ProxyConfig, server::run_server};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = ProxyConfig::from_env_or_default();

    info!("🚀️ Starting image proxy on {}:{}", config.host, config.port);
    match run_server(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}
