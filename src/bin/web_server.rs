use algoviz::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: web_server [port] [static_dir]
    let args: Vec<String> = env::args().collect();
    let mut config = ServerConfig::default();
    if let Some(port) = args.get(1) {
        config.port = port.parse().unwrap_or(config.port);
    }
    if let Some(dir) = args.get(2) {
        config.static_dir = dir.clone();
    }

    println!("Starting algoviz web server");
    println!("   Port: {}", config.port);
    println!("   Static files: {}", config.static_dir);
    println!("   CORS enabled: {}", config.enable_cors);
    println!("   Max visualizers: {}", config.max_sessions);
    println!("   Frames kept per run: {}", config.max_frames);
    println!();

    start_server_with_config(config).await?;

    Ok(())
}
