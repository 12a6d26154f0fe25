use celebra_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging)
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir().to_str(),
    );

    tracing::info!("Celebra server starting...");

    // 2. Initialize server state (database, services)
    let state = ServerState::initialize(&config).await;

    // 3. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
