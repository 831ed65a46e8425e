use clap::Parser;
use consulta_proxy::utils::{logger, validation::Validate};
use consulta_proxy::{server, CliConfig, ProxyService, TomlConfig, UpstreamSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting consulta-proxy");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // --config 指定時以 TOML 檔為準
    let settings = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            };
            if let Err(e) = config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            UpstreamSettings::from_provider(&config)
        }
        None => {
            if let Err(e) = cli.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            UpstreamSettings::from_provider(&cli)
        }
    };

    let service = ProxyService::shared(&settings);
    let app = server::router(service);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("✅ Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
