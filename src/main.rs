use anyhow::Result;
use clap::Parser;
use hexlink::config;
use hexlink::server;
use tracing_subscriber::EnvFilter;

/// In-memory URL shortener.
///
/// Settings are read from the environment (and `.env`); flags override them.
#[derive(Parser)]
#[command(name = "hexlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, e.g. 127.0.0.1:8080 (overrides LISTEN)
    #[arg(short, long)]
    listen: Option<String>,

    /// Short code length (overrides CODE_LENGTH)
    #[arg(short, long)]
    code_length: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(code_length) = cli.code_length {
        config.code_length = code_length;
    }
    config.validate()?;

    init_tracing(&config.log_level, &config.log_format)?;
    config.print_summary();

    server::run(config).await
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
