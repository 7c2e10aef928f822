//! ollama-bridge binary entry point

use std::time::Instant;

use color_eyre::Result;
use ollama_bridge::{
    adapter::{FormatAdapter, SamplingParams},
    cli::{repl, Cli, Commands},
    config::Config,
    server::{self, AppState},
    services::HostedClient,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Install error handler
    color_eyre::install()?;

    // Pick up OPENAI_API_KEY and BRIDGE_* from a local .env, if any
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ollama_bridge=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply(cli.overrides());
    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            let addr = config.server.socket_addr()?;
            let adapter = FormatAdapter::from_config(&config)?;
            server::run_server(AppState::new(adapter), addr).await?;
        }
        Commands::Generate {
            prompt,
            max_tokens,
            temperature,
            top_p,
        } => {
            let adapter = FormatAdapter::from_config(&config)?;
            let started = Instant::now();
            let response = adapter
                .translate_completion(&prompt, SamplingParams::new(max_tokens, temperature, top_p))
                .await?;
            println!("{}", response.text().unwrap_or_default());
            eprintln!(
                "Response generated in {:.2} seconds ({} tokens)",
                started.elapsed().as_secs_f64(),
                response.usage.completion_tokens
            );
        }
        Commands::Chat { hosted, system } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            if hosted {
                let client = HostedClient::from_env(&config.hosted)?;
                repl::run(&client, system.as_deref(), stdin, &mut stdout).await?;
            } else {
                let adapter = FormatAdapter::from_config(&config)?;
                repl::run(&adapter, system.as_deref(), stdin, &mut stdout).await?;
            }
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
