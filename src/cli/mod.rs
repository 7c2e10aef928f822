//! CLI argument parsing and command routing

pub mod repl;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{adapter::Policy, config::Overrides};

/// ollama-bridge: OpenAI-compatible front end for a local Ollama engine
#[derive(Debug, Parser)]
#[command(name = "ollama-bridge")]
#[command(about = "OpenAI-compatible front end for a local Ollama engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Engine and server settings
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command that reaches the engine
#[derive(Debug, Clone, Default, Args)]
pub struct EngineArgs {
    /// Engine base URL
    #[arg(long, global = true, env = "BRIDGE_ENGINE_URL")]
    pub engine_url: Option<String>,

    /// Model identifier passed to the engine
    #[arg(long, global = true, env = "BRIDGE_MODEL")]
    pub model: Option<String>,

    /// Seconds before an engine call is abandoned
    #[arg(long, global = true, env = "BRIDGE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Request policy
    #[arg(long, global = true, value_enum, env = "BRIDGE_POLICY")]
    pub policy: Option<Policy>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the OpenAI-compatible HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "BRIDGE_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, env = "BRIDGE_PORT")]
        port: Option<u16>,

        /// Model name reported to callers
        #[arg(long, env = "BRIDGE_SERVED_MODEL")]
        served_model_name: Option<String>,
    },

    /// Run a single prompt through the adapter
    Generate {
        /// The prompt to send
        prompt: String,

        /// Maximum tokens to generate
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,

        /// Nucleus sampling cutoff
        #[arg(long)]
        top_p: Option<f32>,
    },

    /// Interactive chat loop (type `quit` to exit)
    Chat {
        /// Talk to the hosted provider instead of the local engine
        #[arg(long)]
        hosted: bool,

        /// System message sent ahead of each turn (ignored by the refusal policy)
        #[arg(long)]
        system: Option<String>,
    },

    /// Print the effective configuration as JSON
    Config,
}

impl Cli {
    /// Parse CLI arguments from environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Collect flag and environment values that override the config file
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            engine_url: self.engine.engine_url.clone(),
            model: self.engine.model.clone(),
            timeout_secs: self.engine.timeout_secs,
            policy: self.engine.policy,
            ..Overrides::default()
        };

        if let Commands::Serve {
            host,
            port,
            served_model_name,
        } = &self.command
        {
            overrides.host.clone_from(host);
            overrides.port = *port;
            overrides.served_model_name.clone_from(served_model_name);
        }

        overrides
    }
}
