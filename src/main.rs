use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use confirm::adapters::{JsonFileDirectory, OutboxNotifier};
use confirm::config::load_config;
use confirm::ports::AccountId;
use confirm::{
    AppError, ConfirmationRequest, ConfirmationService, OutcomeExt, Result, SendConfirmation,
};

#[derive(Parser)]
#[command(name = "confirm")]
#[command(about = "Send order confirmations through the account directory and outbox")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: .confirm/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one order confirmation and print the reaction as JSON
    Send {
        /// Account to confirm the order for
        #[arg(short, long)]
        account: String,

        /// Order reference quoted in the message
        #[arg(short, long)]
        reference: String,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = run(cli).await.fold(
        |code| code,
        |err: AppError| {
            error!("{err}");
            eprintln!(
                "{}",
                serde_json::json!({ "ok": false, "code": err.code(), "message": err.to_string() })
            );
            err.exit_code()
        },
    );

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config).await?;

    match cli.command {
        Commands::Send { account, reference } => {
            let directory = JsonFileDirectory::new(
                &config.directory_path,
                &config.directory_key,
                config.adapter_timeout(),
            );
            let notifier = OutboxNotifier::new(
                &config.outbox_dir,
                config.max_payload_bytes,
                config.adapter_timeout(),
            );
            let usecase = SendConfirmation::new(ConfirmationService::new(directory, notifier));

            let request = ConfirmationRequest::new(AccountId::new(account), reference);
            let reaction = usecase.execute(&request).await;
            println!("{}", serde_json::to_string(&reaction)?);
            Ok(reaction.exit_code())
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(0)
        }
    }
}
