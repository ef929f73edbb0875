use anyhow::Context;
use clap::{Parser, Subcommand};
use newsletter_sender::configuration::get_configuration;
use newsletter_sender::startup::{exit_status, render_newsletter, run};
use newsletter_sender::telemetry::{get_subscriber, init_subscriber};
use std::process::ExitCode;

/// Email the latest markdown newsletter to every subscriber.
#[derive(Parser)]
#[command(name = "newsletter_sender")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Send the newsletter (default)
    Send,
    /// Print the rendered newsletter instead of sending it
    Preview {
        /// Print the plain-text part instead of the HTML document
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine: the environment may be set up already.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let subscriber = get_subscriber("newsletter_sender".into(), cli.log_level, std::io::stdout);
    if let Err(e) = init_subscriber(subscriber) {
        eprintln!("Failed to initialise logging: {:?}", e);
        return ExitCode::FAILURE;
    }

    match execute(cli.command.unwrap_or(Command::Send)).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Newsletter run aborted");
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command) -> anyhow::Result<ExitCode> {
    let settings = get_configuration().context("Failed to read configuration")?;
    match command {
        Command::Send => {
            let outcome = run(&settings).await;
            let status = exit_status(&outcome);
            println!("{}", outcome?);
            Ok(ExitCode::from(status))
        }
        Command::Preview { plain } => {
            let email = render_newsletter(&settings)?;
            if plain {
                println!("{}", email.plain_text);
            } else {
                println!("{}", email.html_body);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
