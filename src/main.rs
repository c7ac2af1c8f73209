//! duo-authapi - run one Duo second-factor attempt from the command line

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use duo_authapi::config::ExtractionConfig;
use duo_authapi::utils::init_logging;
use duo_authapi::{
    AuthenticationEngine, AuthenticationOutcome, Config, DuoClient, InboundParts, RequestExtractor,
    Verdict,
};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "duo-authapi", version, about = "Authenticate a user against the Duo Auth API")]
struct Cli {
    /// YAML configuration file; without it configuration comes from DUO_* variables
    #[arg(short, long, env = "DUO_CONFIG")]
    config: Option<PathBuf>,

    /// Username to authenticate
    #[arg(short, long)]
    username: String,

    /// Factor: auto, push, passcode, sms or phone
    #[arg(short, long)]
    factor: Option<String>,

    /// Device identifier, or "auto"
    #[arg(short, long)]
    device: Option<String>,

    /// Passcode for the passcode factor
    #[arg(short, long)]
    passcode: Option<String>,

    /// Abandon the attempt after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_json) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };
    debug!(?config, "Configuration ready");

    // Present command-line values the way an inbound request would carry them
    let extraction = &config.extraction;
    let mut parameters = HashMap::new();
    for (name, value) in [
        (&extraction.factor_parameter, &cli.factor),
        (&extraction.device_parameter, &cli.device),
        (&extraction.passcode_parameter, &cli.passcode),
    ] {
        if let Some(value) = value {
            parameters.insert(name.clone(), value.clone());
        }
    }
    let inbound = InboundParts {
        parameters,
        ..InboundParts::default()
    };
    let extractor = RequestExtractor::new(ExtractionConfig {
        use_parameters: true,
        ..config.extraction.clone()
    });
    let params = extractor.extract(&inbound, &cli.username)?;

    let client = DuoClient::new(config.credential(), &config.http)?;
    let engine = AuthenticationEngine::new(client);

    let outcome = match cli.deadline_secs {
        Some(secs) => {
            engine
                .authenticate_with_deadline(&params, Duration::from_secs(secs))
                .await
        }
        None => engine.authenticate(&params).await,
    };

    println!("{}", serde_json::to_string_pretty(&summary(&outcome))?);
    Ok(outcome.is_allowed())
}

fn summary(outcome: &AuthenticationOutcome) -> serde_json::Value {
    let detail = match &outcome.verdict {
        Verdict::Denied { reason } => json!({ "reason": reason }),
        Verdict::EnrollmentRequired {
            portal_url,
            message,
        } => json!({ "portal_url": portal_url, "message": message }),
        Verdict::Failed(e) => json!({ "error": e.kind(), "message": e.to_string() }),
        Verdict::Allowed { .. } => json!({}),
    };

    json!({
        "verdict": outcome.verdict.name(),
        "bypass": outcome.verdict.is_bypass(),
        "disposition": outcome.verdict.disposition(),
        "detail": detail,
        "response": outcome.response,
    })
}
