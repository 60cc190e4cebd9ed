//! coach CLI: classify a turn, run the memory chain, verify a phone number. Config from env.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use coach_cli::{CannedReplyHandler, Cli, CoachConfig, Commands};
use coach_core::{init_tracing, HandlerResponse, Message, User};
use handler_chain::HandlerChain;
use memory::{MemoryHandler, MemoryHandlerConfig, MemoryProcessor, PENDING_SCAN_LIMIT};
use memory_core::{ConversationTurn, MemoryNoteStore, NoteQuery, SettingsContext};
use memory_extractor::MemoryExtractor;
use memory_inmemory::{InMemoryConversationHistory, InMemoryNoteStore};
use middleware::{AuthHandler, LoggingHandler};
use tracing::info;
use verification::{SystemClock, VerificationService};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CoachConfig::load()?;

    match cli.command {
        Commands::Classify {
            user_message,
            coach_response,
            coaching_focus,
            communication_tone,
        } => {
            init_stderr_tracing();
            handle_classify(
                &config,
                user_message,
                coach_response,
                coaching_focus,
                communication_tone,
            )
        }
        Commands::Process {
            owner,
            user_message,
            coach_response,
            force,
        } => {
            init_tracing(&config.log_file)?;
            handle_process(&config, owner, user_message, coach_response, force).await
        }
        Commands::Verify { phone } => {
            init_stderr_tracing();
            handle_verify(&config, &phone)
        }
    }
}

/// Plain fmt subscriber on stderr, so stdout stays machine-readable.
fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_classify(
    config: &CoachConfig,
    user_message: String,
    coach_response: Option<String>,
    coaching_focus: Option<String>,
    communication_tone: Option<String>,
) -> Result<()> {
    let extractor = MemoryExtractor::with_config(config.extractor.clone());

    let mut turn = ConversationTurn::new(user_message);
    if let Some(reply) = coach_response {
        turn = turn.with_coach_response(reply);
    }
    if coaching_focus.is_some() || communication_tone.is_some() {
        turn = turn.with_settings(SettingsContext {
            coaching_focus,
            communication_tone,
        });
    }

    let extractions = extractor.extract(&turn);
    println!(
        "{}",
        serde_json::to_string_pretty(&extractions).context("Serialize extractions")?
    );
    Ok(())
}

async fn handle_process(
    config: &CoachConfig,
    owner: String,
    user_message: String,
    coach_response: Option<String>,
    force: bool,
) -> Result<()> {
    let store = Arc::new(InMemoryNoteStore::new());
    let history = Arc::new(InMemoryConversationHistory::new());
    let processor = Arc::new(
        MemoryProcessor::new(
            Arc::new(MemoryExtractor::with_config(config.extractor.clone())),
            store.clone(),
        )
        .with_history(history),
    );

    let memory_handler = MemoryHandler::new(
        processor.clone(),
        MemoryHandlerConfig {
            force,
            ..Default::default()
        },
    );

    let chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(config.allowed_owners.clone())))
        .add_handler(Arc::new(memory_handler))
        .add_handler(Arc::new(CannedReplyHandler::new(coach_response)));

    let message = Message::incoming(User::new(owner.as_str()), user_message);
    let response = chain
        .handle(&message)
        .await
        .context("Handler chain failed")?;
    info!(response = ?response, "step: chain finished");

    let stats = processor
        .processing_stats(&owner)
        .await
        .context("Load processing stats")?;
    let pending = processor
        .pending_interactions(&owner, PENDING_SCAN_LIMIT)
        .await
        .context("List pending interactions")?;
    let notes = store
        .list(&owner, &NoteQuery::default())
        .await
        .context("List notes")?;

    let reply = match response {
        HandlerResponse::Reply(text) => Some(text),
        _ => None,
    };
    let output = serde_json::json!({
        "reply": reply,
        "stats": stats,
        "pendingInteractions": pending.len(),
        "notes": notes,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Serialize output")?
    );
    Ok(())
}

fn handle_verify(config: &CoachConfig, phone: &str) -> Result<()> {
    let service = VerificationService::with_clock(SystemClock, config.verification_code_ttl());

    let issued = service
        .send_code(phone)
        .context("Issue verification code")?;
    println!(
        "Code for {}: {} (expires at {})",
        issued.phone_number, issued.code, issued.expires_at
    );

    print!("Enter code: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Read code from stdin")?;

    let verified = service
        .check_code(phone, &line)
        .context("Check verification code")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&verified).context("Serialize result")?
    );
    Ok(())
}
