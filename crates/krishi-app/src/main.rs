//! KrishiMitra terminal binary - composition root.
//!
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML
//! 3. Initialize tracing
//! 4. Build the application context (backend, speech seams, gateway clients)
//! 5. Run one-shot mode (--ask / --weather) or the interactive chat loop

mod cli;
mod context;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use krishi_chat::{Sender, TurnOutcome};
use krishi_core::{KrishiConfig, Language};
use krishi_gateway::weather::advisory_for;

use cli::CliArgs;
use context::AppContext;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config_path = args.resolve_config_path();
    let mut config = KrishiConfig::load_or_default(&config_path);

    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    init_tracing(&log_level);

    if let Some(ref name) = args.language {
        match Language::parse(name) {
            Some(lang) => config.general.language = lang,
            None => {
                eprintln!("Unknown language '{}'. Using {}.", name, config.general.language);
            }
        }
    }

    let ctx = AppContext::build(config).await;
    tracing::info!(
        location = %ctx.location.address,
        language = %ctx.engine.language(),
        "KrishiMitra started"
    );

    if args.weather {
        print_weather(&ctx).await;
        return;
    }

    if let Some(question) = args.ask {
        ctx.engine.set_draft(&question);
        print_outcome(ctx.engine.submit().await);
        return;
    }

    run_chat_loop(&ctx).await;
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Interactive chat loop over stdin. Lines starting with `/` are commands.
async fn run_chat_loop(ctx: &AppContext) {
    for message in ctx.engine.transcript() {
        print_message(&message.sender, &message.content);
    }
    println!(
        "(/lang <name> to switch language, /weather for the forecast, \
/translate <code> <text> to translate, /quit to exit)"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
        };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/weather" => print_weather(ctx).await,
            cmd if cmd.starts_with("/translate") => {
                let rest = cmd.trim_start_matches("/translate").trim();
                match rest.split_once(' ') {
                    Some((code, text)) if !text.trim().is_empty() => {
                        println!("{}", ctx.translator.translate(text.trim(), code).await);
                    }
                    _ => println!("Usage: /translate <lang-code> <text>"),
                }
            }
            cmd if cmd.starts_with("/lang") => {
                let name = cmd.trim_start_matches("/lang").trim();
                match Language::parse(name) {
                    Some(lang) => {
                        ctx.engine.set_language(lang);
                        println!("Language set to {}.", lang.label());
                    }
                    None => println!("Unknown language '{}'.", name),
                }
            }
            _ => {
                ctx.engine.set_draft(&line);
                print_outcome(ctx.engine.submit().await);
            }
        }
    }
}

fn print_outcome(result: Result<TurnOutcome, krishi_chat::ChatError>) {
    match result {
        Ok(TurnOutcome::Replied(reply)) | Ok(TurnOutcome::Fallback(reply)) => {
            print_message(&Sender::Assistant, &reply);
        }
        Ok(TurnOutcome::Spoken(_)) => {}
        Ok(TurnOutcome::Ignored) => {}
        Err(e) => println!("[{}]", e),
    }
}

fn print_message(sender: &Sender, content: &str) {
    match sender {
        Sender::User => println!("you: {}", content),
        Sender::Assistant => println!("sahayak: {}", content),
    }
}

async fn print_weather(ctx: &AppContext) {
    match ctx.weather.current().await {
        Ok(current) => {
            println!(
                "{}: {}°C, {} (humidity {}, wind {}, visibility {}, pressure {})",
                ctx.config.weather.place,
                current.temperature_c,
                current.description,
                current.humidity,
                current.wind,
                current.visibility,
                current.pressure
            );
            if let Some(advisory) = advisory_for(&current.condition) {
                println!("{}: {}", advisory.title, advisory.message);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch current weather");
            println!("Weather is unavailable right now.");
        }
    }

    match ctx.weather.forecast().await {
        Ok(daily) => {
            for day in daily {
                println!("  {}  {:>3}°C  {}", day.date, day.temperature_c, day.condition);
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to fetch forecast"),
    }
}
