//! MPA CLI — interactive rule-based personal assistant.
//!
//! Thin REPL over the `mpa` library crate: reads utterances from stdin,
//! prints each parsed action as a JSON line, then the cleaned reply.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use mpa::actions::{clean_response, parse_actions};
use mpa::assistant::Assistant;
use mpa::config::Config;
use mpa::profile::{AssistantProfile, ProfileStore};

/// MPA — a rule-based personal assistant with reminders, translations,
/// calls, media playback, and WhatsApp messaging.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Profile database path (overrides MPA_DATABASE_PATH).
    #[arg(long)]
    database: Option<String>,

    /// Caller identity attached to every message.
    #[arg(long)]
    caller: Option<String>,

    /// Lock the assistant to this registered user at startup.
    #[arg(long)]
    owner: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let args = Args::parse();
    let database_path = args.database.unwrap_or(config.database_path);

    let mut assistant = match ProfileStore::open(&database_path) {
        Ok(store) => Assistant::new(store),
        Err(e) => {
            warn!("Profile store unavailable ({}), falling back to in-memory defaults", e);
            Assistant::with_profile(AssistantProfile::default())
        }
    };

    if let Some(owner) = args.owner.or(config.registered_user) {
        assistant.set_registered_user(Some(owner.as_str()));
    }

    info!("Starting MPA REPL");
    println!("{}", assistant.greeting());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }
        if let Some(command) = trimmed.strip_prefix('/') {
            handle_session_command(&mut assistant, command, &mut stdout)?;
            continue;
        }

        let reply = assistant.process_message(trimmed, args.caller.as_deref());
        for action in parse_actions(&reply) {
            writeln!(stdout, "[action] {}", serde_json::to_string(&action)?)?;
        }
        writeln!(stdout, "MPA: {}", clean_response(&reply))?;
        stdout.flush()?;
    }

    Ok(())
}

/// Session commands mutate the profile without going through the
/// language pipeline.
fn handle_session_command(
    assistant: &mut Assistant,
    command: &str,
    stdout: &mut impl Write,
) -> Result<()> {
    let mut parts = command.splitn(2, ' ');
    let name = parts.next().unwrap_or("");
    let argument = parts.next().unwrap_or("").trim();

    match name {
        "name" if !argument.is_empty() => {
            assistant.set_user_name(argument)?;
            writeln!(stdout, "Okay, I'll call you {}.", argument)?;
        }
        "gender" if !argument.is_empty() => {
            assistant.set_gender(argument)?;
            writeln!(stdout, "Gender preference saved.")?;
        }
        "language" if !argument.is_empty() => {
            assistant.set_language(argument)?;
            writeln!(stdout, "Language preference saved.")?;
        }
        "register" => {
            if argument.is_empty() {
                assistant.set_registered_user(None);
                writeln!(stdout, "Open mode: anyone can talk to me now.")?;
            } else {
                assistant.set_registered_user(Some(argument));
                writeln!(stdout, "Locked: I'll only take requests from {}.", argument)?;
            }
        }
        "profile" => {
            let profile = assistant.profile();
            writeln!(
                stdout,
                "name: {} | gender: {} | language: {} | registered user: {}",
                profile.user_name,
                profile.gender,
                profile.language,
                profile.registered_user.as_deref().unwrap_or("(none)")
            )?;
        }
        "help" => {
            writeln!(
                stdout,
                "Session commands: /name <name>, /gender <gender>, /language <code>, /register [user], /profile, /help. Type quit to leave."
            )?;
        }
        _ => {
            writeln!(stdout, "Unknown command. Try /help.")?;
        }
    }
    stdout.flush()?;
    Ok(())
}
