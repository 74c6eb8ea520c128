use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use post_form::{load_settings, AddTagOutcome, CommandOutcome, PostDraftController, SubmitOutcome};
use shared::protocol::{FormCommand, FormEvent, TagRejection};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing_subscriber::EnvFilter;

mod commands;
mod feed;
mod render;

use commands::{parse_line, InputLine, HELP};
use feed::PostFeed;
use render::{category_choices, render_form};

type Form = PostDraftController<PostFeed>;

#[derive(Parser, Debug)]
struct Args {
    /// Settings file (defaults to ./post_form.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hand drafts over without the required-field checks.
    #[arg(long)]
    loose: bool,
    /// Replay a JSON-lines file of form commands instead of reading stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if args.loose {
        settings.enforce_validation = false;
    }
    tracing::debug!(?settings, "form settings loaded");

    let mut form = PostDraftController::new(settings, PostFeed::default());

    if let Some(script) = args.script {
        run_script(&mut form, &script)?;
        print_posts(&form)?;
        return Ok(());
    }

    run_interactive(&mut form).await
}

fn run_script(form: &mut Form, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script '{}'", path.display()))?;

    for (number, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let command: FormCommand = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed command", path.display(), number + 1))?;
        let outcome = form
            .handle(command)
            .with_context(|| format!("{}:{}: command rejected", path.display(), number + 1))?;
        if let CommandOutcome::Submit(SubmitOutcome::Invalid) = outcome {
            eprint!("{}", render_form(form));
        }
    }
    Ok(())
}

async fn run_interactive(form: &mut Form) -> Result<()> {
    let mut events = form.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("categories: {}", category_choices());
    println!("type 'help' for commands");
    print!("{}", render_form(form));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(InputLine::Quit) => break,
                    Ok(InputLine::Empty) => {}
                    Ok(InputLine::Help) => println!("{HELP}"),
                    Ok(InputLine::Show) => print!("{}", render_form(form)),
                    Ok(InputLine::Posts) => print_posts(form)?,
                    Ok(InputLine::Form(commands)) => {
                        for command in commands {
                            match form.handle(command) {
                                Ok(outcome) => report(&outcome),
                                Err(err) => println!("error: {err}"),
                            }
                        }
                        print!("{}", render_form(form));
                    }
                    Err(err) => println!("error: {err:#}"),
                }
            }
            event = events.recv() => match event {
                Ok(FormEvent::SuccessCleared) => print!("{}", render_form(form)),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "form event receiver lagged");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    form.teardown();
    Ok(())
}

fn report(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Tag(AddTagOutcome::Rejected(reason)) => {
            let why = match reason {
                TagRejection::Blank => "tag is empty",
                TagRejection::Duplicate => "tag already added",
                TagRejection::AtCapacity => "a post can carry at most 5 tags",
            };
            println!("(tag not added: {why})");
        }
        CommandOutcome::TagDeleted(None) => println!("(no tag at that index)"),
        _ => {}
    }
}

fn print_posts(form: &Form) -> Result<()> {
    let posts = serde_json::to_string_pretty(form.sink().entries())
        .context("failed to serialize post feed")?;
    println!("{posts}");
    Ok(())
}
