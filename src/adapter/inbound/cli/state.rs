//! Handlers for `halt` and `resume`.

use std::path::Path;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use serde_json::json;

use crate::adapter::inbound::cli::command::{HaltArgs, ResumeArgs};
use crate::adapter::inbound::cli::{operator, output};
use crate::application::CommandOutcome;
use crate::domain::TargetState;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;

/// Execute `halt`.
pub async fn execute_halt(args: &HaltArgs) -> Result<()> {
    submit(
        &args.config,
        TargetState::Halted,
        args.liquidate,
        &args.reason,
        args.yes,
    )
    .await
}

/// Execute `resume`.
pub async fn execute_resume(args: &ResumeArgs) -> Result<()> {
    submit(&args.config, TargetState::Active, false, &args.reason, args.yes).await
}

async fn submit(
    config_path: &Path,
    target: TargetState,
    liquidate: bool,
    reason: &str,
    skip_confirm: bool,
) -> Result<()> {
    let config = operator::load_config(config_path)?;
    let console = bootstrap::build_console(&config);

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Service", &config.control.base_url);
        output::field("Operator", console.operator_id());
        output::field("Command", output::highlight(target.verb()));
        if liquidate {
            output::field("Liquidate", output::negative("yes"));
        }
        output::field("Reason", reason);
        println!();
    }

    if !skip_confirm && !confirm(target, liquidate)? {
        output::note("Aborted.");
        return Ok(());
    }

    let spinner = output::spinner(&format!("Sending {}", target.verb()));
    let result = console.set_state(target, liquidate, reason).await;
    let view = console.state().view();

    match result {
        Ok(CommandOutcome::Completed(response)) if response.success => {
            output::spinner_success(&spinner, &format!("{} accepted", capitalize(target.verb())));
            emit_result(target, true, &response.message, view.halted);
            Ok(())
        }
        Ok(CommandOutcome::Completed(response)) => {
            output::spinner_fail(&spinner, &format!("{} rejected", capitalize(target.verb())));
            emit_result(target, false, &response.message, view.halted);
            Err(Error::Rejected(response.message))
        }
        Ok(CommandOutcome::AlreadyInFlight) => {
            spinner.finish_and_clear();
            output::warning("A command is already in flight");
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&spinner, &e.operator_message());
            Err(e.into())
        }
    }
}

fn confirm(target: TargetState, liquidate: bool) -> Result<bool> {
    let prompt = match (target, liquidate) {
        (TargetState::Halted, true) => "Halt trading and liquidate all positions?",
        (TargetState::Halted, false) => "Halt trading?",
        (TargetState::Active, _) => "Resume trading?",
    };
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn emit_result(target: TargetState, accepted: bool, message: &str, halted: bool) {
    if output::is_json() {
        output::json_output(json!({
            "command": target.verb(),
            "accepted": accepted,
            "message": message,
            "halted": halted,
        }));
        return;
    }
    if !message.is_empty() {
        output::field("Message", message);
    }
    if accepted {
        output::hint("the status feed confirms the change; run `haltctl status` to check");
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
