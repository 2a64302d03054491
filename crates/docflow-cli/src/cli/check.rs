//! `docflow check`: step-by-step validation of a draft file.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use docflow_core::wizard::controller::WizardController;
use docflow_core::wizard::validator::StepStatus;
use docflow_infra::files::load_draft;
use docflow_infra::workflows::discover_existing_workflows;
use docflow_types::wizard::WizardMode;

use crate::state::AppState;

/// Validate every step of the draft in `file` for `mode`.
pub async fn check_draft(
    state: &AppState,
    file: &Path,
    mode: WizardMode,
    workflows_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let draft = load_draft(file).await?;
    let existing = discover_existing_workflows(&state.workflows_dir(workflows_dir)).await?;
    let wizard = WizardController::with_draft(mode, draft, existing, &state.config);

    let rows: Vec<_> = wizard
        .catalog()
        .steps()
        .iter()
        .zip(wizard.step_summaries())
        .map(|(step, (_, summary))| (step, wizard.step_status(step.id), summary))
        .collect();
    let conflict = wizard.conflict();
    let complete = wizard.is_draft_complete();

    if json {
        let steps: Vec<_> = rows
            .iter()
            .map(|(step, status, summary)| {
                serde_json::json!({
                    "id": step.id,
                    "title": step.title,
                    "status": status,
                    "hint": status.message(),
                    "summary": summary,
                })
            })
            .collect();
        let out = serde_json::json!({
            "name": wizard.draft().name,
            "mode": mode,
            "steps": steps,
            "conflict": conflict,
            "complete": complete,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Step").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Summary").fg(Color::White),
    ]);

    for (step, status, summary) in &rows {
        let status_cell = match status {
            StepStatus::Valid => Cell::new("✓ valid").fg(Color::Green),
            StepStatus::Incomplete { hint } => Cell::new(format!("✗ {hint}")).fg(Color::Yellow),
            StepStatus::Conflict { .. } => {
                Cell::new(format!("✗ {}", status.message().unwrap_or_default())).fg(Color::Red)
            }
        };
        table.add_row(vec![
            Cell::new(step.title).fg(Color::Cyan),
            status_cell,
            Cell::new(summary),
        ]);
    }

    println!();
    println!(
        "  {} Checking '{}' ({} wizard)",
        style("🔍").bold(),
        style(&wizard.draft().name).cyan(),
        mode
    );
    println!();
    println!("{table}");
    println!();

    if let Some(name) = &conflict.conflicting_workflow_name {
        println!(
            "  {} Trigger already used by '{}'",
            style("!").red().bold(),
            style(name).yellow()
        );
    }
    if complete {
        println!("  {} Ready to save", style("✓").green().bold());
    } else {
        println!("  {} Draft is incomplete", style("✗").red().bold());
    }
    println!();

    Ok(())
}
