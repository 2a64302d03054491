//! `docflow steps` and `docflow kinds`: catalog listings.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use docflow_core::wizard::catalog::StepCatalog;
use docflow_types::action::ActionKind;
use docflow_types::trigger::TriggerKind;
use docflow_types::wizard::WizardMode;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print the ordered step catalog for a mode.
pub fn list_steps(mode: WizardMode, json: bool) -> Result<()> {
    let catalog = StepCatalog::for_mode(mode);

    if json {
        let steps: Vec<_> = catalog
            .steps()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "title": s.title,
                    "component_ref": s.component_ref,
                })
            })
            .collect();
        let out = serde_json::json!({ "mode": mode, "steps": steps });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Step").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Component").fg(Color::White),
    ]);
    for (index, step) in catalog.steps().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).fg(Color::DarkGrey),
            Cell::new(step.id).fg(Color::Cyan),
            Cell::new(step.title),
            Cell::new(step.component_ref).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("  {} {} wizard", style("▸").bold(), style(mode).cyan().bold());
    println!();
    println!("{table}");
    println!();
    Ok(())
}

/// Print the trigger and action types.
pub fn list_kinds(json: bool) -> Result<()> {
    if json {
        let triggers: Vec<_> = TriggerKind::ALL
            .iter()
            .map(|k| serde_json::json!({ "type": k, "category": k.category() }))
            .collect();
        let actions: Vec<_> = ActionKind::ALL
            .iter()
            .map(|k| serde_json::json!({ "type": k, "routed": k.is_routed() }))
            .collect();
        let out = serde_json::json!({ "triggers": triggers, "actions": actions });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut triggers = new_table();
    triggers.set_header(vec![
        Cell::new("Trigger").fg(Color::White),
        Cell::new("Category").fg(Color::White),
    ]);
    for kind in TriggerKind::ALL {
        triggers.add_row(vec![
            Cell::new(kind).fg(Color::Cyan),
            Cell::new(kind.category()),
        ]);
    }

    let mut actions = new_table();
    actions.set_header(vec![
        Cell::new("Action").fg(Color::White),
        Cell::new("Destination folder").fg(Color::White),
    ]);
    for kind in ActionKind::ALL {
        let routed = if kind.is_routed() {
            Cell::new("required").fg(Color::Yellow)
        } else {
            Cell::new("-").fg(Color::DarkGrey)
        };
        actions.add_row(vec![Cell::new(kind).fg(Color::Cyan), routed]);
    }

    println!();
    println!("{triggers}");
    println!();
    println!("{actions}");
    println!();
    Ok(())
}
