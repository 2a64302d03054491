//! `docflow templates`: list templates or print one.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use docflow_core::draft::template::{find_template, serialize_template_yaml};
use docflow_core::wizard::summary::natural_summary;
use docflow_infra::templates::all_templates;

use crate::state::AppState;

pub async fn list_templates(state: &AppState, json: bool) -> Result<()> {
    let templates = all_templates(&state.templates_dir()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Key").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Preview").fg(Color::White),
    ]);
    for template in &templates {
        table.add_row(vec![
            Cell::new(&template.key).fg(Color::Cyan),
            Cell::new(&template.title),
            Cell::new(natural_summary(&template.draft)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} template{}",
        style(templates.len()).bold(),
        if templates.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

pub async fn show_template(state: &AppState, key: &str, json: bool) -> Result<()> {
    let templates = all_templates(&state.templates_dir()).await?;
    let template = find_template(&templates, key)?;

    if json {
        println!("{}", serde_json::to_string_pretty(template)?);
    } else {
        print!("{}", serialize_template_yaml(template)?);
    }
    Ok(())
}
