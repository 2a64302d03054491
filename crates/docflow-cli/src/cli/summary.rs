//! `docflow summary`: live-preview text for a draft file.

use std::path::Path;

use anyhow::Result;
use console::style;

use docflow_core::wizard::summary::{natural_summary, technical_summary};
use docflow_infra::files::load_draft;

pub async fn show_summary(file: &Path, json: bool) -> Result<()> {
    let draft = load_draft(file).await?;
    let natural = natural_summary(&draft);
    let technical = technical_summary(&draft);

    if json {
        let out = serde_json::json!({
            "name": draft.name,
            "natural": natural,
            "technical": technical,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&draft.name).cyan().bold());
    println!();
    println!("  {natural}");
    println!();
    println!("  {}", style(technical).dim());
    println!();
    Ok(())
}
