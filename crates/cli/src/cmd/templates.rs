//! Template commands

use super::{confirm, connect, emit_image, finish};
use anyhow::Result;
use badge_core::TemplateRecord;
use cli_lib::AppConfig;
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run_list(config: &AppConfig) -> Result<()> {
    let controller = connect(config);
    let templates = controller.load_templates().await;
    finish(&controller, controller.notifier().current().is_none())?;

    if templates.is_empty() {
        println!("{}", "No templates found".dimmed());
        return Ok(());
    }

    for template in &templates {
        println!("{}", template.name.bold());
        println!("  {}: {}", "Pattern".dimmed(), template.pattern);
        println!("  {}: {}", "Font".dimmed(), template.font);
        println!(
            "  {}: {}/{}",
            "Font size".dimmed(),
            template.font_size_normal,
            template.data_font_size_normal
        );
    }
    Ok(())
}

pub async fn run_show(config: &AppConfig, name: &str) -> Result<()> {
    let controller = connect(config);
    let Some(template) = controller.load_template_settings(name).await else {
        finish(&controller, controller.notifier().current().is_none())?;
        anyhow::bail!("Template not found: {}", name);
    };
    controller.notifier().drain();

    println!("{}", template.name.bold());
    println!("  {} = {}", "pattern".cyan(), template.pattern);
    println!("  {} = {}", "font".cyan(), template.font);
    println!("  {} = {}", "data_font".cyan(), template.effective_data_font());
    println!("  {} = {}", "font_size_normal".cyan(), template.font_size_normal);
    println!("  {} = {}", "data_font_size_normal".cyan(), template.data_font_size_normal);
    println!("  {} = {}", "convert_photo_to_bw".cyan(), template.convert_photo_to_bw);
    println!("  {} = {}", "convert_pattern_to_bw".cyan(), template.convert_pattern_to_bw);
    Ok(())
}

pub async fn run_save(config: &AppConfig, template: TemplateRecord) -> Result<()> {
    let controller = connect(config);
    let saved = controller.save_template(template).await;
    finish(&controller, saved)
}

pub async fn run_delete(config: &AppConfig, name: &str, yes: bool) -> Result<()> {
    let confirmed = yes || confirm(&format!("Delete template \"{}\"?", name))?;
    if !confirmed {
        println!("Cancelled");
        return Ok(());
    }

    let controller = connect(config);
    let deleted = controller.delete_template(name, true).await;
    finish(&controller, deleted)
}

pub async fn run_preview(config: &AppConfig, name: &str, out: Option<&Path>) -> Result<()> {
    let controller = connect(config);
    match controller.preview_template(name).await {
        Some(image) => emit_image(&image, out).await,
        None => anyhow::bail!("Could not preview template \"{}\" (see log for details)", name),
    }
}
