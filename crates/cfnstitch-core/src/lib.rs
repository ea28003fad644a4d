pub mod error;
pub mod fs;
pub mod merge;
pub mod model;
pub mod resolver;
pub mod scanner;

use anyhow::{Context, Result};
use std::io::Write;

/// Merge a root template and write the result to the selected destination:
/// an output file, a generated temp file (its path goes to stdout), or
/// stdout itself (bare merged text, nothing else).
pub fn cmd_merge(file: &str, output: Option<&str>, temp: bool) -> Result<()> {
    use owo_colors::OwoColorize;

    let merged = merge::merge_file(file).with_context(|| format!("failed to merge '{file}'"))?;

    if let Some(output) = output {
        std::fs::write(output, &merged)
            .with_context(|| format!("failed to write '{output}'"))?;
        println!(
            "{} Merged {} {} {}",
            "✓".bright_green(),
            file.bright_white(),
            "→".bright_black(),
            output.bright_white()
        );
    } else if temp {
        let mut out = tempfile::Builder::new()
            .prefix("cfnstitch-")
            .suffix(".yml")
            .tempfile()
            .context("failed to create temp file")?;
        out.write_all(merged.as_bytes())
            .context("failed to write temp file")?;
        let (_file, path) = out.keep().context("failed to persist temp file")?;
        println!("{}", path.display());
    } else {
        print!("{merged}");
    }

    Ok(())
}

/// Show a template's sections and import references without merging anything.
pub fn cmd_inspect(file: &str) -> Result<()> {
    use comfy_table::presets::UTF8_FULL;
    use comfy_table::{Cell, Row, Table};
    use owo_colors::OwoColorize;

    let template = model::Template::from_root_path(file, &fs::OsFs)
        .with_context(|| format!("failed to load '{file}'"))?;

    println!();
    println!(
        "{} {}",
        "▸".bright_cyan(),
        template.path().as_str().bright_cyan().bold()
    );
    println!();

    let sections = template.sections();
    if sections.is_empty() {
        println!("{} {}", "▸ ".yellow(), "No recognized sections".yellow());
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        for name in sections {
            let lines = template.get_section(name)?.lines().count();
            table.add_row(Row::from(vec![
                Cell::new(name).fg(comfy_table::Color::Cyan),
                Cell::new(format!("{} line(s)", lines)),
            ]));
        }
        println!("{table}");
    }
    println!();

    let imports = template.imports();
    if imports.is_empty() {
        println!("{} {}", "▸".bright_blue(), "No import references".bright_blue());
    } else {
        println!("{} {}:", "▸".bright_blue(), "Imports".bright_blue().bold());
        for import in &imports {
            let kind = if import.is_inline() { "inline" } else { "whole-file" };
            println!(
                "   {} {} {}",
                "•".bright_black(),
                import.resource.bright_white(),
                format!("({kind})").bright_black()
            );
        }
    }
    println!();

    Ok(())
}
