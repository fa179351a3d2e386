//! Config command for showing the effective seedcheck configuration

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use seedcheck::config::global_config_path;
use seedcheck::paths::PROJECT_CONFIG_FILE;

use super::Context;

/// Print each config layer and the merged result
pub fn cmd_config_show(ctx: &Context, explicit: Option<&Path>) -> Result<()> {
    if !ctx.quiet {
        println!("{}", "Configuration layers:".bold());
        match global_config_path() {
            Some(path) => print_layer("global", &path),
            None => println!("  {:<8} {}", "global", "(no config directory)".dimmed()),
        }
        print_layer("project", Path::new(PROJECT_CONFIG_FILE));
        if let Some(path) = explicit {
            print_layer("explicit", path);
        }
        println!();
        println!("{}", "Effective configuration:".bold());
    }

    print!("{}", serde_yaml::to_string(&ctx.config)?);
    Ok(())
}

fn print_layer(name: &str, path: &Path) {
    let state = if path.exists() {
        "✓".green()
    } else {
        "-".dimmed()
    };
    println!("  {:<8} {} {}", name, state, path.display());
}
