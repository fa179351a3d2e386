//! Create, update and status-update commands.

use anyhow::Result;
use std::path::Path;

use seedcheck::config::OutputFormat;
use seedcheck::field::DiagnosticList;
use seedcheck::formatters::{format_json_report, format_text_report, Operation, Report};
use seedcheck::seed::Seed;
use seedcheck::validation::SeedValidator;

use super::Context;

/// Validate a seed as on creation. Returns `false` when problems were found.
pub fn cmd_create(ctx: &Context, file: &Path) -> Result<bool> {
    let seed = load_seed(file)?;
    let validator = SeedValidator::with_shared(ctx.config.shared_validators());
    let errs = validator.validate_create(&seed);

    print_report(ctx, &seed, file, Operation::Create, &errs)
}

/// Validate the change from `old` to `new`.
pub fn cmd_update(ctx: &Context, new: &Path, old: &Path) -> Result<bool> {
    let new_seed = load_seed(new)?;
    let old_seed = load_seed(old)?;
    let validator = SeedValidator::with_shared(ctx.config.shared_validators());
    let errs = validator.validate_update(&new_seed, &old_seed);

    print_report(ctx, &new_seed, new, Operation::Update, &errs)
}

/// Validate a status-only change from `old` to `new`.
pub fn cmd_status_update(ctx: &Context, new: &Path, old: &Path) -> Result<bool> {
    let new_seed = load_seed(new)?;
    let old_seed = load_seed(old)?;
    let validator = SeedValidator::with_shared(ctx.config.shared_validators());
    let errs = validator.validate_status_update(&new_seed, &old_seed);

    print_report(ctx, &new_seed, new, Operation::StatusUpdate, &errs)
}

fn load_seed(path: &Path) -> Result<Seed> {
    let seed = Seed::load(path)?;
    log::debug!("loaded seed {} from {}", seed.display_name(), path.display());
    Ok(seed)
}

fn print_report(
    ctx: &Context,
    seed: &Seed,
    source: &Path,
    operation: Operation,
    errs: &DiagnosticList,
) -> Result<bool> {
    let source = source.display().to_string();
    let report = Report::new(seed.display_name(), &source, operation, errs);

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json_report(&report)?),
        OutputFormat::Text => {
            if !(ctx.quiet && errs.is_empty()) {
                println!(
                    "{}",
                    format_text_report(&report, ctx.config.output.show_bad_values)
                );
            }
        }
    }

    Ok(errs.is_empty())
}
