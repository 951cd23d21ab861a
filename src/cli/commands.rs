//! Command handler implementations
//!
//! Each CLI subcommand maps to one handler. The `view` command runs the
//! same pipeline the plugin uses, against the real ExifTool backend.

use anyhow::{bail, Result};
use log::info;
use std::fs;
use std::path::Path;

use crate::cli::args::{Args, Commands, TestCommands};
use crate::cli::progress::{
    format_bytes, print_error, print_info, print_success, print_warning, ExtractionSpinner,
};
use crate::core::config::{self, Config};
use crate::core::pipeline::{extract_raw, file_name_of};
use crate::preview::decoder::decode_preview;
use crate::testdb::scenarios::{run_scenarios, ScenarioLibrary, TestSummary};
use crate::tool::exiftool::ExifTool;
use crate::tool::locator::ToolLocator;
use crate::tool::traits::{is_supported, ExtractionMode};

/// Dispatch the parsed command
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Some(Commands::View { file, output }) => cmd_view(file, output.as_deref(), config),
        Some(Commands::CheckTool) => cmd_check_tool(config),
        Some(Commands::Config { path, reset }) => cmd_config(*path, *reset),
        Some(Commands::GenerateConfig { output }) => cmd_generate_config(output.as_deref()),
        Some(Commands::ShowConfig) => cmd_show_config(config),
        Some(Commands::Test { test_command }) => cmd_test(test_command),
        None => {
            print_info("No command given. Try 'indd-preview view <file>' or --help.");
            Ok(())
        }
    }
}

/// Extract, decode and report the preview for a document
fn cmd_view(file: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    if !is_supported(file) {
        print_error(&format!(
            "'{}' is not an InDesign document (.indd) or template (.indt)",
            file.display()
        ));
        bail!("unsupported file type");
    }
    if !file.exists() {
        print_error(&format!("File not found: {}", file.display()));
        bail!("file not found");
    }

    let locator = ToolLocator::from_config(&config.tool);
    let tool = match ExifTool::discover(&locator) {
        Ok(tool) => tool,
        Err(e) => {
            print_error(&e.to_string());
            print_info("Run 'indd-preview check-tool' to see the searched locations.");
            return Err(e.into());
        }
    };

    let mode = ExtractionMode::for_path(file);
    let name = file_name_of(file);
    let spinner = ExtractionSpinner::new(&format!("Extracting {} from {}...", mode, name));

    let raw = match extract_raw(&tool, file) {
        Ok(raw) => raw,
        Err(e) => {
            spinner.finish_with_error(&e.to_string());
            return Err(e.into());
        }
    };

    if raw.is_empty() {
        spinner.finish("No preview embedded");
        print_info("The document carries no embedded preview; nothing to show.");
        return Ok(());
    }

    let preview = match decode_preview(&raw) {
        Ok(preview) => preview,
        Err(e) => {
            spinner.finish_with_error("Preview data is not a decodable image");
            return Err(e.into());
        }
    };

    spinner.finish(&format!("Extracted {}", format_bytes(raw.len() as u64)));
    print_success(&preview.display_title(&name));

    if let Some(out) = output {
        fs::write(out, &raw)?;
        print_info(&format!("Raw preview written to {}", out.display()));
    }

    Ok(())
}

/// Report the tool discovery candidates and which one resolves
fn cmd_check_tool(config: &Config) -> Result<()> {
    let locator = ToolLocator::from_config(&config.tool);

    for (stage, path) in locator.candidates() {
        let marker = if path.is_file() { "✓" } else { "✗" };
        println!("  {} {} {}", marker, stage.display_name(), path.display());
    }

    match locator.resolve() {
        Ok(resolved) => {
            print_success(&format!(
                "ExifTool resolved via {}: {}",
                resolved.stage.display_name(),
                resolved.path.display()
            ));
            Ok(())
        }
        Err(e) => {
            print_error(&e.to_string());
            Err(e.into())
        }
    }
}

/// Open, locate or reset the configuration file
fn cmd_config(show_path: bool, reset: bool) -> Result<()> {
    if show_path {
        match config::get_config_path() {
            Some(path) => println!("{}", path.display()),
            None => print_error("Could not determine the configuration directory"),
        }
        return Ok(());
    }

    if reset {
        let dir = config::ensure_config_dir()?;
        let path = dir.join("config.toml");
        fs::write(&path, Config::generate_default_config())?;
        print_success(&format!("Config reset to defaults: {}", path.display()));
        return Ok(());
    }

    let path = config::open_config_in_editor()?;
    print_info(&format!("Opened {}", path.display()));
    Ok(())
}

/// Write a default configuration file
fn cmd_generate_config(output: Option<&Path>) -> Result<()> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => config::init_config()?,
    };

    if output.is_some() {
        fs::write(&path, Config::generate_default_config())?;
    }

    print_success(&format!("Config file written: {}", path.display()));
    Ok(())
}

/// Print the effective configuration
fn cmd_show_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config)?;
    println!("{}", rendered);
    Ok(())
}

/// Run mock-tool scenarios
fn cmd_test(command: &TestCommands) -> Result<()> {
    match command {
        TestCommands::RunAll { verbose } => {
            info!("running all {} scenarios", ScenarioLibrary::all().len());
            report_summary(crate::testdb::run_all(), *verbose)
        }
        TestCommands::Run { scenarios, verbose } => {
            let mut selected = Vec::new();
            for name in scenarios {
                match ScenarioLibrary::by_name(name) {
                    Some(scenario) => selected.push(scenario),
                    None => print_warning(&format!("Unknown scenario: {}", name)),
                }
            }
            if selected.is_empty() {
                bail!("no matching scenarios");
            }
            report_summary(run_scenarios(selected), *verbose)
        }
        TestCommands::ListScenarios => {
            for scenario in ScenarioLibrary::all() {
                println!("  {:28} {}", scenario.name, scenario.description);
            }
            Ok(())
        }
    }
}

fn report_summary(summary: TestSummary, verbose: bool) -> Result<()> {
    for result in &summary.results {
        if result.passed {
            if verbose {
                print_success(&result.name);
            }
        } else {
            print_error(&format!("{}: {}", result.name, result.details));
        }
    }

    if summary.all_passed() {
        print_success(&format!("{}/{} scenarios passed", summary.passed, summary.total));
        Ok(())
    } else {
        print_error(&format!("{}/{} scenarios passed", summary.passed, summary.total));
        bail!("scenario failures");
    }
}
