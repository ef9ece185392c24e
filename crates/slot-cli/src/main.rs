//! `slots` CLI -- generate appointment slots and check availability forms.
//!
//! ## Usage
//!
//! ```sh
//! # Half-hour slots between 9 and 10
//! slots generate --start "9:00 AM" --end "10:00 AM" --minutes 30
//!
//! # Same, as submission values
//! slots generate --start 09:00 --end 10:00 --minutes 30 --json
//!
//! # Check a filled-in form (stdin → stdout), exit 1 if the submit would be blocked
//! slots check < form.json
//!
//! # Expand an accepted form into dated availabilities
//! slots expand -i form.json -o availabilities.json
//!
//! # Show picker times and duration presets
//! slots --config form-config.json choices
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Read};
use std::process;

use slot_engine::form::{FormFields, FormState};
use slot_engine::{
    expand_availabilities, generate_slots, validate_slot_duration, validate_time_range,
    FormConfig, SlotDuration, SlotValue, TimeOfDay,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment slot generator and availability form checker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Form configuration file (JSON) for `choices`; built-in defaults if omitted
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a daily window into slots
    Generate {
        /// Window start ("9:00 AM" or "09:00")
        #[arg(long)]
        start: String,
        /// Window end ("5:00 PM" or "17:00")
        #[arg(long)]
        end: String,
        /// Slot length, hours part
        #[arg(long, default_value = "0")]
        hours: String,
        /// Slot length, minutes part
        #[arg(long, default_value = "0")]
        minutes: String,
        /// Print submission values as JSON instead of labels
        #[arg(long)]
        json: bool,
    },
    /// Check a form (JSON field values) against the submit guard
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Expand an accepted form into dated availabilities (JSON)
    Expand {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List time-picker choices and slot duration presets
    Choices,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            start,
            end,
            hours,
            minutes,
            json,
        } => {
            let start: TimeOfDay = start.parse().context("Invalid --start")?;
            let end: TimeOfDay = end.parse().context("Invalid --end")?;
            let duration =
                SlotDuration::parse_fields(&hours, &minutes).context("Invalid slot duration")?;

            if !validate_time_range(Some(start), Some(end)) {
                anyhow::bail!("Time range invalid: end time {} is not after start time {}", end, start);
            }
            if !validate_slot_duration(Some(start), Some(end), Some(duration)) {
                anyhow::bail!(
                    "Slot duration invalid: {} must be positive and fit between {} and {}",
                    duration,
                    start,
                    end
                );
            }

            let slots = generate_slots(start, end, duration);
            if json {
                let values: Vec<SlotValue> = slots.iter().map(|s| s.value()).collect();
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                for slot in &slots {
                    println!("{}", slot.label);
                }
            }
        }
        Commands::Check { input } => {
            let state = read_form(input.as_deref())?;
            let failed = state.failed_indicators();
            if failed.any() {
                for indicator in failed.visible() {
                    println!("{}: {}", indicator.element_id(), indicator.message());
                }
                process::exit(1);
            }
            println!(
                "Form can be submitted ({} slot(s) available, {} selected)",
                state.generate_slots().len(),
                state.selected_slots.len()
            );
        }
        Commands::Expand { input, output } => {
            let state = read_form(input.as_deref())?;
            let Some(submission) = state.submission() else {
                let failed: Vec<&str> = state
                    .failed_indicators()
                    .visible()
                    .iter()
                    .map(|i| i.element_id())
                    .collect();
                anyhow::bail!("Form cannot be submitted: {}", failed.join(", "));
            };
            let availabilities = expand_availabilities(&submission)
                .context("Failed to expand availabilities")?;
            let pretty = serde_json::to_string_pretty(&availabilities)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Choices => {
            let config = load_config(cli.config.as_deref())?;
            println!("Times:");
            for time in config.picker.time_choices() {
                println!("  {}", time);
            }
            println!("Durations:");
            for preset in &config.duration_presets {
                println!("  {:>5}  {}", preset.minutes.minutes(), preset.label);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<FormConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            FormConfig::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(FormConfig::default()),
    }
}

fn read_form(path: Option<&str>) -> Result<FormState> {
    let json = read_input(path)?;
    let fields: FormFields = serde_json::from_str(&json).context("Failed to parse form JSON")?;
    tracing::debug!(?fields, "read form");
    Ok(FormState::from_fields(&fields))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
