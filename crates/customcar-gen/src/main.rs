//! customcar-gen - command-line generator for `.customcar` packages.
//!
//! Reads an export request from JSON and writes the ArrayOfModel package:
//!
//! ```text
//! customcar-gen <input.json> <output.customcar>
//! customcar-gen toe --rim 14 --mm 3
//! ```
//!
//! Exits with status 0 on success and 1 on any failure, with the error on
//! stderr.

mod input;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use customcar_core::angle::ToeScope;
use customcar_core::output::with_package_extension;
use customcar_core::{format_invariant, AliasTable, Exporter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "Usage: customcar-gen <input.json> <output.customcar>";

#[derive(Parser, Debug)]
#[command(name = "customcar-gen")]
#[command(about = "Generate .customcar alignment packages")]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Export request (JSON)
    input: Option<PathBuf>,

    /// Package file to write (`.customcar` is added when it has no extension)
    output: Option<PathBuf>,

    /// JSON object of extra `alias -> identifier` registrations
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Force the legacy hand-written XML layout
    #[arg(long)]
    manual: bool,

    /// Leave out RimSize and the caster/steering flags in manual mode
    #[arg(long)]
    no_extras: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert toe between millimeters at the rim and decimal degrees
    Toe {
        /// Rim diameter in inches
        #[arg(long)]
        rim: f64,

        /// Toe in millimeters, converted to degrees
        #[arg(
            long,
            allow_hyphen_values = true,
            conflicts_with = "degrees",
            required_unless_present = "degrees"
        )]
        mm: Option<f64>,

        /// Toe in degrees, converted to millimeters
        #[arg(long, allow_hyphen_values = true)]
        degrees: Option<f64>,

        /// Values are whole-axle totals instead of per wheel
        #[arg(long)]
        total: bool,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: Args) -> Result<()> {
    if let Some(Command::Toe {
        rim,
        mm,
        degrees,
        total,
    }) = args.command
    {
        let scope = if total { ToeScope::Total } else { ToeScope::PerWheel };
        let value = match (mm, degrees) {
            (Some(mm), _) => scope.mm_to_degrees(mm, rim),
            (None, Some(degrees)) => scope.degrees_to_mm(degrees, rim),
            (None, None) => anyhow::bail!("Either --mm or --degrees is required"),
        };
        println!("{}", format_invariant(value));
        return Ok(());
    }

    let (Some(input_path), Some(output_path)) = (args.input, args.output) else {
        anyhow::bail!("{}", USAGE);
    };

    let mut aliases = AliasTable::standard().clone();
    if let Some(alias_path) = &args.aliases {
        input::load_aliases(alias_path, &mut aliases)?;
    }

    let mut request = input::load_request(&input_path)?;
    if args.manual {
        request.use_manual_xml = true;
    }
    if args.no_extras {
        request.include_extras = false;
    }

    let output_path = with_package_extension(&output_path);
    debug!("Generating {} package", request.format());
    let exporter = Exporter::builder().aliases(aliases).build();
    exporter.generate_to_file(&request, &output_path)?;

    // Intentional stdout: callers read the generated path
    println!("Generated: {}", output_path.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
