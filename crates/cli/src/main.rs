use clap::{ArgAction, Parser};
use parcel_init_core::{
    generate, write_atm, AtmFormat, ControlFile, InitError, SweepSpec,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

/// Create an atmospheric data file with initial air parcel positions
#[derive(Parser, Debug)]
#[command(name = "parcel-init")]
#[command(about = "Create atmospheric data file with initial air parcel positions", long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Control file with NAME = VALUE parameters ("-" for none)
    ctl: PathBuf,

    /// Output file for the parcel ensemble
    atm_out: PathBuf,

    /// Parameter overrides as NAME VALUE pairs (e.g. `INIT_REP 10 INIT_LAT0 -30`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    overrides: Vec<String>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

fn run(args: Args) -> Result<(), InitError> {
    let ctl = ControlFile::load(&args.ctl)?.with_overrides(args.overrides)?;
    let spec = SweepSpec::from_control(&ctl)?;
    let format = AtmFormat::from_control(&ctl)?;

    let ensemble = generate(&spec)?;
    write_atm(&args.atm_out, &ensemble, format)?;

    info!(
        "Wrote {} air parcels to {} ({:?})",
        ensemble.len(),
        args.atm_out.display(),
        format
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
