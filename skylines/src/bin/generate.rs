//! Generate the constellation line data consumed by the sky sphere
//! renderer.
//!
//! Fetches the HYG catalog and the KStars line description when they are
//! missing from the data directory, converts them, and writes the
//! `constellations.js` module.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use skylines::data::{fetch_if_missing, CLINES_FILE, CLINES_URL, HYGDATA_FILE, HYGDATA_URL};
use skylines::{parse_clines, Error, StarCatalog};

#[derive(Parser, Debug)]
#[command(about = "Convert the HYG catalog and KStars line figures into constellations.js")]
struct Args {
    /// Directory holding the source catalogs (downloaded when missing)
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Output path; defaults to <data-dir>/constellations.js
    #[arg(long)]
    output: Option<PathBuf>,

    /// Never download; fail if a source file is absent
    #[arg(long, default_value_t = false)]
    offline: bool,
}

fn run(args: &Args) -> Result<PathBuf, Error> {
    let hygdata_path = args.data_dir.join(HYGDATA_FILE);
    let clines_path = args.data_dir.join(CLINES_FILE);

    if !args.offline {
        fetch_if_missing(&hygdata_path, HYGDATA_URL)?;
        fetch_if_missing(&clines_path, CLINES_URL)?;
    }

    let catalog = StarCatalog::load(&hygdata_path)?;
    let text = fs::read_to_string(&clines_path)?;
    let sky = parse_clines(&catalog, &text)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.data_dir.join("constellations.js"));
    sky.write_module(&output)?;
    Ok(output)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(path) => {
            println!(
                "Constellations file successfully generated at {}",
                path.display()
            );
            ExitCode::SUCCESS
        }
        // Unresolvable stars map to a distinct status; every other
        // failure exits 1.
        Err(err @ Error::StarNotFound(_)) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
