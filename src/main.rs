use std::path::PathBuf;

use anyhow::Context;
use camnear::{aggregator::DEFAULT_TOP_N, input, CamFinder, Error, Mode, Query, Settings};
use clap::Parser;
use log::LevelFilter;
use rustyline::{error::ReadlineError, DefaultEditor};

/// Show the traffic cameras closest to a location
#[derive(Parser)]
#[command(author, version)]
struct Cli {
    /// Address or place name to search near
    #[arg(short, long, conflicts_with = "coords")]
    address: Option<String>,
    /// Latitude and longitude of the target location
    #[arg(long, num_args = 2, value_names = ["LAT", "LON"], allow_negative_numbers = true)]
    coords: Option<Vec<f64>>,
    /// Number of cameras to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,
    /// Include camera ids in the output
    #[arg(long, action)]
    include_id: bool,
    /// Print the cameras as JSON
    #[arg(long, action)]
    json: bool,
    /// Where to write the collage
    #[arg(short, long, default_value = "collage.png")]
    output: PathBuf,
    /// Write the collage without opening it
    #[arg(long, action)]
    no_display: bool,
    #[arg(short, long, action)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            top_n: self.top_n,
            include_id: self.include_id,
            output: self.output.clone(),
            display: !self.no_display,
            ..Settings::default()
        }
    }

    fn query(&self) -> camnear::Result<Option<Query>> {
        if let Some(address) = &self.address {
            return Ok(Some(Query::Address(address.clone())));
        }
        match self.coords.as_deref() {
            Some(&[lat, lon]) => Ok(Some(Query::Coordinates(input::coordinate(lat, lon)?))),
            _ => Ok(None),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let finder = CamFinder::new(args.settings()).context("Failed to set up HTTP clients")?;

    if let Some(query) = args.query().context("Invalid --coords")? {
        finder
            .run(&query, args.json)
            .context("Camera search failed")?;
        return Ok(());
    }

    let mut rl = DefaultEditor::new()?;
    while let Some(query) = prompt_query(&mut rl)? {
        match finder.run(&query, args.json) {
            Ok(_) => break,
            Err(e @ (Error::AddressNotFound(_) | Error::EmptyAddress)) => {
                println!("{}", e);
            }
            Err(e) => return Err(e).context("Camera search failed"),
        }
    }
    Ok(())
}

/// Asks for the input mode and then the location; `None` on Ctrl-C or Ctrl-D.
fn prompt_query(rl: &mut DefaultEditor) -> anyhow::Result<Option<Query>> {
    let mode = loop {
        let line = match read_line(rl, "Search by (1) address or (2) latitude/longitude? ")? {
            Some(line) => line,
            None => return Ok(None),
        };
        match input::parse_mode(&line) {
            Some(mode) => break mode,
            None => println!("Please enter 1 or 2"),
        }
    };

    let prompt = match mode {
        Mode::Address => "Address: ",
        Mode::Coordinates => "Latitude and longitude (e.g. 37.7749 -122.4194): ",
    };
    loop {
        let line = match read_line(rl, prompt)? {
            Some(line) => line,
            None => return Ok(None),
        };
        match Query::parse(mode, &line) {
            Ok(query) => return Ok(Some(query)),
            Err(e) => println!("{}", e),
        }
    }
}

fn read_line(rl: &mut DefaultEditor, prompt: &str) -> anyhow::Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => {
            rl.add_history_entry(line.as_str())
                .context("Failed to record input history")?;
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err).context("Failed to read input"),
    }
}
