use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod actions;
mod api;
mod render;

use actions::Action;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "postcodes")]
#[command(about = "Look up UK postcodes, outcodes and places", long_about = None)]
struct Cli {
    /// API origin all request paths are appended to.
    #[arg(long, global = true, default_value = api::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write a standalone HTML page instead of printing results.
    #[arg(short = 'o', long, global = true)]
    out: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single postcode.
    Lookup { postcode: String },
    /// Check whether a postcode exists.
    Validate { postcode: String },
    /// Free-text postcode search.
    Query { query: String },
    /// Look up up to 100 postcodes at once (newline or comma separated).
    Bulk {
        postcodes: Vec<String>,

        #[arg(long)]
        file: Option<String>,
    },
    /// A random postcode, optionally within an outcode.
    Random {
        #[arg(long, default_value = "")]
        outcode: String,
    },
    Autocomplete { partial: String },
    /// Postcodes nearest to a postcode.
    Nearest { postcode: String },
    /// Postcodes near a coordinate.
    Reverse {
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        #[arg(long, allow_hyphen_values = true)]
        lon: String,
    },
    /// Reverse geocode a JSON array of geolocations.
    BulkReverse {
        json: Option<String>,

        #[arg(long, conflicts_with = "json")]
        file: Option<String>,
    },
    /// Outcodes near a coordinate.
    ReverseOutcode {
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        #[arg(long, allow_hyphen_values = true)]
        lon: String,
    },
    Outcode { outcode: String },
    NearestOutcodes { outcode: String },
    /// Look up a place by its code.
    Place { code: String },
    /// Free-text place search.
    Places { query: String },
    RandomPlace,
    Terminated { postcode: String },
    Scotland { postcode: String },
}

impl Commands {
    fn into_action(self) -> Result<Action> {
        Ok(match self {
            Commands::Lookup { postcode } => Action::LookupPostcode { postcode },
            Commands::Validate { postcode } => Action::ValidatePostcode { postcode },
            Commands::Query { query } => Action::QueryPostcodes { query },
            Commands::Bulk { postcodes, file } => {
                let mut input = postcodes.join("\n");
                if let Some(path) = file {
                    input.push('\n');
                    input.push_str(&read_input(&path)?);
                }
                Action::BulkLookup { input }
            }
            Commands::Random { outcode } => Action::RandomPostcode { outcode },
            Commands::Autocomplete { partial } => Action::Autocomplete { partial },
            Commands::Nearest { postcode } => Action::NearestPostcodes { postcode },
            Commands::Reverse { lat, lon } => Action::ReverseGeocode { lat, lon },
            Commands::BulkReverse { json, file } => {
                let input = match file {
                    Some(path) => read_input(&path)?,
                    None => json.unwrap_or_default(),
                };
                Action::BulkReverseGeocode { input }
            }
            Commands::ReverseOutcode { lat, lon } => Action::ReverseOutcode { lat, lon },
            Commands::Outcode { outcode } => Action::LookupOutcode { outcode },
            Commands::NearestOutcodes { outcode } => Action::NearestOutcodes { outcode },
            Commands::Place { code } => Action::LookupPlace { code },
            Commands::Places { query } => Action::QueryPlaces { query },
            Commands::RandomPlace => Action::RandomPlace,
            Commands::Terminated { postcode } => Action::TerminatedPostcode { postcode },
            Commands::Scotland { postcode } => Action::ScottishPostcode { postcode },
        })
    }
}

fn read_input(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read input file {}", path))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let action = cli.cmd.into_action()?;
    let transport = api::HttpTransport::new()?;

    let mut area = render::ResultsArea::new();
    actions::handle(&action, &transport, &cli.base_url, &mut area);

    if let Some(out) = cli.out {
        std::fs::write(&out, render::render_page(&area))
            .with_context(|| format!("write page {}", out))?;
        println!("Wrote {}", out);
        return Ok(());
    }

    match cli.format {
        Format::Text => print!("{}", area.to_text()),
        Format::Html => println!("{}", area.to_markup()),
        Format::Json => println!("{}", area.to_json()?),
    }

    Ok(())
}
