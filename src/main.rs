//! `pluscodes` command-line entrypoint.
//!
//! - `pluscodes encode` / `decode` - convert between locations and codes
//! - `pluscodes shorten` / `recover` - reference-relative short codes
//! - `pluscodes csv` - add codes to a CSV file
//! - `pluscodes conformance` - run the shared fixture files

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use pluscodes_rs::conformance::verify_dir;
use pluscodes_rs::{
    CsvCodeConfig, DEFAULT_CODE_LENGTH, GeometryFormat, PlusCodeError, area_to_geojson,
    area_to_wkt, check, csv_to_plus_code_csv, decode, encode, is_full, is_padded, is_short,
    recover_nearest, shorten,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Plus code encoder, decoder and shortener.
#[derive(Parser)]
#[command(name = "pluscodes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a latitude/longitude into a code.
    Encode {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        /// Number of digits; invalid lengths are adjusted.
        #[arg(short, long, default_value_t = DEFAULT_CODE_LENGTH as i32, allow_negative_numbers = true)]
        length: i32,
    },

    /// Decode a full code into its area.
    Decode {
        code: String,
        #[arg(short, long, value_enum, default_value_t = DecodeFormat::Text)]
        format: DecodeFormat,
    },

    /// Check a code against the code grammar.
    ///
    /// Exits with an error if the code is invalid.
    Check { code: String },

    /// Shorten a full code relative to a nearby reference location.
    Shorten {
        code: String,
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Recover the full code nearest a reference location.
    Recover {
        short_code: String,
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Add a plus code column to a CSV file.
    Csv(CsvArgs),

    /// Verify the fixture files in a directory.
    ///
    /// Expects validityTests.csv, encoding.csv, decoding.csv and shortCodeTests.csv.
    Conformance { dir: PathBuf },
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["geometry_column", "lng_column"])))]
struct CsvArgs {
    input: PathBuf,
    output: PathBuf,
    /// Column holding WKT or GeoJSON geometries.
    #[arg(long)]
    geometry_column: Option<String>,
    /// Column holding longitudes.
    #[arg(long, requires = "lat_column")]
    lng_column: Option<String>,
    /// Column holding latitudes.
    #[arg(long, requires = "lng_column")]
    lat_column: Option<String>,
    #[arg(short, long, default_value_t = DEFAULT_CODE_LENGTH as i32)]
    length: i32,
    /// Columns to leave out of the output.
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,
    /// Also write the code area polygon.
    #[arg(long, value_enum)]
    area_geometry: Option<AreaFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DecodeFormat {
    Text,
    Json,
    Wkt,
    Geojson,
}

#[derive(Clone, Copy, ValueEnum)]
enum AreaFormat {
    Wkt,
    Geojson,
}

impl From<AreaFormat> for GeometryFormat {
    fn from(format: AreaFormat) -> Self {
        match format {
            AreaFormat::Wkt => GeometryFormat::Wkt,
            AreaFormat::Geojson => GeometryFormat::GeoJson,
        }
    }
}

fn run_decode(code: &str, format: DecodeFormat) -> Result<(), PlusCodeError> {
    let area = decode(code)?;
    match format {
        DecodeFormat::Text => {
            let (lat, lng) = area.center();
            println!("center: {lat:.10},{lng:.10}");
            println!("south-west: {:.10},{:.10}", area.lat_lo, area.lng_lo);
            println!("north-east: {:.10},{:.10}", area.lat_hi, area.lng_hi);
            println!("length: {}", area.code_length);
        }
        DecodeFormat::Json => {
            let json = serde_json::to_string_pretty(&area)
                .map_err(|e| PlusCodeError::IoError(e.to_string()))?;
            println!("{json}");
        }
        DecodeFormat::Wkt => println!("{}", area_to_wkt(&area)),
        DecodeFormat::Geojson => println!("{}", area_to_geojson(&area)),
    }
    Ok(())
}

fn run_check(code: &str) -> Result<(), PlusCodeError> {
    check(code)?;
    println!(
        "valid: true, short: {}, full: {}, padded: {}",
        is_short(code),
        is_full(code),
        is_padded(code)
    );
    Ok(())
}

fn run_csv(args: CsvArgs) -> Result<(), PlusCodeError> {
    let config = match (args.geometry_column, args.lng_column, args.lat_column) {
        (Some(geometry), _, _) => CsvCodeConfig::new(geometry, args.length),
        (None, Some(lng), Some(lat)) => CsvCodeConfig::from_coords(lng, lat, args.length),
        _ => {
            return Err(PlusCodeError::CsvError(
                "either --geometry-column or both --lng-column and --lat-column are required"
                    .to_string(),
            ));
        }
    };
    let mut config = config.exclude(args.exclude);
    if let Some(format) = args.area_geometry {
        config = config.with_area_geometry(format.into());
    }

    let written = csv_to_plus_code_csv(&args.input, &args.output, &config)?;
    info!(codes = written, output = %args.output.display(), "CSV conversion complete");
    Ok(())
}

fn run_conformance(dir: PathBuf) -> Result<(), PlusCodeError> {
    let summaries = verify_dir(&dir)?;
    let mut failed = 0;
    for summary in &summaries {
        println!("{summary}");
        for failure in &summary.failures {
            println!("  {failure}");
        }
        failed += summary.failures.len();
    }
    if failed > 0 {
        return Err(PlusCodeError::ConformanceMismatch(format!(
            "{failed} case(s) failed in {}",
            dir.display()
        )));
    }
    Ok(())
}

/// `RUST_LOG` directives when they parse, otherwise `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<(), PlusCodeError> {
    // Logs go to stderr so stdout stays clean for codes and JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            latitude,
            longitude,
            length,
        } => {
            println!("{}", encode(latitude, longitude, length));
            Ok(())
        }
        Commands::Decode { code, format } => run_decode(&code, format),
        Commands::Check { code } => run_check(&code),
        Commands::Shorten {
            code,
            latitude,
            longitude,
        } => shorten(&code, latitude, longitude).map(|short| println!("{short}")),
        Commands::Recover {
            short_code,
            latitude,
            longitude,
        } => recover_nearest(&short_code, latitude, longitude).map(|full| println!("{full}")),
        Commands::Csv(args) => run_csv(args),
        Commands::Conformance { dir } => run_conformance(dir),
    };

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}
