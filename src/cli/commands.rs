//! CLI commands and argument parsing

use crate::error::Result;
use crate::query::{ProcessingLevel, ProductClass, QueryBuilder};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Search the PDS Registry from the command line
#[derive(Parser, Debug)]
#[command(name = "peppi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Registry search API base URL (overrides the configuration file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search all products
    Search(SearchArgs),

    /// Search OSIRIS-REx products
    Orex(OrexArgs),
}

/// Filters of the `search` command
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Target identifier
    #[arg(long)]
    pub target: Option<String>,

    /// Investigation identifier
    #[arg(long)]
    pub investigation: Option<String>,

    /// Keep products starting at or before this date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_datetime)]
    pub before: Option<DateTime<Utc>>,

    /// Keep products ending at or after this date (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_datetime)]
    pub after: Option<DateTime<Utc>>,

    /// Parent collection identifier
    #[arg(long)]
    pub collection: Option<String>,

    /// Product class
    #[arg(long)]
    pub class: Option<ProductClass>,

    /// Collection type, implies `--class collection`
    #[arg(long)]
    pub collection_type: Option<String>,

    /// Instrument identifier
    #[arg(long)]
    pub instrument: Option<String>,

    /// Instrument host identifier
    #[arg(long)]
    pub instrument_host: Option<String>,

    /// Processing level (telemetry, raw, partially-processed, calibrated, derived)
    #[arg(long)]
    pub processing_level: Option<ProcessingLevel>,

    /// Lidvid, `*` wildcards allowed
    #[arg(long)]
    pub lidvid: Option<String>,

    /// Raw clause in the registry query syntax (repeatable)
    #[arg(long)]
    pub filter: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Filters of the `orex` command
#[derive(Args, Debug, Default)]
pub struct OrexArgs {
    /// Maximum distance to the target, in km
    #[arg(long)]
    pub range: Option<f64>,

    /// Latitude/longitude box: LAT_MIN,LAT_MAX,LON_MIN,LON_MAX
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options shared by every search command
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Properties to return (comma-separated, default all)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Stop after this many products
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Write the products to this Parquet file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one product per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Latitude/longitude bounds in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl SearchArgs {
    /// Add a clause for every filter given on the command line
    pub fn apply<B: QueryBuilder>(&self, builder: &mut B) -> Result<()> {
        if let Some(target) = &self.target {
            builder.has_target(target)?;
        }
        if let Some(investigation) = &self.investigation {
            builder.has_investigation(investigation)?;
        }
        if let Some(before) = &self.before {
            builder.before(before)?;
        }
        if let Some(after) = &self.after {
            builder.after(after)?;
        }
        if let Some(collection) = &self.collection {
            builder.of_collection(collection)?;
        }
        match (self.class, &self.collection_type) {
            (_, Some(collection_type)) => {
                builder.collections(Some(collection_type))?;
            }
            (Some(class), None) => {
                builder.of_class(class)?;
            }
            (None, None) => {}
        }
        if let Some(instrument) = &self.instrument {
            builder.has_instrument(instrument)?;
        }
        if let Some(host) = &self.instrument_host {
            builder.has_instrument_host(host)?;
        }
        if let Some(level) = self.processing_level {
            builder.has_processing_level(level)?;
        }
        if let Some(lidvid) = &self.lidvid {
            builder.get(lidvid)?;
        }
        for clause in &self.filter {
            builder.filter(clause)?;
        }
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (UTC) or a date
pub fn parse_datetime(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("invalid date '{value}'"))
}

/// Parse `LAT_MIN,LAT_MAX,LON_MIN,LON_MAX`
pub fn parse_bbox(value: &str) -> std::result::Result<BoundingBox, String> {
    let bounds = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid bounding box '{value}': {e}"))?;

    match bounds.as_slice() {
        &[lat_min, lat_max, lon_min, lon_max] => Ok(BoundingBox {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }),
        _ => Err(format!(
            "invalid bounding box '{value}': expected 4 comma-separated numbers"
        )),
    }
}
