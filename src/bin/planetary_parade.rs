//! Command-line front end: compute the visibility tables for a span of years and
//! print the days on which enough bodies clear the threshold.

use camino::Utf8PathBuf;
use clap::Parser;

use planetary_parade::constants::{
    DEFAULT_DUSK_MINUTES, DEFAULT_ELEVATION, DEFAULT_END_YEAR, DEFAULT_LATITUDE,
    DEFAULT_LONGITUDE, DEFAULT_PAD_DAYS, DEFAULT_START_YEAR, DEFAULT_TIMEZONE, DEFAULT_TREELINE,
};
use planetary_parade::{
    Body, CacheKeyPolicy, Parade, ParadeConfig, ParadeError, ParadeReport, ReportFilter,
    VisibilityColumn,
};

#[derive(Parser, Debug)]
#[command(name = "planetary-parade", version, about = "Find planetary parades")]
struct Args {
    /// First year of the range
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,

    /// Last year of the range (included)
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    end_year: i32,

    /// Minutes between sunrise and the morning checkpoint (and sunset and evening)
    #[arg(long, default_value_t = DEFAULT_DUSK_MINUTES)]
    dusk_minutes: i64,

    /// Observer latitude in degrees, north positive
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    latitude: f64,

    /// Observer longitude in degrees, east positive
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    longitude: f64,

    /// Observer elevation in meters
    #[arg(long, default_value_t = DEFAULT_ELEVATION, allow_negative_numbers = true)]
    elevation: f64,

    /// Elevation angle in degrees that a body must exceed to clear the trees
    #[arg(long, default_value_t = DEFAULT_TREELINE)]
    treeline: f64,

    /// IANA time zone of the observer
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Days added on each side of the range for the sunrise/sunset search
    #[arg(long, default_value_t = DEFAULT_PAD_DAYS)]
    pad_days: u32,

    /// Bodies to track (comma separated); all eight when omitted
    #[arg(long, value_delimiter = ',')]
    bodies: Vec<Body>,

    /// Also record the local rise and set time of each body
    #[arg(long)]
    rise_set: bool,

    /// Column used to select the reported days
    #[arg(long, default_value = "visible_evening_above_horizon")]
    column: VisibilityColumn,

    /// Minimum count in the selected column
    #[arg(long, default_value_t = 5)]
    min_count: u8,

    /// Print the selected days as contiguous date ranges
    #[arg(long)]
    ranges: bool,

    /// Neither read nor write the cache
    #[arg(long)]
    no_cache: bool,

    /// Cache directory (defaults to the user cache directory)
    #[arg(long)]
    cache_dir: Option<Utf8PathBuf>,

    /// Parameters addressing a cached table
    #[arg(long, value_enum, default_value_t = CacheKeyPolicy::Full)]
    cache_key: CacheKeyPolicy,
}

impl From<&Args> for ParadeConfig {
    fn from(args: &Args) -> Self {
        ParadeConfig {
            start_year: args.start_year,
            end_year: args.end_year,
            dusk_minutes: args.dusk_minutes,
            latitude: args.latitude,
            longitude: args.longitude,
            elevation_m: args.elevation,
            treeline_degrees: args.treeline,
            timezone: args.timezone.clone(),
            pad_days: args.pad_days,
            bodies: if args.bodies.is_empty() {
                Body::ALL.to_vec()
            } else {
                args.bodies.clone()
            },
            record_rise_set: args.rise_set,
            cache_enabled: !args.no_cache,
            cache_dir: args.cache_dir.clone(),
            cache_key_policy: args.cache_key,
        }
    }
}

fn main() -> Result<(), ParadeError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let parade = Parade::new(ParadeConfig::from(&args))?;
    let outcome = parade.run()?;

    let filter = ReportFilter::new(args.column, args.min_count);
    let report = ParadeReport::new(&outcome.visibility, &outcome.consolidated, filter)
        .with_ranges(args.ranges);
    print!("{report}");
    Ok(())
}
