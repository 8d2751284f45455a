/// Column names of the source dataset
pub const STATION_COLUMN: &str = "station";
pub const DATE_COLUMN: &str = "date";
pub const YEAR_COLUMN: &str = "year";
pub const MONTH_COLUMN: &str = "month";
pub const DAY_COLUMN: &str = "day";
pub const HOUR_COLUMN: &str = "hour";

/// Canonical name of the derived aggregate pollutant and its free-text alias
pub const AIR_POLLUTION_COLUMN: &str = "Air Pollution";
pub const AIR_POLLUTION_ALIAS: &str = "polusi udara";

/// Accepted layouts of the `date` column, tried in order. `%.f` also matches
/// a timestamp without fractional seconds.
pub const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
/// Offset-qualified layouts; the wall-clock time as written is kept
pub const OFFSET_DATETIME_FORMATS: [&str; 2] =
    ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%.f%#z"];
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cell contents treated as a missing value (compared case-insensitively)
pub const MISSING_TOKENS: [&str; 4] = ["NA", "NaN", "null", "None"];

/// Monitoring sites of the Beijing multi-site air-quality dataset
pub const KNOWN_STATIONS: [&str; 12] = [
    "Aotizhongxin",
    "Changping",
    "Dingling",
    "Dongsi",
    "Guanyuan",
    "Gucheng",
    "Huairou",
    "Nongzhanguan",
    "Shunyi",
    "Tiantan",
    "Wanliu",
    "Wanshouxigong",
];

/// Wind direction codes accepted in the `wd` column
pub const WIND_DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Chart labels
pub const YEARLY_X_LABEL: &str = "Tahun";
pub const YEARLY_Y_LABEL: &str = "Nilai Rata-Rata";
pub const HEATMAP_TITLE: &str = "Correlation Heatmap";

/// Processing defaults
pub const DEFAULT_DATA_PATH: &str = "China.csv";
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;
pub const CORRELATION_TOLERANCE: f64 = 1e-9;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "AIRQ";
