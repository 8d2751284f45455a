use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::models::{Column, MeasurementRecord, Table, Variable};
use crate::utils::config::DashboardConfig;
use crate::utils::constants::{
    DATETIME_FORMATS, DATE_FORMAT, DAY_COLUMN, DEFAULT_PROGRESS_INTERVAL, HOUR_COLUMN,
    MISSING_TOKENS, MONTH_COLUMN, OFFSET_DATETIME_FORMATS, YEAR_COLUMN,
};
use crate::utils::progress::ProgressReporter;

/// Load the dataset at `path` with default reader settings
pub fn load(path: &Path) -> Result<Table> {
    DatasetReader::new().read_table(path, None)
}

pub struct DatasetReader {
    delimiter: u8,
    strict_validation: bool,
    progress_interval: usize,
}

/// Where the timestamp comes from in a given file
enum TimestampSource {
    Date(usize),
    Parts {
        year: usize,
        month: usize,
        day: usize,
        hour: Option<usize>,
    },
}

/// Header positions resolved once per file
struct HeaderLayout {
    station: usize,
    timestamp: TimestampSource,
    measurements: Vec<(usize, Column)>,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            strict_validation: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            delimiter: config.delimiter as u8,
            strict_validation: config.strict_validation,
            progress_interval: config.progress_interval.max(1),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    /// Read every row of the file into an immutable [`Table`]
    pub fn read_table(&self, path: &Path, progress: Option<&ProgressReporter>) -> Result<Table> {
        let bytes = std::fs::read(path).map_err(|e| DashboardError::load(path, e.to_string()))?;
        let text = decode_text(path, &bytes);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| DashboardError::load(path, e.to_string()))?
            .clone();
        let layout = resolve_headers(path, &headers)?;

        let mut records = Vec::new();
        let mut stations = HashSet::new();
        let mut violations = 0usize;

        for row in reader.records() {
            let row = row.map_err(|e| DashboardError::load(path, e.to_string()))?;
            let line = row.position().map_or(0, |p| p.line());

            let record = parse_row(path, line, &row, &layout)?;

            if let Err(e) = record.validate_physical() {
                if self.strict_validation {
                    return Err(DashboardError::load(
                        path,
                        format!("line {}: implausible record: {}", line, e),
                    ));
                }
                violations += 1;
                debug!(line, error = %e, "Implausible measurement record");
            }

            if !stations.contains(record.station.as_str()) {
                stations.insert(record.station.clone());
            }
            records.push(record);

            if records.len() % self.progress_interval == 0 {
                if let Some(progress) = progress {
                    progress.set_message(&format!("Read {} rows...", records.len()));
                }
            }
        }

        if violations > 0 {
            warn!(
                violations,
                path = %path.display(),
                "Dataset contains physically implausible records"
            );
        }

        info!(
            rows = records.len(),
            stations = stations.len(),
            path = %path.display(),
            "Loaded dataset"
        );

        Ok(Table::new(records))
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

/// UTF-8 when possible, otherwise Windows-1252
fn decode_text<'a>(path: &Path, bytes: &'a [u8]) -> Cow<'a, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            warn!(path = %path.display(), "Dataset is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text
        }
    }
}

fn resolve_headers(path: &Path, headers: &StringRecord) -> Result<HeaderLayout> {
    let position = |name: &str| headers.iter().position(|h| h == name);

    let mut station = None;
    let mut date = None;
    let mut measurements: Vec<(usize, Column)> = Vec::new();

    for (index, header) in headers.iter().enumerate() {
        match Column::parse(header) {
            Some(Column::Station) => station = Some(index),
            Some(Column::Timestamp) => date = Some(index),
            Some(column) => {
                if let Some(existing) = measurements.iter_mut().find(|(_, c)| *c == column) {
                    warn!(header, column = %column, "Duplicate column header, using the last one");
                    existing.0 = index;
                } else {
                    measurements.push((index, column));
                }
            }
            None => debug!(header, "Ignoring unknown column"),
        }
    }

    let station = station.ok_or_else(|| {
        DashboardError::load(path, "required column 'station' is missing")
    })?;

    let timestamp = match date {
        Some(index) => TimestampSource::Date(index),
        None => match (
            position(YEAR_COLUMN),
            position(MONTH_COLUMN),
            position(DAY_COLUMN),
        ) {
            (Some(year), Some(month), Some(day)) => TimestampSource::Parts {
                year,
                month,
                day,
                hour: position(HOUR_COLUMN),
            },
            _ => {
                return Err(DashboardError::load(
                    path,
                    "required timestamp column 'date' (or 'year', 'month', 'day') is missing",
                ))
            }
        },
    };

    Ok(HeaderLayout {
        station,
        timestamp,
        measurements,
    })
}

fn parse_row(
    path: &Path,
    line: u64,
    row: &StringRecord,
    layout: &HeaderLayout,
) -> Result<MeasurementRecord> {
    let field = |index: usize| row.get(index).unwrap_or("");

    let station = field(layout.station);
    if station.is_empty() {
        return Err(DashboardError::load(
            path,
            format!("line {}: empty station identifier", line),
        ));
    }

    let timestamp = match layout.timestamp {
        TimestampSource::Date(index) => parse_timestamp(field(index)),
        TimestampSource::Parts {
            year,
            month,
            day,
            hour,
        } => compose_timestamp(field(year), field(month), field(day), hour.map(field)),
    }
    .ok_or_else(|| {
        DashboardError::load(path, format!("line {}: unparsable timestamp", line))
    })?;

    let mut record = MeasurementRecord::empty(station, timestamp);

    for &(index, column) in &layout.measurements {
        let raw = field(index);
        if is_missing(raw) {
            continue;
        }

        if column == Column::Variable(Variable::WindDirection) {
            record.wd = Some(raw.to_string());
            continue;
        }

        let value = raw.parse::<f64>().map_err(|_| {
            DashboardError::load(
                path,
                format!(
                    "line {}: invalid number '{}' in column '{}'",
                    line, raw, column
                ),
            )
        })?;
        record.set_numeric(column, Some(value));
    }

    Ok(record)
}

pub(crate) fn is_missing(raw: &str) -> bool {
    raw.is_empty() || MISSING_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t))
}

/// Parse a `date` cell in any of the accepted layouts
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            OFFSET_DATETIME_FORMATS.iter().find_map(|format| {
                DateTime::parse_from_str(raw, format)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn compose_timestamp(year: &str, month: &str, day: &str, hour: Option<&str>) -> Option<NaiveDateTime> {
    let hour = match hour {
        Some(h) if !is_missing(h) => h.parse::<u32>().ok()?,
        _ => 0,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?
        .and_hms_opt(hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pollutant;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2013, 3, 1)
            .unwrap()
            .and_hms_opt(5, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2013-03-01 05:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2013-03-01T05:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2013-03-01 05:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2013-03-01"),
            NaiveDate::from_ymd_opt(2013, 3, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("2013-03-01 05:00:00+08:00"), Some(expected));
        assert_eq!(parse_timestamp("2013-03-01T05:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("01/03/2013"), None);
        assert_eq!(parse_timestamp("2013-02-30"), None);
    }

    #[test]
    fn test_parse_timestamp_fractional_seconds() {
        let expected = NaiveDate::from_ymd_opt(2016, 7, 4)
            .unwrap()
            .and_hms_milli_opt(13, 0, 0, 250)
            .unwrap();
        assert_eq!(parse_timestamp("2016-07-04 13:00:00.250"), Some(expected));
        assert_eq!(parse_timestamp("2016-07-04T13:00:00.25"), Some(expected));
        assert_eq!(parse_timestamp("2016-07-04T13:00:00.250+08:00"), Some(expected));
    }

    #[test]
    fn test_missing_tokens() {
        assert!(is_missing(""));
        assert!(is_missing("NA"));
        assert!(is_missing("nan"));
        assert!(is_missing("NULL"));
        assert!(!is_missing("0"));
    }

    #[test]
    fn test_read_dataset_with_date_column() -> Result<()> {
        let file = write_csv(
            "No,PM2.5,PM10,TEMP,wd,WSPM,station,date,Polusi Udara\n\
             1,4,4,-0.7,NNW,4.4,Aotizhongxin,2013-03-01 00:00:00,8\n\
             2,NA,8,-1.1,N,4.7,Aotizhongxin,2013-03-01 01:00:00,\n\
             3,7,7,-1.1,NNW,5.6,Changping,2014-03-01 02:00:00,14\n",
        );

        let table = load(file.path())?;

        assert_eq!(table.len(), 3);
        let first = &table.records()[0];
        assert_eq!(first.station, "Aotizhongxin");
        assert_eq!(first.pm25, Some(4.0));
        assert_eq!(first.temp, Some(-0.7));
        assert_eq!(first.wd.as_deref(), Some("NNW"));
        assert_eq!(first.air_pollution, Some(8.0));
        assert_eq!(first.so2, None);

        let second = &table.records()[1];
        assert_eq!(second.pm25, None);
        assert_eq!(second.air_pollution, None);
        assert_eq!(table.records()[2].year(), 2014);
        Ok(())
    }

    #[test]
    fn test_read_dataset_with_split_timestamp() -> Result<()> {
        let file = write_csv(
            "No,year,month,day,hour,PM2.5,CO,station\n\
             1,2016,12,31,23,10,300,Dongsi\n",
        );

        let table = load(file.path())?;
        let record = &table.records()[0];
        assert_eq!(
            record.timestamp,
            NaiveDate::from_ymd_opt(2016, 12, 31)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap()
        );
        assert_eq!(record.numeric(Column::Pollutant(Pollutant::Co)), Some(300.0));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = load(Path::new("/nonexistent/China.csv"));
        assert!(matches!(result, Err(DashboardError::Load { .. })));
    }

    #[test]
    fn test_bad_timestamp_is_load_error() {
        let file = write_csv("station,date,PM2.5\nDongsi,not-a-date,3\n");
        let result = load(file.path());
        assert!(matches!(result, Err(DashboardError::Load { .. })));
    }

    #[test]
    fn test_missing_timestamp_column_is_load_error() {
        let file = write_csv("station,PM2.5\nDongsi,3\n");
        let result = load(file.path());
        assert!(matches!(result, Err(DashboardError::Load { .. })));
    }

    #[test]
    fn test_invalid_number_is_load_error() {
        let file = write_csv("station,date,PM2.5\nDongsi,2013-03-01,abc\n");
        match load(file.path()) {
            Err(DashboardError::Load { reason, .. }) => {
                assert!(reason.contains("PM2.5"));
                assert!(reason.contains("abc"));
            }
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_validation() -> Result<()> {
        let file = write_csv("station,date,RAIN\nDongsi,2013-03-01,-1\n");

        let lenient = DatasetReader::new().read_table(file.path(), None)?;
        assert_eq!(lenient.len(), 1);

        let strict = DatasetReader::new()
            .with_strict_validation(true)
            .read_table(file.path(), None);
        assert!(matches!(strict, Err(DashboardError::Load { .. })));
        Ok(())
    }

    #[test]
    fn test_semicolon_delimiter() -> Result<()> {
        let file = write_csv("station;date;O3\nTiantan;2015-06-01;80\n");
        let table = DatasetReader::new()
            .with_delimiter(b';')
            .read_table(file.path(), None)?;
        assert_eq!(table.records()[0].o3, Some(80.0));
        Ok(())
    }

    #[test]
    fn test_windows_1252_fallback() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"station,date,PM10\nG\xfccheng,2015-06-01,12\n")?;
        let table = load(file.path())?;
        assert_eq!(table.records()[0].station, "G\u{fc}cheng");
        Ok(())
    }
}
