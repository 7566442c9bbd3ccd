use crate::record::Recording;
use polars::prelude::*;
use std::io::Write;

pub const INDEX_COLUMN_NAME: &str = "index";
pub const TIME_COLUMN_NAME: &str = "time";
pub const TEMPERATURE_COLUMN_NAME: &str = "temperature";
pub const HUMIDITY_COLUMN_NAME: &str = "humidity";

/// Time layout used when none is given, e.g. `20.07.2015 11:44:56`.
pub const DEFAULT_TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

impl Recording {
    /// One row per sample, time rendered with `time_format` (strftime
    /// syntax). The humidity column only exists for humidity recordings.
    pub fn to_dataframe(&self, time_format: &str) -> Result<DataFrame, PolarsError> {
        let len = self.samples.len();
        let mut index = Vec::with_capacity(len);
        let mut time = Vec::with_capacity(len);
        let mut temperature = Vec::with_capacity(len);

        for (n, sample) in (0u32..).zip(&self.samples) {
            index.push(n);
            time.push(sample.time.format(time_format).to_string());
            temperature.push(sample.temperature);
        }

        let mut columns: Vec<Column> = vec![
            Series::new(INDEX_COLUMN_NAME.into(), index).into(),
            Series::new(TIME_COLUMN_NAME.into(), time).into(),
            Series::new(TEMPERATURE_COLUMN_NAME.into(), temperature).into(),
        ];

        if self.configuration.humidity {
            let humidity: Vec<Option<i32>> = self
                .samples
                .iter()
                .map(|s| s.humidity.map(i32::from))
                .collect();
            columns.push(Series::new(HUMIDITY_COLUMN_NAME.into(), humidity).into());
        }

        DataFrame::new(columns)
    }
}

/// Write `df` as CSV with a header row.
pub fn write_csv<W: Write>(df: &mut DataFrame, writer: W, separator: u8) -> Result<(), PolarsError> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(separator)
        .finish(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{Configuration, Interval};
    use crate::record::decode_block;
    use chrono::NaiveDate;

    fn recording(humidity: bool, count: u32) -> Recording {
        let configuration = Configuration {
            count,
            start: NaiveDate::from_ymd_opt(2015, 7, 20)
                .unwrap()
                .and_hms_opt(11, 44, 56)
                .unwrap(),
            humidity,
            interval: Interval::OneMinute,
        };
        let block = if humidity {
            [0x00, 0xd7, 45].repeat(85)
        } else {
            [0x00, 0xd7].repeat(128)
        };
        Recording {
            samples: decode_block(&block, &configuration, 0, count),
            configuration,
        }
    }

    #[test]
    fn test_dataframe_shape() {
        let df = recording(false, 4).to_dataframe(DEFAULT_TIME_FORMAT).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(df.width(), 3);
        assert!(df.column(HUMIDITY_COLUMN_NAME).is_err());

        let df = recording(true, 4).to_dataframe(DEFAULT_TIME_FORMAT).unwrap();
        assert_eq!(df.width(), 4);
        assert!(df.column(HUMIDITY_COLUMN_NAME).is_ok());
    }

    #[test]
    fn test_csv_output() {
        let mut df = recording(true, 2).to_dataframe(DEFAULT_TIME_FORMAT).unwrap();
        let mut out = Vec::new();
        write_csv(&mut df, &mut out, b';').unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index;time;temperature;humidity");
        assert_eq!(lines[1], "0;20.07.2015 11:44:56;21.5;45");
        assert_eq!(lines[2], "1;20.07.2015 11:45:56;21.5;45");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_recording() {
        let df = recording(false, 0).to_dataframe(DEFAULT_TIME_FORMAT).unwrap();
        assert_eq!(df.height(), 0);
    }
}
