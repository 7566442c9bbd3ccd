use crate::configuration::Configuration;
use chrono::NaiveDateTime;

/// Raw temperatures are stored in tenths of a degree Celsius.
pub const TEMPERATURE_SCALE: f64 = 10.0;

/// Bytes per sample when only temperature is recorded.
pub const TEMPERATURE_SAMPLE_LEN: usize = 2;

/// Bytes per sample when temperature and humidity are recorded.
pub const HUMIDITY_SAMPLE_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: NaiveDateTime,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent, `None` for temperature only recordings.
    pub humidity: Option<i8>,
}

/// All samples of one read pass together with the setup they were read with.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub configuration: Configuration,
    pub samples: Vec<Sample>,
}

/// Number of whole samples a block of `len` bytes holds.
pub const fn samples_per_block(len: usize, humidity: bool) -> usize {
    if humidity {
        len / HUMIDITY_SAMPLE_LEN
    } else {
        len / TEMPERATURE_SAMPLE_LEN
    }
}

/// Decode the samples of one `F` block.
///
/// `first_index` is the number of samples already emitted in this pass and
/// fixes the timestamps. At most `remaining` samples are returned; the logger
/// pads the last block with stale data, so anything past that is dropped.
/// Trailing bytes that do not form a whole sample are ignored.
pub fn decode_block(
    block: &[u8],
    configuration: &Configuration,
    first_index: u32,
    remaining: u32,
) -> Vec<Sample> {
    let width = if configuration.humidity {
        HUMIDITY_SAMPLE_LEN
    } else {
        TEMPERATURE_SAMPLE_LEN
    };

    block
        .chunks_exact(width)
        .take(remaining as usize)
        .zip(first_index..)
        .map(|(chunk, index)| {
            let raw = i16::from_be_bytes([chunk[0], chunk[1]]);
            Sample {
                time: configuration.timestamp(index),
                temperature: f64::from(raw) / TEMPERATURE_SCALE,
                humidity: configuration
                    .humidity
                    .then(|| i8::from_be_bytes([chunk[2]])),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Interval;
    use chrono::NaiveDate;

    fn configuration(count: u32, humidity: bool, interval: Interval) -> Configuration {
        Configuration {
            count,
            start: NaiveDate::from_ymd_opt(2015, 7, 20)
                .unwrap()
                .and_hms_opt(11, 44, 56)
                .unwrap(),
            humidity,
            interval,
        }
    }

    #[test]
    fn test_zero_block_temperature_only() {
        let config = configuration(1000, false, Interval::TenSeconds);
        let samples = decode_block(&[0u8; 256], &config, 0, 1000);

        assert_eq!(samples.len(), 128);
        assert!(samples.iter().all(|s| s.temperature == 0.0 && s.humidity.is_none()));
        for pair in samples.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, Interval::TenSeconds.as_duration());
        }
    }

    #[test]
    fn test_humidity_block_uses_85_groups() {
        let config = configuration(1000, true, Interval::OneMinute);
        let samples = decode_block(&[0u8; 256], &config, 0, 1000);
        assert_eq!(samples.len(), 85);
        assert_eq!(samples_per_block(256, true), 85);
    }

    #[test]
    fn test_signed_big_endian_values() {
        let config = configuration(10, true, Interval::TenSeconds);
        // 21.5 °C / 45 %, then -3.2 °C / -1 %
        let block = [0x00, 0xd7, 45, 0xff, 0xe0, 0xff];
        let samples = decode_block(&block, &config, 0, 10);

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].temperature, 21.5);
        assert_eq!(samples[0].humidity, Some(45));
        assert_eq!(samples[1].temperature, -3.2);
        assert_eq!(samples[1].humidity, Some(-1));
    }

    #[test]
    fn test_remaining_bounds_tail() {
        let config = configuration(130, false, Interval::TenSeconds);
        let samples = decode_block(&[0u8; 256], &config, 128, 2);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].time, config.timestamp(128));
        assert_eq!(samples[1].time, config.timestamp(129));
    }

    #[test]
    fn test_short_block_keeps_whole_samples() {
        let config = configuration(1000, false, Interval::FiveMinutes);
        assert_eq!(decode_block(&[0u8; 7], &config, 0, 1000).len(), 3);
        assert!(decode_block(&[], &config, 0, 1000).is_empty());
    }

    #[test]
    fn test_timestamps_follow_running_index() {
        let config = configuration(1000, true, Interval::FiveMinutes);
        let samples = decode_block(&[0u8; 256], &config, 85, 1000);
        assert_eq!(samples[0].time, config.timestamp(85));
    }
}
