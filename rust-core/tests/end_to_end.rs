use eeg_bandpower::io::{read_series_from_path, write_records_to_path, ParseMode};
use eeg_bandpower::{Band, BandPowerPipeline, PipelineConfig};
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;

/// CSV with six channels at 256 Hz: channel c carries a sine at `freqs[c]`
fn synthetic_csv(samples: usize, freqs: [f64; 6]) -> String {
    let mut csv = String::from("timestamp,ch1,ch2,ch3,ch4,ch5,ch6\n");
    for n in 0..samples {
        let t = n as f64 / 256.0;
        write!(csv, "{t}").unwrap();
        for f in freqs {
            write!(csv, ",{}", (2.0 * PI * f * t).sin()).unwrap();
        }
        csv.push('\n');
    }
    csv
}

#[test]
fn csv_in_csv_out() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("eeg_data.csv");
    let output = dir.path().join("processed_eeg_data.csv");

    // delta, theta, alpha, beta, gamma and a silent channel
    fs::write(&input, synthetic_csv(768, [2.0, 6.0, 10.0, 20.0, 50.0, 0.0])).unwrap();

    let series = read_series_from_path(&input, 6, ParseMode::Strict).unwrap();
    assert_eq!(series.len(), 768);

    let pipeline = BandPowerPipeline::new(PipelineConfig::default()).unwrap();
    let records = pipeline.process(&series);

    // starts 0, 128, 256, 384; 512 + 256 == 768 is dropped
    assert_eq!(records.len(), 4);
    assert_eq!(records[1].timestamp, 0.5);

    for record in &records {
        for (channel, band) in Band::ALL.into_iter().enumerate() {
            let own = record.get(band, channel);
            for other in Band::ALL.into_iter().filter(|&b| b != band) {
                assert!(own > record.get(other, channel), "channel {channel}: {band} not dominant");
            }
        }
        assert!(record.band(Band::Alpha)[5].is_infinite());
    }

    write_records_to_path(&output, &records, 6).unwrap();
    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("timestamps,delta_1,delta_2,delta_3,delta_4,delta_5,delta_6,theta_1"));
    assert!(lines[0].ends_with("gamma_5,gamma_6"));

    let first: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first.len(), 31);
    assert_eq!(first[0], "0");
    // Silent channel 6 is -Inf in every band
    for band in 0..5 {
        assert_eq!(first[1 + band * 6 + 5], "-Inf");
    }
    // Finite values carry exactly two decimals
    let alpha_3 = first[1 + 2 * 6 + 2];
    assert_eq!(alpha_3.split('.').nth(1).map(str::len), Some(2));
}

#[test]
fn short_input_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("short.csv");
    let output = dir.path().join("out.csv");

    fs::write(&input, synthetic_csv(256, [10.0; 6])).unwrap();

    let series = read_series_from_path(&input, 6, ParseMode::Lenient).unwrap();
    let pipeline = BandPowerPipeline::new(PipelineConfig::default()).unwrap();
    let records = pipeline.process(&series);
    assert!(records.is_empty());

    write_records_to_path(&output, &records, 6).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 1);
}
