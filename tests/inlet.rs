use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use liveimu::inlet::{self, parse_line, InletConfig, LineInlet, SyntheticImu};
use liveimu::{Background, ErrorKind, Inlet, Source};

#[test]
fn parse_line_accepts_commas_and_whitespace() {
    assert_eq!(
        parse_line("1.5, -2,3\t4e1\n").unwrap(),
        Some(vec![1.5, -2.0, 3.0, 40.0])
    );
    assert_eq!(parse_line("   \n").unwrap(), None);
    assert!(parse_line("1.0, abc").is_err());
}

#[test]
fn line_inlet_skips_blank_lines_and_reports_eof() {
    let data = "1,2,3\n\n4 5 6\n";
    let mut inlet = LineInlet::new(Cursor::new(data));
    assert_eq!(inlet.pull_sample().unwrap().values, vec![1.0, 2.0, 3.0]);
    assert_eq!(inlet.pull_sample().unwrap().values, vec![4.0, 5.0, 6.0]);
    let err = inlet.pull_sample().unwrap_err();
    assert!(err.to_string().contains("closed"));
}

#[test]
fn synthetic_frames_have_six_values_per_imu() {
    let mut s = SyntheticImu::new(2, 20.0).unwrap();
    assert_eq!(s.width(), 12);
    let a = s.pull_sample().unwrap();
    let b = s.pull_sample().unwrap();
    assert_eq!(a.values.len(), 12);
    assert_eq!(a.timestamp, 0.0);
    assert!((b.timestamp - 0.05).abs() < 1e-12);
}

#[test]
fn synthetic_noise_is_seeded() {
    let mut a = SyntheticImu::new(1, 20.0).unwrap().with_noise(2.0, 42);
    let mut b = SyntheticImu::new(1, 20.0).unwrap().with_noise(2.0, 42);
    for _ in 0..5 {
        assert_eq!(a.pull_sample().unwrap(), b.pull_sample().unwrap());
    }
}

#[test]
fn synthetic_rejects_empty_setup() {
    assert_eq!(
        SyntheticImu::new(0, 20.0).err().map(|e| e.kind()),
        Some(ErrorKind::ConfigurationError)
    );
    assert!(SyntheticImu::new(1, 0.0).is_err());
}

#[test]
fn non_finite_noise_is_a_configuration_error() {
    for noise in [f64::NAN, f64::INFINITY] {
        let cfg = InletConfig::Synthetic {
            imus: 1,
            rate_hz: 20.0,
            noise,
            seed: 0,
            paced: false,
        };
        let err = inlet::open(&cfg, false).err().map(|e| e.kind());
        assert_eq!(err, Some(ErrorKind::ConfigurationError));
    }
}

#[test]
fn opening_a_missing_file_fails() {
    let cfg = InletConfig::File {
        path: "/nonexistent/samples.csv".into(),
    };
    assert!(inlet::open(&cfg, false).is_err());
}

#[test]
fn file_inlet_reads_written_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.csv");
    std::fs::write(&path, "0.5,1.5\n2.5,3.5\n").unwrap();
    let mut inlet = inlet::open(&InletConfig::File { path }, false).unwrap();
    assert_eq!(inlet.pull_sample().unwrap().values, vec![0.5, 1.5]);
    assert_eq!(inlet.pull_sample().unwrap().values, vec![2.5, 3.5]);
}

#[test]
fn background_inlet_delivers_frames() {
    let cfg = InletConfig::Synthetic {
        imus: 1,
        rate_hz: 50.0,
        noise: 0.0,
        seed: 0,
        paced: false,
    };
    let mut inlet = inlet::open(&cfg, true).unwrap();
    let frame = inlet.pull_sample().unwrap();
    assert_eq!(frame.values.len(), SyntheticImu::VALUES_PER_IMU);
}

#[test]
fn background_source_repeats_last_value_then_reports_exit() {
    let (release, gate) = mpsc::channel::<()>();
    let mut remaining = 1;
    let mut bg: Background<Vec<f64>> = Background::spawn("once", move || {
        if remaining == 0 {
            let _ = gate.recv();
            return Err("done".into());
        }
        remaining -= 1;
        Ok(vec![1.0, 2.0])
    })
    .unwrap()
    .with_arity(2);
    assert_eq!(bg.arity(), Some(2));
    assert_eq!(bg.pull().unwrap(), vec![1.0, 2.0]);
    assert_eq!(bg.pull().unwrap(), vec![1.0, 2.0]);

    drop(release);
    let mut failed = false;
    for _ in 0..200 {
        if bg.pull().is_err() {
            failed = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(failed);
    assert!(bg.pull().is_err());
}

#[test]
fn background_producer_does_not_run_ahead_of_the_consumer() {
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&produced);
    let mut bg: Background<Vec<f64>> = Background::spawn("counter", move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Ok(vec![n as f64])
    })
    .unwrap();

    std::thread::sleep(Duration::from_millis(50));
    assert!(produced.load(Ordering::SeqCst) <= Background::<Vec<f64>>::QUEUE_DEPTH + 1);

    let first = bg.pull().unwrap()[0];
    std::thread::sleep(Duration::from_millis(50));
    let second = bg.pull().unwrap()[0];
    assert!(second > first);
}
