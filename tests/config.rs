use std::io::Write;

use liveimu::app::build_animator;
use liveimu::inlet::{self, InletConfig};
use liveimu::{
    ColorScheme, DashboardConfig, ErrorKind, RecordingSurface, SeriesOrder, Smoothing, XFormatter,
    XLabels,
};

fn deterministic_inlet() -> InletConfig {
    InletConfig::Synthetic {
        imus: 3,
        rate_hz: 20.0,
        noise: 0.0,
        seed: 7,
        paced: false,
    }
}

#[test]
fn default_config_is_valid() {
    let cfg = DashboardConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.figure.axes.len(), 6);
    assert_eq!(cfg.channels.len(), 6);
    assert_eq!(cfg.order, SeriesOrder::NewestFirst);
    assert_eq!(cfg.tick_interval().as_millis(), 50);
}

#[test]
fn default_config_builds_six_triaxial_channels() {
    let mut cfg = DashboardConfig::default();
    cfg.inlet = deterministic_inlet();
    cfg.window = 30;
    let inlet = inlet::open(&cfg.inlet, false).unwrap();
    let mut animator = build_animator(&cfg, inlet, RecordingSurface::new()).unwrap();

    assert_eq!(animator.channels().len(), 6);
    assert!(animator.channels().iter().all(|c| c.arity() == 3));

    for _ in 0..40 {
        animator.tick().unwrap();
    }
    let frame = animator.surface().last_frame().unwrap();
    assert_eq!(frame.len(), 18);
    assert!(frame.iter().all(|l| l.ydata().len() == 30));
    assert_eq!(frame[3].style.label, "gyro_x");
}

#[test]
fn yaml_round_trip_through_file() {
    let mut cfg = DashboardConfig::default();
    cfg.title = "bench rig".to_string();
    cfg.color_scheme = ColorScheme::Light;
    cfg.smoothing = Smoothing::MovingAverage { window: 5 };

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(cfg.to_yaml().unwrap().as_bytes()).unwrap();

    let loaded = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let cfg = DashboardConfig::from_yaml(
        "title: minimal\ntick_interval_ms: 100\nsmoothing:\n  kind: gaussian\n  sigma: 1.5\n",
    )
    .unwrap();
    assert_eq!(cfg.title, "minimal");
    assert_eq!(cfg.tick_interval_ms, 100);
    assert_eq!(
        cfg.smoothing,
        Smoothing::Gaussian {
            sigma: 1.5,
            truncate: 4.0
        }
    );
    assert_eq!(cfg.channels.len(), 6);
}

#[test]
fn missing_file_reports_path() {
    let err = DashboardConfig::load("/nonexistent/dashboard.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/dashboard.yaml"));
}

#[test]
fn invalid_entries_are_configuration_errors() {
    let mut cfg = DashboardConfig::default();
    cfg.channels[0].axis = 6;
    assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::ConfigurationError);

    let mut cfg = DashboardConfig::default();
    cfg.channels[5].offset = 17;
    assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::ConfigurationError);

    let mut cfg = DashboardConfig::default();
    cfg.channels[1].series[0].color = Some("not-a-color".to_string());
    assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::ConfigurationError);

    let mut cfg = DashboardConfig::default();
    cfg.window = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = DashboardConfig::default();
    cfg.smoothing = Smoothing::Gaussian {
        sigma: -1.0,
        truncate: 4.0,
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn oversized_values_are_rejected_without_panicking() {
    let mut cfg = DashboardConfig::default();
    cfg.smoothing = Smoothing::Gaussian {
        sigma: 1e20,
        truncate: 4.0,
    };
    assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::ConfigurationError);

    let mut cfg = DashboardConfig::default();
    cfg.channels[2].offset = usize::MAX;
    assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::ConfigurationError);
}

#[test]
fn x_labels_select_the_axis_formatter() {
    assert_eq!(DashboardConfig::default().x_formatter(), XFormatter::elapsed(20.0));

    let cfg = DashboardConfig::from_yaml("x_labels:\n  kind: sample_index\n").unwrap();
    assert_eq!(cfg.x_labels, XLabels::SampleIndex);
    assert_eq!(cfg.x_formatter(), XFormatter::Index);

    let cfg = DashboardConfig::from_yaml(
        "sample_rate_hz: 10\nx_labels:\n  kind: seconds\n  decimal_places: 1\n",
    )
    .unwrap();
    assert_eq!(cfg.x_formatter().format(25.0), "2.5");
}

#[test]
fn invalid_yaml_fails_to_load() {
    assert!(DashboardConfig::from_yaml("window: [1, 2").is_err());
    assert!(DashboardConfig::from_yaml("tick_interval_ms: 0").is_err());
}
