use liveimu::data::x_formatter::*;

#[test]
fn elapsed_converts_samples_to_seconds() {
    let f = ElapsedFormatter::new(20.0);
    assert_eq!(f.seconds(0.0), 0.0);
    assert_eq!(f.seconds(1000.0), 50.0);
    assert_eq!(f.format(30.0), "2");
}

#[test]
fn elapsed_drops_sign_for_reversed_axes() {
    let f = ElapsedFormatter::new(10.0);
    assert_eq!(f.seconds(-25.0), 2.5);
}

#[test]
fn elapsed_with_zero_rate_falls_back_to_index() {
    let f = ElapsedFormatter {
        sample_rate_hz: 0.0,
        decimal_places: 1,
    };
    assert_eq!(f.format(12.0), "12.0");
}

#[test]
fn elapsed_respects_decimal_places() {
    let f = ElapsedFormatter {
        sample_rate_hz: 20.0,
        decimal_places: 2,
    };
    assert_eq!(f.format(5.0), "0.25");
}

#[test]
fn x_formatter_variants() {
    assert_eq!(XFormatter::default().format(42.4), "42");
    assert_eq!(XFormatter::Index.format(-7.0), "7");
    assert_eq!(XFormatter::elapsed(20.0).format(100.0), "5");
}

#[test]
fn labels_choose_the_formatter() {
    assert_eq!(
        XFormatter::from_labels(XLabels::SampleIndex, 20.0),
        XFormatter::Index
    );
    let f = XFormatter::from_labels(XLabels::Seconds { decimal_places: 1 }, 10.0);
    assert_eq!(f.format(15.0), "1.5");
    assert_eq!(XLabels::default(), XLabels::Seconds { decimal_places: 0 });
}
