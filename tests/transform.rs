use liveimu::{GaussianSmoother, MovingAverage, Transform};

fn close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn gaussian_preserves_constant_signal() {
    let g = GaussianSmoother::new(3.0).unwrap();
    let window = vec![4.2; 40];
    let out = g.apply(&window).unwrap();
    assert!(close(&out, &window));
}

#[test]
fn gaussian_output_matches_input_length() {
    let g = GaussianSmoother::new(1.0).unwrap();
    for n in [1, 2, 5, 17] {
        let window: Vec<f64> = (0..n).map(|i| i as f64).collect();
        assert_eq!(g.apply(&window).unwrap().len(), n);
    }
}

#[test]
fn gaussian_flattens_a_spike() {
    let g = GaussianSmoother::new(2.0).unwrap();
    let mut window = vec![0.0; 21];
    window[10] = 10.0;
    let out = g.apply(&window).unwrap();
    assert!(out[10] < 10.0 && out[10] > 0.0);
    assert!(out[9] > 0.0 && out[11] > 0.0);
    assert!((out[9] - out[11]).abs() < 1e-12, "kernel is symmetric");
    let total: f64 = out.iter().sum();
    assert!((total - 10.0).abs() < 1e-6);
}

#[test]
fn gaussian_rejects_bad_parameters_and_samples() {
    assert!(GaussianSmoother::new(0.0).is_err());
    assert!(GaussianSmoother::new(f64::NAN).is_err());
    assert!(GaussianSmoother::with_truncate(1.0, -1.0).is_err());
    assert!(GaussianSmoother::new(1e20).is_err());

    let g = GaussianSmoother::new(1.0).unwrap();
    assert!(g.apply(&[1.0, f64::INFINITY, 2.0]).is_err());
}

#[test]
fn gaussian_small_sigma_has_small_window() {
    let g = GaussianSmoother::with_truncate(0.5, 2.0).unwrap();
    assert_eq!(g.radius(), 1);
    assert_eq!(g.min_len(), 2);
}

#[test]
fn moving_average_is_trailing() {
    let m = MovingAverage::new(3).unwrap();
    assert_eq!(m.min_len(), 3);
    let out = m.apply(&[3.0, 6.0, 9.0, 12.0]).unwrap();
    assert!(close(&out, &[3.0, 4.5, 6.0, 9.0]));
    assert!(MovingAverage::new(0).is_err());
}
