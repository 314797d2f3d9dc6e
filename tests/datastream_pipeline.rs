use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use ndarray::{s, Array2};
use nilspod_datastream::{Column, Datastream, Error, FilterType, RowSlice};

fn sine_stream(rows: usize, sampling_rate_hz: f64, freqs: &[f64]) -> Datastream {
    let data = Array2::from_shape_fn((rows, freqs.len()), |(i, ch)| {
        (2.0 * PI * freqs[ch] * i as f64 / sampling_rate_hz).sin()
    });
    Datastream::new(data).with_sampling_rate(sampling_rate_hz)
}

#[test]
fn downsample_halves_rate_and_rows() {
    let ds = sine_stream(400, 100.0, &[1.0, 2.0, 3.0]);
    let half = ds.downsample(2).unwrap();
    assert_eq!(half.sampling_rate_hz, 50.0);
    assert_eq!(half.len(), 200);
    assert_eq!(half.channels(), 3);
    // receiver untouched
    assert_eq!(ds.sampling_rate_hz, 100.0);
    assert_eq!(ds.len(), 400);
}

#[test]
fn chained_downsampling_tracks_rate() {
    let mut ds = sine_stream(1000, 200.0, &[1.0]);
    ds.downsample_inplace(2).unwrap().downsample_inplace(5).unwrap();
    assert_eq!(ds.sampling_rate_hz, 20.0);
    assert_eq!(ds.len(), 100);

    // the remaining samples still line up with a 1 Hz sine at 20 Hz
    for i in 10..40 {
        let expected = (2.0 * PI * i as f64 / ds.sampling_rate_hz).sin();
        assert_abs_diff_eq!(ds.data[[i, 0]], expected, epsilon = 0.05);
    }
}

#[test]
fn downsample_errors_surface_unchanged() {
    let mut ds = sine_stream(20, 100.0, &[1.0]);
    assert!(matches!(ds.downsample(0), Err(Error::InvalidFactor)));
    assert!(matches!(
        ds.downsample_inplace(2),
        Err(Error::SignalTooShort { .. })
    ));
    assert_eq!(ds.sampling_rate_hz, 100.0);
    assert_eq!(ds.len(), 20);
}

#[test]
fn butterworth_lowpass_keeps_slow_channel_and_leaves_stream_alone() {
    let ds = sine_stream(1000, 100.0, &[1.0, 30.0]);
    let before = ds.clone();
    let filtered = ds.filter_butterworth(5.0, 4, FilterType::Lowpass).unwrap();

    assert_eq!(filtered.dim(), ds.data.dim());
    assert_eq!(ds, before);
    for i in 200..800 {
        assert_abs_diff_eq!(filtered[[i, 0]], ds.data[[i, 0]], epsilon = 0.02);
        assert_abs_diff_eq!(filtered[[i, 1]], 0.0, epsilon = 0.02);
    }
}

#[test]
fn butterworth_highpass_and_band_filters() {
    let ds = sine_stream(1000, 100.0, &[1.0, 20.0]);

    let high = ds.filter_butterworth(10.0, 4, FilterType::Highpass).unwrap();
    for i in 200..800 {
        assert_abs_diff_eq!(high[[i, 0]], 0.0, epsilon = 0.02);
        assert_abs_diff_eq!(high[[i, 1]], ds.data[[i, 1]], epsilon = 0.02);
    }

    let stop = ds
        .filter_butterworth((15.0, 25.0), 3, "bandstop".parse().unwrap())
        .unwrap();
    for i in 200..800 {
        assert_abs_diff_eq!(stop[[i, 1]], 0.0, epsilon = 0.05);
    }
}

#[test]
fn butterworth_preconditions() {
    let short = sine_stream(150, 100.0, &[1.0]);
    assert!(matches!(
        short.filter_butterworth(5.0, 2, FilterType::Lowpass),
        Err(Error::SignalTooShort { len: 150, padlen: 150 })
    ));

    let ds = sine_stream(500, 100.0, &[1.0]);
    // 50 Hz is exactly Nyquist
    assert!(matches!(
        ds.filter_butterworth(50.0, 2, FilterType::Lowpass),
        Err(Error::InvalidCutoff(_))
    ));
}

#[test]
fn cut_then_mutate_copy_leaves_original() {
    let ds = sine_stream(10, 10.0, &[1.0, 2.0]);
    let mut copy = ds.cut(RowSlice::range(2, 5)).unwrap();
    assert_eq!(copy.len(), 3);
    assert_eq!(copy.data, ds.data.slice(s![2..5, ..]));
    assert_eq!(copy.sampling_rate_hz, 10.0);

    let original = ds.data.clone();
    copy.data[[0, 0]] = 123.0;
    assert_eq!(ds.data, original);
}

#[test]
fn normalize_and_downsample_copies_are_independent() {
    let ds = sine_stream(200, 50.0, &[1.0, 3.0]);
    let original = ds.data.clone();

    let mut normed = ds.normalize();
    normed.data.fill(0.0);
    let mut down = ds.downsample(2).unwrap();
    down.data.fill(0.0);

    assert_eq!(ds.data, original);
}

#[test]
fn columns_and_table_follow_metadata() {
    let ds = sine_stream(20, 10.0, &[1.0, 1.0, 1.0])
        .with_sensor("gyro")
        .calibrated(true);
    assert_eq!(ds.unit(), "deg/s");
    assert_eq!(ds.columns()[1], Column::from("gyr_y"));

    let table = ds.data_as_df(true).unwrap();
    assert_eq!(table.column_names(), vec!["gyr_x", "gyr_y", "gyr_z"]);
    let t = table.index_values();
    let expected: Vec<f64> = (0..20).map(|i| i as f64 / 10.0).collect();
    assert_eq!(t, expected);
    assert_abs_diff_eq!(t[19], 1.9, epsilon = 1e-12);

    let explicit = ds.clone().with_unit("rad/s").with_columns(["roll", "pitch", "yaw"]);
    assert_eq!(explicit.unit(), "rad/s");
    assert_eq!(
        explicit.data_as_df(false).unwrap().column_names(),
        vec!["roll", "pitch", "yaw"]
    );
}

#[test]
fn serde_round_trip_keeps_metadata() {
    let data = Array2::from_shape_fn((4, 2), |(i, j)| (i * 2 + j) as f64 * 0.5);
    let ds = Datastream::new(data)
        .with_sampling_rate(10.0)
        .with_sensor("acc")
        .with_unit("g")
        .calibrated(true);
    let json = serde_json::to_string(&ds).unwrap();
    let back: Datastream = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ds);
    assert_eq!(back.unit(), "g");
}
