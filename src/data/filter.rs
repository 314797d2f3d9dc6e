//! IIR filter design and zero-phase application.
//!
//! Designs follow the usual analog-prototype route: prototype poles, frequency
//! prewarping, lowpass-to-X transform in zero/pole/gain form, bilinear
//! transform and finally expansion into transfer-function coefficients. The
//! resulting coefficients, `filtfilt` padding and `decimate` defaults match
//! what SciPy's `signal.butter`, `signal.filtfilt` and `signal.decimate`
//! produce.

use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Slice};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Order of the Chebyshev type I anti-aliasing filter used by [`decimate`].
pub const DECIMATE_ORDER: usize = 8;
/// Passband ripple (dB) of the anti-aliasing filter used by [`decimate`].
pub const DECIMATE_RIPPLE_DB: f64 = 0.05;

// ---------------------------------------------------------------------------
// FilterType / Cutoff
// ---------------------------------------------------------------------------

/// Band type of a designed filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Lowpass,
    Highpass,
    Bandpass,
    Bandstop,
}

impl FilterType {
    fn is_band(&self) -> bool {
        matches!(self, FilterType::Bandpass | FilterType::Bandstop)
    }
}

impl Display for FilterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterType::Lowpass => write!(f, "lowpass"),
            FilterType::Highpass => write!(f, "highpass"),
            FilterType::Bandpass => write!(f, "bandpass"),
            FilterType::Bandstop => write!(f, "bandstop"),
        }
    }
}

impl FromStr for FilterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" | "lowpass" | "lp" => Ok(FilterType::Lowpass),
            "h" | "high" | "highpass" | "hp" => Ok(FilterType::Highpass),
            "band" | "bandpass" | "bp" | "pass" => Ok(FilterType::Bandpass),
            "bs" | "bandstop" | "bands" | "stop" => Ok(FilterType::Bandstop),
            other => Err(Error::UnknownFilterType(other.to_string())),
        }
    }
}

/// Critical frequency of a filter: a single edge for low/high-pass designs,
/// a `(low, high)` pair for band designs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cutoff {
    Single(f64),
    Band(f64, f64),
}

impl Cutoff {
    /// Multiply every edge by `factor`, e.g. to turn Hz into Nyquist-relative
    /// units.
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Cutoff::Single(w) => Cutoff::Single(w * factor),
            Cutoff::Band(lo, hi) => Cutoff::Band(lo * factor, hi * factor),
        }
    }
}

impl From<f64> for Cutoff {
    fn from(w: f64) -> Self {
        Cutoff::Single(w)
    }
}

impl From<(f64, f64)> for Cutoff {
    fn from((lo, hi): (f64, f64)) -> Self {
        Cutoff::Band(lo, hi)
    }
}

// ---------------------------------------------------------------------------
// TransferFunction – numerator / denominator coefficients
// ---------------------------------------------------------------------------

/// Digital filter in transfer-function form, `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl TransferFunction {
    /// Build from raw coefficients, normalising by `a[0]` and padding both
    /// vectors to the same length.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        let n = b.len().max(a.len());
        let a0 = a.first().copied().unwrap_or(1.0);
        let mut b: Vec<f64> = b.into_iter().map(|v| v / a0).collect();
        let mut a: Vec<f64> = a.into_iter().map(|v| v / a0).collect();
        b.resize(n, 0.0);
        a.resize(n, 0.0);
        Self { b, a }
    }

    /// Number of coefficients (filter order + 1).
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Initial delay-line state for a unit step, i.e. the state the filter
    /// would settle in after an infinitely long input of ones.
    pub fn lfilter_zi(&self) -> Vec<f64> {
        let n = self.len();
        if n < 2 {
            return Vec::new();
        }
        let (b, a) = (&self.b, &self.a);
        let b_sum: f64 = (1..n).map(|k| b[k] - a[k] * b[0]).sum();
        let a_sum: f64 = a.iter().sum();

        let mut zi = vec![0.0; n - 1];
        zi[0] = b_sum / a_sum;
        let mut asum = 1.0;
        let mut csum = 0.0;
        for k in 1..n - 1 {
            asum += a[k];
            csum += b[k] - a[k] * b[0];
            zi[k] = asum * zi[0] - csum;
        }
        zi
    }

    /// Run the filter over `x` (direct form II transposed), starting from the
    /// delay-line state `zi` or from rest.
    pub fn lfilter(&self, x: &[f64], zi: Option<&[f64]>) -> Vec<f64> {
        let n = self.len();
        let (b, a) = (&self.b, &self.a);
        let mut z = match zi {
            Some(zi) => zi.to_vec(),
            None => vec![0.0; n.saturating_sub(1)],
        };

        x.iter()
            .map(|&xi| {
                if n < 2 {
                    return b.first().copied().unwrap_or(0.0) * xi;
                }
                let yi = b[0] * xi + z[0];
                for j in 0..n - 2 {
                    z[j] = b[j + 1] * xi + z[j + 1] - a[j + 1] * yi;
                }
                z[n - 2] = b[n - 1] * xi - a[n - 1] * yi;
                yi
            })
            .collect()
    }

    /// Complex frequency response at `w` (radians per sample).
    pub fn response(&self, w: f64) -> Complex64 {
        let zinv = Complex64::from_polar(1.0, -w);
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * zinv + c)
        };
        eval(&self.b) / eval(&self.a)
    }
}

// ---------------------------------------------------------------------------
// Design
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Zpk {
    z: Vec<Complex64>,
    p: Vec<Complex64>,
    k: f64,
}

impl Zpk {
    fn degree(&self) -> usize {
        self.p.len() - self.z.len()
    }
}

/// Design a digital Butterworth filter. `cutoff` is relative to Nyquist.
pub fn butter(order: usize, cutoff: impl Into<Cutoff>, filter_type: FilterType) -> Result<TransferFunction> {
    if order == 0 {
        return Err(Error::InvalidOrder);
    }
    iirfilter(buttap(order), cutoff.into(), filter_type)
}

/// Design a digital Chebyshev type I filter with `ripple_db` passband ripple.
pub fn cheby1(
    order: usize,
    ripple_db: f64,
    cutoff: impl Into<Cutoff>,
    filter_type: FilterType,
) -> Result<TransferFunction> {
    if order == 0 {
        return Err(Error::InvalidOrder);
    }
    iirfilter(cheb1ap(order, ripple_db), cutoff.into(), filter_type)
}

fn prototype_angles(order: usize) -> impl Iterator<Item = f64> {
    let n = order as isize;
    (-n + 1..n)
        .step_by(2)
        .map(move |m| PI * m as f64 / (2.0 * order as f64))
}

fn buttap(order: usize) -> Zpk {
    let p = prototype_angles(order)
        .map(|theta| -Complex64::new(0.0, theta).exp())
        .collect();
    Zpk { z: Vec::new(), p, k: 1.0 }
}

fn cheb1ap(order: usize, ripple_db: f64) -> Zpk {
    let eps = (10f64.powf(0.1 * ripple_db) - 1.0).sqrt();
    let mu = (1.0 / eps).asinh() / order as f64;
    let p: Vec<Complex64> = prototype_angles(order)
        .map(|theta| -Complex64::new(mu, theta).sinh())
        .collect();
    let mut k = p.iter().fold(Complex64::new(1.0, 0.0), |acc, pi| acc * -*pi).re;
    if order % 2 == 0 {
        k /= (1.0 + eps * eps).sqrt();
    }
    Zpk { z: Vec::new(), p, k }
}

fn iirfilter(prototype: Zpk, cutoff: Cutoff, filter_type: FilterType) -> Result<TransferFunction> {
    let edges: Vec<f64> = match (cutoff, filter_type.is_band()) {
        (Cutoff::Single(w), false) => vec![w],
        (Cutoff::Band(lo, hi), true) => vec![lo, hi],
        (_, band) => {
            return Err(Error::CutoffMismatch {
                filter_type: filter_type.to_string(),
                expected: if band { "two" } else { "one" },
            })
        }
    };
    for &w in &edges {
        if !(w > 0.0 && w < 1.0) {
            return Err(Error::InvalidCutoff(w));
        }
    }
    if edges.len() == 2 && edges[0] >= edges[1] {
        return Err(Error::InvalidBand(edges[0], edges[1]));
    }

    // prewarp for fs = 2
    let warped: Vec<f64> = edges.iter().map(|w| 4.0 * (PI * w / 2.0).tan()).collect();

    let analog = match filter_type {
        FilterType::Lowpass => lp2lp(prototype, warped[0]),
        FilterType::Highpass => lp2hp(prototype, warped[0]),
        FilterType::Bandpass => {
            lp2bp(prototype, (warped[0] * warped[1]).sqrt(), warped[1] - warped[0])
        }
        FilterType::Bandstop => {
            lp2bs(prototype, (warped[0] * warped[1]).sqrt(), warped[1] - warped[0])
        }
    };
    let tf = zpk2tf(&bilinear(analog, 2.0));
    log::trace!("designed {filter_type} filter: b={:?} a={:?}", tf.b, tf.a);
    Ok(tf)
}

fn prod(values: impl Iterator<Item = Complex64>) -> Complex64 {
    values.fold(Complex64::new(1.0, 0.0), |acc, v| acc * v)
}

fn lp2lp(zpk: Zpk, wo: f64) -> Zpk {
    let degree = zpk.degree();
    Zpk {
        z: zpk.z.iter().map(|z| *z * wo).collect(),
        p: zpk.p.iter().map(|p| *p * wo).collect(),
        k: zpk.k * wo.powi(degree as i32),
    }
}

fn lp2hp(zpk: Zpk, wo: f64) -> Zpk {
    let degree = zpk.degree();
    let mut z: Vec<Complex64> = zpk.z.iter().map(|z| Complex64::from(wo) / *z).collect();
    z.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
    let gain = prod(zpk.z.iter().map(|z| -*z)) / prod(zpk.p.iter().map(|p| -*p));
    Zpk {
        z,
        p: zpk.p.iter().map(|p| Complex64::from(wo) / *p).collect(),
        k: zpk.k * gain.re,
    }
}

/// Split every root `r` into `r ± sqrt(r² - wo²)`.
fn split_roots(roots: &[Complex64], wo: f64) -> Vec<Complex64> {
    let shifted: Vec<Complex64> = roots.iter().map(|r| (*r * *r - wo * wo).sqrt()).collect();
    roots
        .iter()
        .zip(&shifted)
        .map(|(r, s)| *r + *s)
        .chain(roots.iter().zip(&shifted).map(|(r, s)| *r - *s))
        .collect()
}

fn lp2bp(zpk: Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = zpk.degree();
    let z_lp: Vec<Complex64> = zpk.z.iter().map(|z| *z * bw / 2.0).collect();
    let p_lp: Vec<Complex64> = zpk.p.iter().map(|p| *p * bw / 2.0).collect();
    let mut z = split_roots(&z_lp, wo);
    z.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
    Zpk {
        z,
        p: split_roots(&p_lp, wo),
        k: zpk.k * bw.powi(degree as i32),
    }
}

fn lp2bs(zpk: Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = zpk.degree();
    let z_hp: Vec<Complex64> = zpk.z.iter().map(|z| Complex64::from(bw / 2.0) / *z).collect();
    let p_hp: Vec<Complex64> = zpk.p.iter().map(|p| Complex64::from(bw / 2.0) / *p).collect();
    let mut z = split_roots(&z_hp, wo);
    z.extend(std::iter::repeat(Complex64::new(0.0, wo)).take(degree));
    z.extend(std::iter::repeat(Complex64::new(0.0, -wo)).take(degree));
    let gain = prod(zpk.z.iter().map(|z| -*z)) / prod(zpk.p.iter().map(|p| -*p));
    Zpk {
        z,
        p: split_roots(&p_hp, wo),
        k: zpk.k * gain.re,
    }
}

fn bilinear(zpk: Zpk, fs: f64) -> Zpk {
    let degree = zpk.degree();
    let fs2 = Complex64::from(2.0 * fs);
    let mut z: Vec<Complex64> = zpk.z.iter().map(|z| (fs2 + *z) / (fs2 - *z)).collect();
    z.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));
    let gain = prod(zpk.z.iter().map(|z| fs2 - *z)) / prod(zpk.p.iter().map(|p| fs2 - *p));
    Zpk {
        z,
        p: zpk.p.iter().map(|p| (fs2 + *p) / (fs2 - *p)).collect(),
        k: zpk.k * gain.re,
    }
}

/// Monic polynomial with the given roots, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for r in roots {
        let mut next = coeffs.clone();
        next.push(Complex64::new(0.0, 0.0));
        for (i, c) in coeffs.iter().enumerate() {
            next[i + 1] -= *c * *r;
        }
        coeffs = next;
    }
    coeffs
}

fn zpk2tf(zpk: &Zpk) -> TransferFunction {
    let b = poly(&zpk.z).iter().map(|c| c.re * zpk.k).collect();
    let a = poly(&zpk.p).iter().map(|c| c.re).collect();
    TransferFunction::new(b, a)
}

// ---------------------------------------------------------------------------
// Zero-phase application
// ---------------------------------------------------------------------------

/// Forward-backward filter `x`, padding both ends with an odd extension of
/// `padlen` samples. Output has the same length as `x` and no phase shift.
pub fn filtfilt(tf: &TransferFunction, x: &[f64], padlen: usize) -> Result<Vec<f64>> {
    if x.len() <= padlen {
        return Err(Error::SignalTooShort {
            len: x.len(),
            padlen,
        });
    }
    let first = x[0];
    let last = x[x.len() - 1];

    let mut ext = Vec::with_capacity(x.len() + 2 * padlen);
    ext.extend((1..=padlen).rev().map(|i| 2.0 * first - x[i]));
    ext.extend_from_slice(x);
    ext.extend((1..=padlen).map(|i| 2.0 * last - x[x.len() - 1 - i]));

    let zi = tf.lfilter_zi();
    let scaled = |x0: f64| zi.iter().map(|z| z * x0).collect::<Vec<f64>>();

    let forward = tf.lfilter(&ext, Some(&scaled(ext[0])));
    let reversed: Vec<f64> = forward.into_iter().rev().collect();
    let backward = tf.lfilter(&reversed, Some(&scaled(reversed[0])));

    Ok(backward
        .into_iter()
        .rev()
        .skip(padlen)
        .take(x.len())
        .collect())
}

/// [`filtfilt`] every column of `data` independently along the sample axis.
pub fn filtfilt_axis0(tf: &TransferFunction, data: ArrayView2<f64>, padlen: usize) -> Result<Array2<f64>> {
    if data.nrows() <= padlen {
        return Err(Error::SignalTooShort {
            len: data.nrows(),
            padlen,
        });
    }
    let mut out = Array2::<f64>::zeros(data.raw_dim());
    for (column, mut target) in data.axis_iter(Axis(1)).zip(out.axis_iter_mut(Axis(1))) {
        let filtered = filtfilt(tf, &column.to_vec(), padlen)?;
        target.assign(&ArrayView1::from(&filtered));
    }
    Ok(out)
}

/// Low-pass filter `data` along the sample axis and keep every `q`th row.
///
/// The anti-aliasing filter is an order 8 Chebyshev type I lowpass with
/// 0.05 dB ripple at `0.8 / q` of Nyquist, applied forward and backward.
/// The result has `ceil(rows / q)` rows.
pub fn decimate(data: ArrayView2<f64>, q: usize) -> Result<Array2<f64>> {
    if q == 0 {
        return Err(Error::InvalidFactor);
    }
    let tf = cheby1(DECIMATE_ORDER, DECIMATE_RIPPLE_DB, 0.8 / q as f64, FilterType::Lowpass)?;
    let padlen = 3 * tf.len();
    let filtered = filtfilt_axis0(&tf, data, padlen)?;
    Ok(filtered
        .slice_axis(Axis(0), Slice::new(0, None, q as isize))
        .to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::Array1;

    fn dc_gain(tf: &TransferFunction) -> f64 {
        tf.response(0.0).norm()
    }

    fn nyquist_gain(tf: &TransferFunction) -> f64 {
        tf.response(PI).norm()
    }

    #[test]
    fn test_filter_type_parsing() {
        assert_eq!("low".parse::<FilterType>().unwrap(), FilterType::Lowpass);
        assert_eq!("HighPass".parse::<FilterType>().unwrap(), FilterType::Highpass);
        assert_eq!("band".parse::<FilterType>().unwrap(), FilterType::Bandpass);
        assert_eq!("stop".parse::<FilterType>().unwrap(), FilterType::Bandstop);
        assert!(matches!(
            "notch".parse::<FilterType>(),
            Err(Error::UnknownFilterType(_))
        ));
    }

    #[test]
    fn test_butter_second_order_lowpass_coefficients() {
        let tf = butter(2, 0.5, FilterType::Lowpass).unwrap();
        let expected_b = [0.292_893_218_8, 0.585_786_437_6, 0.292_893_218_8];
        let expected_a = [1.0, 0.0, 0.171_572_875_3];
        for (got, want) in tf.b.iter().zip(expected_b) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
        for (got, want) in tf.a.iter().zip(expected_a) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_butter_first_order_highpass_coefficients() {
        let tf = butter(1, 0.5, FilterType::Highpass).unwrap();
        assert_abs_diff_eq!(tf.b[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(tf.b[1], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(tf.a[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(tf.a[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_butter_band_shapes() {
        let low = butter(4, 0.2, FilterType::Lowpass).unwrap();
        assert_abs_diff_eq!(dc_gain(&low), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(nyquist_gain(&low), 0.0, epsilon = 1e-9);
        // -3 dB at the cutoff
        assert_abs_diff_eq!(low.response(0.2 * PI).norm(), 0.5f64.sqrt(), epsilon = 1e-9);

        let high = butter(4, 0.2, FilterType::Highpass).unwrap();
        assert_abs_diff_eq!(dc_gain(&high), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(nyquist_gain(&high), 1.0, epsilon = 1e-9);

        let pass = butter(3, (0.2, 0.4), FilterType::Bandpass).unwrap();
        assert_eq!(pass.len(), 7);
        assert_abs_diff_eq!(dc_gain(&pass), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(nyquist_gain(&pass), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pass.response(0.2 * PI).norm(), 0.5f64.sqrt(), epsilon = 1e-6);

        let stop = butter(3, (0.2, 0.4), FilterType::Bandstop).unwrap();
        assert_abs_diff_eq!(dc_gain(&stop), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(nyquist_gain(&stop), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cheby1_even_order_dc_gain_sits_at_ripple_floor() {
        let tf = cheby1(8, 0.05, 0.4, FilterType::Lowpass).unwrap();
        let expected = 1.0 / 10f64.powf(0.005).sqrt();
        assert_relative_eq!(dc_gain(&tf), expected, max_relative = 1e-8);
    }

    #[test]
    fn test_design_rejects_bad_arguments() {
        assert!(matches!(butter(0, 0.5, FilterType::Lowpass), Err(Error::InvalidOrder)));
        assert!(matches!(butter(2, 1.0, FilterType::Lowpass), Err(Error::InvalidCutoff(_))));
        assert!(matches!(butter(2, 0.0, FilterType::Highpass), Err(Error::InvalidCutoff(_))));
        assert!(matches!(butter(2, -0.3, FilterType::Lowpass), Err(Error::InvalidCutoff(_))));
        assert!(matches!(
            butter(2, 0.5, FilterType::Bandpass),
            Err(Error::CutoffMismatch { .. })
        ));
        assert!(matches!(
            butter(2, (0.1, 0.3), FilterType::Lowpass),
            Err(Error::CutoffMismatch { .. })
        ));
        assert!(matches!(
            butter(2, (0.3, 0.1), FilterType::Bandstop),
            Err(Error::InvalidBand(_, _))
        ));
    }

    #[test]
    fn test_lfilter_zi_gives_step_steady_state() {
        let tf = butter(3, 0.3, FilterType::Lowpass).unwrap();
        let zi = tf.lfilter_zi();
        let y = tf.lfilter(&[1.0; 40], Some(&zi));
        for v in y {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lfilter_from_rest_is_impulse_response() {
        let tf = TransferFunction::new(vec![0.5, 0.5], vec![1.0]);
        let y = tf.lfilter(&[1.0, 0.0, 0.0, 2.0], None);
        assert_eq!(y, vec![0.5, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_filtfilt_keeps_constant_signal() {
        let tf = butter(4, 0.1, FilterType::Lowpass).unwrap();
        let y = filtfilt(&tf, &[3.0; 64], 20).unwrap();
        assert_eq!(y.len(), 64);
        for v in y {
            assert_abs_diff_eq!(v, 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_filtfilt_removes_high_frequency_without_phase_shift() {
        let fs = 200.0;
        let n = 1000;
        let t = Array1::from_iter((0..n).map(|i| i as f64 / fs));
        let slow = t.mapv(|t| (2.0 * PI * 1.0 * t).sin());
        let noisy = &slow + &t.mapv(|t| 0.5 * (2.0 * PI * 40.0 * t).sin());

        let tf = butter(4, 5.0 / (fs / 2.0), FilterType::Lowpass).unwrap();
        let y = filtfilt(&tf, &noisy.to_vec(), 150).unwrap();

        for i in 200..800 {
            assert_abs_diff_eq!(y[i], slow[i], epsilon = 0.02);
        }
    }

    #[test]
    fn test_filtfilt_rejects_short_signal() {
        let tf = butter(2, 0.3, FilterType::Lowpass).unwrap();
        let err = filtfilt(&tf, &[0.0; 150], 150).unwrap_err();
        assert!(matches!(err, Error::SignalTooShort { len: 150, padlen: 150 }));
    }

    #[test]
    fn test_decimate_shape_and_dc_level() {
        let data = Array2::<f64>::from_elem((101, 2), 2.0);
        let out = decimate(data.view(), 3).unwrap();
        assert_eq!(out.dim(), (34, 2));

        let tf = cheby1(DECIMATE_ORDER, DECIMATE_RIPPLE_DB, 0.8 / 3.0, FilterType::Lowpass).unwrap();
        let g = dc_gain(&tf);
        for v in out.iter() {
            assert_relative_eq!(*v, 2.0 * g * g, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_decimate_rejects_zero_factor_and_short_input() {
        let data = Array2::<f64>::zeros((100, 1));
        assert!(matches!(decimate(data.view(), 0), Err(Error::InvalidFactor)));

        let short = Array2::<f64>::zeros((27, 1));
        assert!(matches!(
            decimate(short.view(), 2),
            Err(Error::SignalTooShort { padlen: 27, .. })
        ));
    }
}
