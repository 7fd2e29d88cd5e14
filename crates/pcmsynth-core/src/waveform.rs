//! Parametric waveform generation into 8-bit unsigned PCM.
//!
//! Every wave shape is evaluated directly from the sample time `t = i / 44100`
//! (no phase accumulator), then scaled by volume and quantized around the
//! zero crossing at 128.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Fixed output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Quantized value of a zero amplitude sample.
pub const ZERO_CROSSING: u8 = 128;

/// Peak deflection from the zero crossing for a full-scale value.
const AMPLITUDE: f64 = 127.0;

/// Basic wave shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    /// Pure sine wave.
    Sine,
    /// Square wave at half amplitude.
    Square,
    /// Triangle wave.
    Triangle,
    /// Sawtooth wave.
    Sawtooth,
    /// White noise at half amplitude.
    Noise,
}

impl WaveShape {
    /// All wave shapes, in declaration order.
    pub const ALL: [WaveShape; 5] = [
        WaveShape::Sine,
        WaveShape::Square,
        WaveShape::Triangle,
        WaveShape::Sawtooth,
        WaveShape::Noise,
    ];

    /// Lowercase name used in melody descriptions and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveShape::Sine => "sine",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
            WaveShape::Sawtooth => "sawtooth",
            WaveShape::Noise => "noise",
        }
    }

    /// Evaluates the unquantized value at time `t` seconds.
    ///
    /// Sine, triangle and sawtooth span [-1, 1]. Square and noise span
    /// [-0.5, 0.5]; the noise level matches what existing melodies were
    /// balanced against and is kept as is.
    pub fn value_at<R: Rng + ?Sized>(&self, frequency: f64, t: f64, rng: &mut R) -> f64 {
        let ft = frequency * t;
        match self {
            WaveShape::Sine => (2.0 * PI * ft).sin(),
            WaveShape::Square => {
                if (2.0 * PI * ft).sin() > 0.0 {
                    0.5
                } else {
                    -0.5
                }
            }
            WaveShape::Triangle => 2.0 * (2.0 * (ft - (ft + 0.5).floor())).abs() - 1.0,
            WaveShape::Sawtooth => 2.0 * (ft - (ft + 0.5).floor()),
            WaveShape::Noise => rng.gen_range(-0.5..=0.5),
        }
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveShape {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| {
                SynthError::invalid_param(
                    "wave_shape",
                    format!(
                        "unknown wave shape '{}' (expected sine, square, triangle, sawtooth or noise)",
                        s
                    ),
                )
            })
    }
}

/// Number of samples covering `duration_ms` at [`SAMPLE_RATE`], rounded.
///
/// Negative, infinite and NaN durations yield zero samples.
pub fn sample_count(duration_ms: f64) -> usize {
    let exact = SAMPLE_RATE as f64 * duration_ms / 1000.0;
    if exact.is_finite() && exact > 0.0 {
        exact.round() as usize
    } else {
        0
    }
}

/// A buffer of `duration_ms` worth of zero-crossing samples.
pub fn silence(duration_ms: f64) -> Vec<u8> {
    vec![ZERO_CROSSING; sample_count(duration_ms)]
}

/// Clamps a volume to [0, 1]; NaN counts as muted.
pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Quantizes a value in [-1, 1] to unsigned 8-bit around [`ZERO_CROSSING`].
///
/// # Examples
/// ```
/// use pcmsynth_core::waveform::quantize;
///
/// assert_eq!(quantize(0.0), 128);
/// assert_eq!(quantize(1.0), 255);
/// assert_eq!(quantize(-1.0), 1);
/// assert_eq!(quantize(5.0), 255);
/// ```
pub fn quantize(value: f64) -> u8 {
    (value * AMPLITUDE + ZERO_CROSSING as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Renders a tone to 8-bit PCM.
///
/// # Arguments
/// * `frequency_hz` - Tone frequency; 0 renders silence for every shape
/// * `duration_ms` - Duration in milliseconds
/// * `shape` - Wave shape
/// * `volume` - Linear volume, clamped to [0, 1]
/// * `rng` - Random source for the noise shape
///
/// # Returns
/// `sample_count(duration_ms)` samples
pub fn render_waveform<R: Rng + ?Sized>(
    frequency_hz: f64,
    duration_ms: f64,
    shape: WaveShape,
    volume: f64,
    rng: &mut R,
) -> Vec<u8> {
    let num_samples = sample_count(duration_ms);
    if frequency_hz == 0.0 {
        return vec![ZERO_CROSSING; num_samples];
    }

    let volume = clamp_volume(volume);
    let sample_rate = SAMPLE_RATE as f64;

    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            quantize(shape.value_at(frequency_hz, t, rng) * volume)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn render(freq: f64, ms: f64, shape: WaveShape, volume: f64) -> Vec<u8> {
        let mut rng = create_rng(42);
        render_waveform(freq, ms, shape, volume, &mut rng)
    }

    #[test]
    fn test_zero_frequency_is_silence_for_every_shape() {
        for shape in WaveShape::ALL {
            let buf = render(0.0, 250.0, shape, 1.0);
            assert_eq!(buf.len(), 11025);
            assert!(buf.iter().all(|&s| s == ZERO_CROSSING), "{} not silent", shape);
        }
    }

    #[test]
    fn test_buffer_length_matches_duration() {
        for &ms in &[0.0, 1.0, 10.0, 22.675, 100.0, 333.3, 500.0, 1000.0, 2500.0] {
            let expected = (44100.0 * ms / 1000.0_f64).round() as usize;
            for shape in WaveShape::ALL {
                assert_eq!(render(440.0, ms, shape, 1.0).len(), expected, "{} ms", ms);
            }
        }
    }

    #[test]
    fn test_negative_duration_is_empty() {
        assert!(render(440.0, -5.0, WaveShape::Sine, 1.0).is_empty());
        assert!(silence(f64::NAN).is_empty());
        assert!(silence(f64::INFINITY).is_empty());
        assert!(render(440.0, f64::INFINITY, WaveShape::Sine, 1.0).is_empty());
    }

    #[test]
    fn test_sine_starts_at_zero_crossing() {
        let buf = render(440.0, 10.0, WaveShape::Sine, 1.0);
        assert_eq!(buf[0], 128);
        // Quarter period of 441 Hz at 44100 Hz is exactly 25 samples
        let buf = render(441.0, 10.0, WaveShape::Sine, 1.0);
        assert_eq!(buf[25], 255);
        assert_eq!(buf[75], 1);
    }

    #[test]
    fn test_square_is_half_amplitude() {
        let buf = render(441.0, 10.0, WaveShape::Square, 1.0);
        // sin(0) is not positive, so the first sample is the low level
        assert_eq!(buf[0], 65);
        assert_eq!(buf[10], 192);
        assert!(buf.iter().all(|&s| s == 65 || s == 192));
    }

    #[test]
    fn test_triangle_and_sawtooth_start_values() {
        let tri = render(441.0, 10.0, WaveShape::Triangle, 1.0);
        assert_eq!(tri[0], 1);
        let saw = render(441.0, 10.0, WaveShape::Sawtooth, 1.0);
        assert_eq!(saw[0], 128);
    }

    #[test]
    fn test_noise_is_half_amplitude() {
        let buf = render(440.0, 200.0, WaveShape::Noise, 1.0);
        assert!(buf.iter().all(|&s| (64..=192).contains(&s)));
        // Independent draws per sample
        let distinct: std::collections::HashSet<u8> = buf.iter().copied().collect();
        assert!(distinct.len() > 50);
    }

    #[test]
    fn test_noise_is_deterministic_for_a_seed() {
        let a = render(440.0, 50.0, WaveShape::Noise, 1.0);
        let b = render(440.0, 50.0, WaveShape::Noise, 1.0);
        assert_eq!(a, b);

        let mut other = create_rng(43);
        let c = render_waveform(440.0, 50.0, WaveShape::Noise, 1.0, &mut other);
        assert_ne!(a, c);
    }

    #[test]
    fn test_volume_is_clamped() {
        assert_eq!(
            render(440.0, 20.0, WaveShape::Sine, 3.0),
            render(440.0, 20.0, WaveShape::Sine, 1.0)
        );
        let muted = render(440.0, 20.0, WaveShape::Sawtooth, -1.0);
        assert!(muted.iter().all(|&s| s == ZERO_CROSSING));
        let nan = render(440.0, 20.0, WaveShape::Sine, f64::NAN);
        assert!(nan.iter().all(|&s| s == ZERO_CROSSING));
    }

    #[test]
    fn test_half_volume_halves_deflection() {
        let buf = render(441.0, 10.0, WaveShape::Sine, 0.5);
        assert_eq!(buf[25], 192); // 63.5 + 128 rounds up
    }

    #[test]
    fn test_wave_shape_parsing() {
        for shape in WaveShape::ALL {
            assert_eq!(shape.as_str().parse::<WaveShape>().unwrap(), shape);
            assert_eq!(shape.to_string(), shape.as_str());
        }
        assert!("organ".parse::<WaveShape>().is_err());
        assert!("Sine".parse::<WaveShape>().is_err());
    }

    #[test]
    fn test_wave_shape_serde() {
        let shape: WaveShape = serde_json::from_str("\"sawtooth\"").unwrap();
        assert_eq!(shape, WaveShape::Sawtooth);
        assert_eq!(serde_json::to_string(&WaveShape::Noise).unwrap(), "\"noise\"");
    }
}
