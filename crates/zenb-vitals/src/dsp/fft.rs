//! Radix-2 FFT and magnitude spectrum
//!
//! Iterative Cooley-Tukey: bit-reversal permutation followed by butterfly
//! passes with twiddles `e^{-2πik/N}`. Input is zero-padded to the next power
//! of two.

use ndarray::Array1;
use num_complex::Complex32;
use std::f32::consts::PI;

/// One bin of a magnitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralBin {
    pub frequency_hz: f32,
    pub magnitude: f32,
}

/// In-place forward FFT. `buffer.len()` must be a power of two.
pub fn fft_in_place(buffer: &mut [Complex32]) {
    let n = buffer.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two(), "radix-2 FFT needs 2^k points, got {}", n);

    // bit-reversal permutation
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            buffer.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let angle = -2.0 * PI / len as f32;
        let w_len = Complex32::new(angle.cos(), angle.sin());
        for start in (0..n).step_by(len) {
            let mut w = Complex32::new(1.0, 0.0);
            for k in 0..len / 2 {
                let even = buffer[start + k];
                let odd = buffer[start + k + len / 2] * w;
                buffer[start + k] = even + odd;
                buffer[start + k + len / 2] = even - odd;
                w *= w_len;
            }
        }
        len <<= 1;
    }
}

/// Magnitudes of the first N/2 bins of the zero-padded real signal
pub fn magnitude_spectrum(signal: &Array1<f32>, sample_rate: f32) -> Vec<SpectralBin> {
    if signal.is_empty() {
        return Vec::new();
    }
    let padded_len = signal.len().next_power_of_two();
    let mut buffer: Vec<Complex32> = signal
        .iter()
        .map(|&s| Complex32::new(s, 0.0))
        .chain(std::iter::repeat(Complex32::new(0.0, 0.0)))
        .take(padded_len)
        .collect();

    fft_in_place(&mut buffer);

    let bin_res = sample_rate / padded_len as f32;
    buffer
        .iter()
        .take(padded_len / 2)
        .enumerate()
        .map(|(i, c)| SpectralBin {
            frequency_hz: i as f32 * bin_res,
            magnitude: c.norm(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rustfft::FftPlanner;

    #[test]
    fn test_impulse_is_flat() {
        let mut buf = vec![Complex32::new(0.0, 0.0); 8];
        buf[0] = Complex32::new(1.0, 0.0);
        fft_in_place(&mut buf);
        for c in buf {
            assert_relative_eq!(c.re, 1.0, epsilon = 1e-6);
            assert_relative_eq!(c.im, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_matches_rustfft() {
        let n = 64;
        let input: Vec<Complex32> = (0..n)
            .map(|i| {
                let t = i as f32;
                Complex32::new((0.3 * t).sin() + 0.5 * (1.7 * t).cos(), 0.0)
            })
            .collect();

        let mut ours = input.clone();
        fft_in_place(&mut ours);

        let mut reference = input;
        FftPlanner::<f32>::new()
            .plan_fft_forward(n)
            .process(&mut reference);

        for (a, b) in ours.iter().zip(reference.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-3);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_spectrum_is_nyquist_limited_and_padded() {
        let signal = Array1::from(vec![1.0f32; 200]);
        let spec = magnitude_spectrum(&signal, 30.0);
        assert_eq!(spec.len(), 128);
        assert_relative_eq!(spec[1].frequency_hz, 30.0 / 256.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sine_peak_bin() {
        let fs = 32.0;
        // exactly on bin 8 of a 64-point transform: 8 * 32 / 64 = 4 Hz
        let signal: Array1<f32> = (0..64)
            .map(|i| (2.0 * PI * 4.0 * i as f32 / fs).sin())
            .collect();
        let spec = magnitude_spectrum(&signal, fs);
        let peak = spec
            .iter()
            .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude))
            .unwrap();
        assert_relative_eq!(peak.frequency_hz, 4.0, epsilon = 1e-5);
        assert_relative_eq!(peak.magnitude, 32.0, epsilon = 1e-2);
    }
}
