use micromath::F32Ext;

use super::fft::real_fft;
use crate::Error;

/// Evaluates the log amplitude response ln|H(w)| of a cepstral model on
/// `fft_size / 2 + 1` equally spaced frequencies from 0 to pi.
///
/// `cepstrum` holds c(0), ..., c(M) and `fft_buffer` is the scratch buffer
/// whose length is the FFT size. With C(w) the Fourier transform of the
/// cepstrum, H = exp(C) when `gamma` is 0 and (1 + gamma C)^(1 / gamma)
/// otherwise. The cepstrum must be the un-normalized generalized cepstrum,
/// as produced by the generalized cepstral analysis. For a mel-cepstrum the
/// frequencies are on the warped axis.
pub fn log_amplitude_spectrum(
    cepstrum: &[f64],
    gamma: f64,
    fft_buffer: &mut [f32],
    output: &mut [f32],
) -> Result<(), Error> {
    let fft_size = fft_buffer.len();
    if output.len() != fft_size / 2 + 1 {
        return Err(Error::OutputLength {
            expected: fft_size / 2 + 1,
            actual: output.len(),
        });
    }
    if cepstrum.len() > fft_size {
        return Err(Error::CoefficientLength {
            component: "log amplitude spectrum",
            expected: fft_size,
            actual: cepstrum.len(),
        });
    }

    for (x, c) in fft_buffer.iter_mut().zip(cepstrum.iter().chain(core::iter::repeat(&0.0))) {
        *x = *c as f32;
    }
    let fft = real_fft(fft_buffer)?;
    let nyquist = fft[0].im;
    fft[0].im = 0.0;

    let gamma = gamma as f32;
    let log_amplitude = |re: f32, im: f32| {
        if gamma == 0.0 {
            re
        } else {
            let re = 1.0 + gamma * re;
            let im = gamma * im;
            0.5 * F32Ext::ln(re * re + im * im) / gamma
        }
    };

    for (value, bin) in output.iter_mut().zip(fft.iter()) {
        *value = log_amplitude(bin.re, bin.im);
    }
    output[fft_size / 2] = log_amplitude(nyquist, 0.0);
    Ok(())
}
