use core::convert::TryInto;

use crate::Error;

/// In-place real FFT of a buffer of 8 to 4096 samples (powers of two).
///
/// Returns the first N/2 bins. As packed by [`microfft`], bin 0 holds the DC
/// value in its real part and the Nyquist value in its imaginary part.
pub fn real_fft(buffer: &mut [f32]) -> Result<&mut [microfft::Complex32], Error> {
    let fft_size = buffer.len();
    let unsupported = |_| Error::UnsupportedFftSize(fft_size);
    let bins: &mut [microfft::Complex32] = match fft_size {
        8 => microfft::real::rfft_8(buffer.try_into().map_err(unsupported)?),
        16 => microfft::real::rfft_16(buffer.try_into().map_err(unsupported)?),
        32 => microfft::real::rfft_32(buffer.try_into().map_err(unsupported)?),
        64 => microfft::real::rfft_64(buffer.try_into().map_err(unsupported)?),
        128 => microfft::real::rfft_128(buffer.try_into().map_err(unsupported)?),
        256 => microfft::real::rfft_256(buffer.try_into().map_err(unsupported)?),
        512 => microfft::real::rfft_512(buffer.try_into().map_err(unsupported)?),
        1024 => microfft::real::rfft_1024(buffer.try_into().map_err(unsupported)?),
        2048 => microfft::real::rfft_2048(buffer.try_into().map_err(unsupported)?),
        4096 => microfft::real::rfft_4096(buffer.try_into().map_err(unsupported)?),
        _ => return Err(Error::UnsupportedFftSize(fft_size)),
    };
    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_has_flat_spectrum() {
        for fft_size in [8, 16, 32, 64, 4096].iter() {
            let mut buffer = alloc::vec![0.0_f32; *fft_size];
            buffer[0] = 1.0;
            let bins = real_fft(&mut buffer).unwrap();
            assert_eq!(bins.len(), fft_size / 2);
            assert!((bins[0].re - 1.0).abs() <= 1e-6);
            assert!((bins[0].im - 1.0).abs() <= 1e-6);
            for bin in bins[1..].iter() {
                assert!((bin.re - 1.0).abs() <= 1e-6);
                assert!(bin.im.abs() <= 1e-6);
            }
        }
    }

    #[test]
    fn test_rejects_unsupported_size() {
        assert_eq!(real_fft(&mut [0.0; 12]).unwrap_err(), Error::UnsupportedFftSize(12));
        assert_eq!(real_fft(&mut [0.0; 4]).unwrap_err(), Error::UnsupportedFftSize(4));
    }
}
