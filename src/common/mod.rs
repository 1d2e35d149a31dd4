//! Spectral helpers for inspecting estimated cepstra.

mod fft;
mod spectrum;

pub use fft::real_fft;
pub use spectrum::log_amplitude_spectrum;
