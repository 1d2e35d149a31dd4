//! Conversions from the internal coefficient representation of an estimator
//! to the cepstral form handed to callers.

mod inverse_gain_normalization;
mod mlsa_to_mel_cepstrum;

pub use inverse_gain_normalization::InverseGainNormalization;
pub use mlsa_to_mel_cepstrum::MlsaToMelCepstrum;

use alloc::vec::Vec;

use crate::Error;

pub trait CoefficientConverter {
    /// Order of the converted vectors. Both input and output have
    /// `num_order() + 1` elements.
    fn num_order(&self) -> usize;

    /// Converts `input`, resizing `output` if needed.
    fn convert(&self, input: &[f64], output: &mut Vec<f64>) -> Result<(), Error>;
}
