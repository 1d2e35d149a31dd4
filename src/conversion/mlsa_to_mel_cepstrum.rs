use alloc::vec::Vec;

use super::CoefficientConverter;
use crate::adaptive::config::check_alpha;
use crate::error::check_coefficient_length;
use crate::Error;

/// Converts MLSA filter coefficients b(m) to the mel-cepstrum c(m):
///
/// ```text
/// c(M) = b(M)
/// c(m) = b(m) + alpha * b(m + 1),  m = M - 1, ..., 0
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MlsaToMelCepstrum {
    order: usize,
    alpha: f64,
}

impl MlsaToMelCepstrum {
    pub fn new(order: usize, alpha: f64) -> Result<Self, Error> {
        check_alpha(alpha)?;
        Ok(MlsaToMelCepstrum { order, alpha })
    }
}

impl CoefficientConverter for MlsaToMelCepstrum {
    fn num_order(&self) -> usize {
        self.order
    }

    fn convert(&self, input: &[f64], output: &mut Vec<f64>) -> Result<(), Error> {
        check_coefficient_length("MLSA to mel-cepstrum conversion", input, self.order)?;
        output.resize(self.order + 1, 0.0);

        if self.alpha == 0.0 {
            output.copy_from_slice(input);
            return Ok(());
        }

        output[self.order] = input[self.order];
        for m in (0..self.order).rev() {
            output[m] = input[m] + self.alpha * input[m + 1];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_conversion() {
        let converter = MlsaToMelCepstrum::new(2, 0.5).unwrap();
        let mut output = vec![];
        converter.convert(&[1.0, 2.0, 4.0], &mut output).unwrap();
        assert_eq!(output, vec![2.0, 4.0, 4.0]);
    }

    #[test]
    fn test_zero_alpha_copies() {
        let converter = MlsaToMelCepstrum::new(2, 0.0).unwrap();
        let mut output = vec![9.0; 7];
        converter.convert(&[1.0, -2.0, 4.0], &mut output).unwrap();
        assert_eq!(output, vec![1.0, -2.0, 4.0]);
    }

    #[test]
    fn test_rejects_malformed_input() {
        let converter = MlsaToMelCepstrum::new(2, 0.35).unwrap();
        let mut output = vec![];
        assert!(converter.convert(&[1.0, 2.0], &mut output).is_err());
        assert!(output.is_empty());
    }
}
