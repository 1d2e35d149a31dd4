use alloc::vec::Vec;

use super::CoefficientConverter;
use crate::adaptive::config::check_gamma;
use crate::error::check_coefficient_length;
use crate::Error;

/// Undoes the gain normalization of a generalized cepstrum.
///
/// The input carries the gain K in its first element and the normalized
/// coefficients c'(m) after it. With z = K^gamma the output is
///
/// ```text
/// c(0) = (z - 1) / gamma,  c(m) = c'(m) * z    (gamma != 0)
/// c(0) = ln K,             c(m) = c'(m)        (gamma == 0)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InverseGainNormalization {
    order: usize,
    gamma: f64,
}

impl InverseGainNormalization {
    pub fn new(order: usize, gamma: f64) -> Result<Self, Error> {
        check_gamma(gamma)?;
        Ok(InverseGainNormalization { order, gamma })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl CoefficientConverter for InverseGainNormalization {
    fn num_order(&self) -> usize {
        self.order
    }

    fn convert(&self, input: &[f64], output: &mut Vec<f64>) -> Result<(), Error> {
        check_coefficient_length("inverse gain normalization", input, self.order)?;
        output.resize(self.order + 1, 0.0);

        if self.gamma == 0.0 {
            output[0] = libm::log(input[0]);
            output[1..].copy_from_slice(&input[1..]);
        } else {
            let z = libm::pow(input[0], self.gamma);
            output[0] = (z - 1.0) / self.gamma;
            for (c, normalized) in output[1..].iter_mut().zip(&input[1..]) {
                *c = normalized * z;
            }
        }
        Ok(())
    }
}
