use alloc::{vec, vec::Vec};
use tracing::debug;

use super::FilterPrimitive;
use crate::adaptive::buffer::check_length;
use crate::adaptive::config::check_alpha;
use crate::error::check_coefficient_length;
use crate::Error;

/// Modified Pade approximation coefficients of exp(w), indexed by the
/// approximation order. Index 0 is unused.
const PADE_4: [f64; 5] = [1.0, 0.4999273, 0.1067005, 0.01170221, 0.0005656279];
const PADE_5: [f64; 6] = [
    1.0,
    0.4999391,
    0.1107098,
    0.01369984,
    0.0009564853,
    0.00003041721,
];
const PADE_6: [f64; 7] = [
    1.0,
    0.499962892438014,
    0.113301885013440,
    0.014990477313604,
    0.001229199693052,
    0.000059608811847,
    0.000001343163774,
];
const PADE_7: [f64; 8] = [
    1.0,
    0.499969087072637,
    0.115077033090460,
    0.015876603489178,
    0.001424479579072,
    0.000083492347365,
    0.000002972456979,
    0.000000049755937,
];

fn pade_coefficients(pade_order: usize) -> Result<&'static [f64], Error> {
    match pade_order {
        4 => Ok(&PADE_4),
        5 => Ok(&PADE_5),
        6 => Ok(&PADE_6),
        7 => Ok(&PADE_7),
        _ => Err(Error::UnsupportedPadeOrder(pade_order)),
    }
}

/// Mel-log spectrum approximation (MLSA) digital filter.
///
/// Realizes exp(F(z)) with F(z) = b(0) + sum b(m) Phi_m(z), where Phi_m is the
/// m:th mel-warped basis function for the all-pass constant alpha. The
/// exponential is approximated with a Pade approximation applied to two
/// cascaded basic filters: the first holds the b(1) term, the second the
/// remaining terms.
#[derive(Debug, Clone)]
pub struct MlsaDigitalFilter {
    order: usize,
    alpha: f64,
    pade: &'static [f64],
}

/// Delay lines of an [`MlsaDigitalFilter`].
#[derive(Debug, Default, PartialEq)]
pub struct MlsaFilterState {
    basic_filter_1: Vec<f64>,
    basic_filter_2: Vec<f64>,
    exp_filter_1: Vec<f64>,
    exp_filter_2: Vec<f64>,
}

impl Clone for MlsaFilterState {
    fn clone(&self) -> Self {
        MlsaFilterState {
            basic_filter_1: self.basic_filter_1.clone(),
            basic_filter_2: self.basic_filter_2.clone(),
            exp_filter_1: self.exp_filter_1.clone(),
            exp_filter_2: self.exp_filter_2.clone(),
        }
    }

    // Reuses the existing allocations.
    fn clone_from(&mut self, source: &Self) {
        self.basic_filter_1.clone_from(&source.basic_filter_1);
        self.basic_filter_2.clone_from(&source.basic_filter_2);
        self.exp_filter_1.clone_from(&source.exp_filter_1);
        self.exp_filter_2.clone_from(&source.exp_filter_2);
    }
}

fn ensure_zeroed(buffer: &mut Vec<f64>, len: usize) {
    if buffer.len() != len {
        *buffer = vec![0.0; len];
    }
}

impl MlsaDigitalFilter {
    pub fn new(order: usize, pade_order: usize, alpha: f64) -> Result<Self, Error> {
        check_alpha(alpha)?;
        let pade = pade_coefficients(pade_order)?;
        debug!(order, pade_order, alpha, "created MLSA digital filter");
        Ok(MlsaDigitalFilter { order, alpha, pade })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn pade_order(&self) -> usize {
        self.pade.len() - 1
    }
}

impl FilterPrimitive for MlsaDigitalFilter {
    type State = MlsaFilterState;

    fn num_order(&self) -> usize {
        self.order
    }

    fn check_state(&self, state: &MlsaFilterState) -> Result<(), Error> {
        if *state == MlsaFilterState::default() {
            return Ok(());
        }
        let pade_order = self.pade_order();
        check_length("basic_filter_1", &state.basic_filter_1, pade_order + 1)?;
        check_length("basic_filter_2", &state.basic_filter_2, pade_order * (self.order + 2))?;
        check_length("exp_filter_1", &state.exp_filter_1, pade_order + 1)?;
        check_length("exp_filter_2", &state.exp_filter_2, pade_order + 1)
    }

    fn apply(
        &self,
        coefficients: &[f64],
        input: f64,
        state: &mut MlsaFilterState,
    ) -> Result<f64, Error> {
        check_coefficient_length("MLSA digital filter", coefficients, self.order)?;

        let pade_order = self.pade_order();
        let order = self.order;
        ensure_zeroed(&mut state.basic_filter_1, pade_order + 1);
        ensure_zeroed(&mut state.basic_filter_2, pade_order * (order + 2));
        ensure_zeroed(&mut state.exp_filter_1, pade_order + 1);
        ensure_zeroed(&mut state.exp_filter_2, pade_order + 1);

        let gained_input = input * libm::exp(coefficients[0]);
        if order == 0 {
            return Ok(gained_input);
        }

        let b = coefficients;
        let alpha = self.alpha;
        let beta = 1.0 - alpha * alpha;

        // First stage, the b(1) term.
        let mut first_output = 0.0;
        {
            let d1 = &mut state.basic_filter_1;
            let p1 = &mut state.exp_filter_1;
            let mut x = gained_input;
            for i in (1..=pade_order).rev() {
                d1[i] = beta * p1[i - 1] + alpha * d1[i];
                p1[i] = d1[i] * b[1];

                let v = p1[i] * self.pade[i];
                if i % 2 == 1 {
                    x += v;
                } else {
                    x -= v;
                }
                first_output += v;
            }
            p1[0] = x;
            first_output += x;
        }

        // Second stage, the b(2)..b(M) terms.
        let mut second_output = 0.0;
        {
            let p2 = &mut state.exp_filter_2;
            let mut x = first_output;
            for i in (1..=pade_order).rev() {
                let offset = (i - 1) * (order + 2);
                let d2 = &mut state.basic_filter_2[offset..offset + order + 2];

                d2[0] = p2[i - 1];
                d2[1] = beta * p2[i - 1] + alpha * d2[1];
                let mut y = 0.0;
                for j in 2..=order {
                    d2[j] += alpha * (d2[j + 1] - d2[j - 1]);
                    y += d2[j] * b[j];
                }
                p2[i] = y;
                for j in (2..=order + 1).rev() {
                    d2[j] = d2[j - 1];
                }

                let v = p2[i] * self.pade[i];
                if i % 2 == 1 {
                    x += v;
                } else {
                    x -= v;
                }
                second_output += v;
            }
            p2[0] = x;
            second_output += x;
        }

        Ok(second_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn impulse_response(filter: &MlsaDigitalFilter, coefficients: &[f64], len: usize) -> Vec<f64> {
        let mut state = MlsaFilterState::default();
        (0..len)
            .map(|n| {
                let input = if n == 0 { 1.0 } else { 0.0 };
                filter.apply(coefficients, input, &mut state).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_first_order_approximates_exponential() {
        // With alpha = 0, exp(0.5 z^-1) has the impulse response 0.5^n / n!.
        let filter = MlsaDigitalFilter::new(1, 4, 0.0).unwrap();
        let response = impulse_response(&filter, &[0.0, 0.5], 5);
        let reference = [
            1.0,
            0.4999273,
            0.12496365264264502,
            0.020826300013475196,
            0.0026036786938307974,
        ];
        for (value, expected) in response.iter().zip(reference.iter()) {
            assert!((value - expected).abs() <= 1e-12);
        }
        let exact = [1.0, 0.5, 0.125, 0.125 / 6.0, 0.125 / 48.0];
        for (value, expected) in response.iter().zip(exact.iter()) {
            assert!((value - expected).abs() <= 1e-3);
        }
    }

    #[test]
    fn test_zero_order_applies_gain() {
        let filter = MlsaDigitalFilter::new(0, 5, 0.42).unwrap();
        let mut state = MlsaFilterState::default();
        let output = filter.apply(&[0.1], 2.0, &mut state).unwrap();
        assert!((output - 2.0 * libm::exp(0.1)).abs() <= 1e-15);
    }

    #[test]
    fn test_zero_coefficients_pass_input_through() {
        let filter = MlsaDigitalFilter::new(8, 6, 0.35).unwrap();
        let mut state = MlsaFilterState::default();
        for input in [0.3, -1.0, 0.25, 0.0, 0.7].iter() {
            let output = filter.apply(&[0.0; 9], *input, &mut state).unwrap();
            assert_eq!(output, *input);
        }
    }

    #[test]
    fn test_rejects_coefficient_length_without_touching_state() {
        let filter = MlsaDigitalFilter::new(3, 4, 0.35).unwrap();
        let mut state = MlsaFilterState::default();
        let error = filter.apply(&[0.0; 3], 1.0, &mut state).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Collaborator);
        assert!(state.basic_filter_1.is_empty());
        assert!(state.basic_filter_2.is_empty());
    }

    #[test]
    fn test_rejects_invalid_construction() {
        assert_eq!(
            MlsaDigitalFilter::new(3, 8, 0.35).unwrap_err(),
            Error::UnsupportedPadeOrder(8)
        );
        assert!(MlsaDigitalFilter::new(3, 4, 1.0).is_err());
    }

    #[test]
    fn test_all_pade_orders_are_close() {
        let coefficients = [0.1, 0.3, -0.2, 0.1];
        let reference_filter = MlsaDigitalFilter::new(3, 7, 0.42).unwrap();
        let reference = impulse_response(&reference_filter, &coefficients, 32);
        for pade_order in 4..7 {
            let filter = MlsaDigitalFilter::new(3, pade_order, 0.42).unwrap();
            let response = impulse_response(&filter, &coefficients, 32);
            for (value, expected) in response.iter().zip(reference.iter()) {
                assert!((value - expected).abs() <= 1e-3);
            }
        }
    }

    #[test]
    fn test_check_state() {
        let filter = MlsaDigitalFilter::new(3, 4, 0.35).unwrap();
        let mut state = MlsaFilterState::default();
        assert!(filter.check_state(&state).is_ok());
        filter.apply(&[0.0, 0.1, 0.2, 0.3], 1.0, &mut state).unwrap();
        assert!(filter.check_state(&state).is_ok());

        // A state sized by a filter with another Pade order.
        let other = MlsaDigitalFilter::new(3, 5, 0.35).unwrap();
        assert_eq!(
            other.check_state(&state),
            Err(Error::MalformedState {
                buffer: "basic_filter_1",
                expected: 6,
                actual: 5
            })
        );
    }
}
