//! Recursive digital filters driven by a coefficient vector.
//!
//! The adaptive estimators only need one capability from a filter: apply it to
//! a single input sample given the current coefficients and a delay-line state
//! that the caller owns. That capability is the [`FilterPrimitive`] trait.
//! [`MlsaDigitalFilter`] is the implementation used by the mel-cepstral estimator.

mod mlsa;

pub use mlsa::{MlsaDigitalFilter, MlsaFilterState};

use crate::Error;

pub trait FilterPrimitive {
    /// Delay-line state persisting across calls. `Default` must give an
    /// empty state that is lazily sized on first use.
    type State: Default + Clone;

    /// Filter order. `apply` expects `num_order() + 1` coefficients.
    fn num_order(&self) -> usize;

    /// Checks that `state` is either empty or shaped for this filter.
    fn check_state(&self, state: &Self::State) -> Result<(), Error>;

    /// Filters one input sample and returns the output sample.
    fn apply(
        &self,
        coefficients: &[f64],
        input: f64,
        state: &mut Self::State,
    ) -> Result<f64, Error>;
}
