//! Sample-by-sample adaptive cepstral analysis.
//!
//! Two estimators are provided:
//! * [`AdaptiveMelCepstralAnalysis`] estimates the mel-cepstrum of order M by
//!   driving an inverse MLSA filter with a momentum stochastic gradient.
//! * [`AdaptiveGeneralizedCepstralAnalysis`] estimates the generalized cepstrum
//!   with gamma = -1 / C using a cascade of C all-zero filters.
//!
//! Both consume one input sample per call and return the prediction error. All
//! state lives in a separate state value owned by the caller, so one estimator
//! can serve any number of independent streams.
//!
//! # Examples
//!
//! Whitening a first order autoregressive signal. Once the estimator has
//! converged, the prediction error has much less power than the input.
//!
//! ```
//! use rand::{rngs::StdRng, Rng, SeedableRng};
//! use microcep::adaptive::{
//!     AdaptiveAnalysis, AdaptiveMelCepstralAnalysis, MelCepstralConfig, MelCepstralState,
//! };
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut previous = 0.0;
//! let signal: Vec<f64> = (0..4000)
//!     .map(|_| {
//!         previous = 0.9 * previous + rng.gen_range(-1.0..=1.0);
//!         previous
//!     })
//!     .collect();
//!
//! let analysis = AdaptiveMelCepstralAnalysis::new(MelCepstralConfig::new(10, 0.35)).unwrap();
//! let mut state = MelCepstralState::new();
//! let mut mel_cepstrum = vec![];
//!
//! let mut signal_power = 0.0;
//! let mut error_power = 0.0;
//! for (n, x) in signal.iter().enumerate() {
//!     let error = analysis.run(*x, &mut state, &mut mel_cepstrum).unwrap();
//!     if n >= 2000 {
//!         signal_power += x * x;
//!         error_power += error * error;
//!     }
//! }
//! assert_eq!(mel_cepstrum.len(), 11);
//! assert!(error_power < 0.5 * signal_power);
//! ```
//!
//! The regressors, power trackers and gradient updaters the estimators are
//! built from are internal.
//!
//! ```compile_fail
//! let regressor = microcep::adaptive::CascadeRegressor::new(4, 2, -0.5);
//! ```

pub(crate) mod buffer;
pub(crate) mod config;
mod generalized_cepstral;
mod gradient;
mod mel_cepstral;
mod power;
mod regressor;
mod stream;

pub use config::{AdaptationOptions, GeneralizedCepstralConfig, MelCepstralConfig};
pub use generalized_cepstral::{AdaptiveGeneralizedCepstralAnalysis, GeneralizedCepstralState};
pub use mel_cepstral::{AdaptiveMelCepstralAnalysis, MelCepstralState};
pub use stream::AnalysisStream;

use crate::Error;
use alloc::vec::Vec;

/// A per-sample cepstral estimator.
pub trait AdaptiveAnalysis {
    /// Per-stream state. [`Default`] gives an uninitialized state that is
    /// sized and zeroed on first use.
    type State: Default;

    /// The analysis order M. Outputs have M + 1 coefficients.
    fn num_order(&self) -> usize;

    /// Consumes one input sample, updates `state` and writes the current
    /// cepstrum estimate to `cepstrum`. Returns the prediction error.
    ///
    /// On error `state` is left as it was, whether the state was malformed or
    /// a filter or converter rejected its input.
    fn run(
        &self,
        input: f64,
        state: &mut Self::State,
        cepstrum: &mut Vec<f64>,
    ) -> Result<f64, Error>;
}
