//! Sample-synchronous adaptive cepstral analysis, following "An adaptive
//! algorithm for mel-cepstral analysis of speech" by Fukada, Tokuda,
//! Kobayashi and Imai (ICASSP 1992) and its generalized cepstral counterpart.
//!
//! Features
//! * Adaptive mel-cepstral analysis using an inverse MLSA filter.
//! * Adaptive generalized cepstral analysis with gamma = -1 / C.
//! * The estimators hold no per-stream data. All state lives in a state value
//!   owned by the caller, so one estimator can drive many independent streams.
//! * `no_std` compatible. Memory is only allocated when a state is first used.
//!
//! # Examples
//!
//! Estimating the spectral envelope of a low-pass signal, emitting one frame
//! every 100 samples.
//!
//! ```
//! use rand::{rngs::StdRng, Rng, SeedableRng};
//! use microcep::adaptive::{
//!     AdaptiveGeneralizedCepstralAnalysis, AnalysisStream, GeneralizedCepstralConfig,
//! };
//! use microcep::common::log_amplitude_spectrum;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut previous = 0.0;
//! let signal: Vec<f64> = (0..4000)
//!     .map(|_| {
//!         previous = 0.9 * previous + rng.gen_range(-1.0..=1.0);
//!         previous
//!     })
//!     .collect();
//!
//! let config = GeneralizedCepstralConfig::new(10, 2);
//! let gamma = config.gamma();
//! let analysis = AdaptiveGeneralizedCepstralAnalysis::new(config).unwrap();
//! let mut stream = AnalysisStream::new(analysis, 100).unwrap();
//!
//! let mut prediction_errors = vec![0.0; signal.len()];
//! let mut last_frame = vec![];
//! stream
//!     .process(&signal, &mut prediction_errors, |_sample_index, frame| {
//!         last_frame = frame.to_vec();
//!     })
//!     .unwrap();
//!
//! let mut fft_buffer = [0.0; 64];
//! let mut envelope = [0.0; 33];
//! log_amplitude_spectrum(&last_frame, gamma, &mut fft_buffer, &mut envelope).unwrap();
//! assert!(envelope[0] - envelope[32] > 1.0);
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod adaptive;
pub mod common;
pub mod conversion;
mod error;
pub mod filter;

pub use adaptive::{
    AdaptationOptions, AdaptiveAnalysis, AdaptiveGeneralizedCepstralAnalysis,
    AdaptiveMelCepstralAnalysis, AnalysisStream, GeneralizedCepstralConfig,
    GeneralizedCepstralState, MelCepstralConfig, MelCepstralState,
};
pub use conversion::CoefficientConverter;
pub use error::{Error, ErrorKind};
pub use filter::FilterPrimitive;
