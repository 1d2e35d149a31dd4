use alloc::vec::Vec;
use core::mem;
use tracing::{debug, trace};

use super::buffer::{check_length, reset_zeroed};
use super::config::GeneralizedCepstralConfig;
use super::gradient::GradientUpdater;
use super::power::PowerTracker;
use super::regressor::CascadeRegressor;
use super::AdaptiveAnalysis;
use crate::conversion::{CoefficientConverter, InverseGainNormalization};
use crate::Error;

/// Adaptive generalized cepstral analysis with gamma = -1 / num_stage.
///
/// The inverse filter is a cascade of `num_stage` all-zero filters sharing the
/// gain normalized coefficients c'(1), ..., c'(M). The gain K = c'(0) is the
/// square root of a smoothed squared prediction error. The output is the
/// generalized cepstrum obtained by undoing the gain normalization.
#[derive(Debug)]
pub struct AdaptiveGeneralizedCepstralAnalysis<C = InverseGainNormalization> {
    config: GeneralizedCepstralConfig,
    converter: C,
    cascade: CascadeRegressor,
    power: PowerTracker,
    gain_power: PowerTracker,
    gradient: GradientUpdater,
}

/// Everything [`AdaptiveGeneralizedCepstralAnalysis`] remembers between samples.
///
/// Equality ignores the scratch buffers a sample is computed in.
#[derive(Debug, Clone)]
pub struct GeneralizedCepstralState {
    pub(crate) initialized: bool,
    /// Gain normalized generalized cepstrum, index 0 is the gain.
    pub(crate) normalized_cepstrum: Vec<f64>,
    /// Delay lines of all cascade stages.
    pub(crate) delay: Vec<f64>,
    pub(crate) gradient: Vec<f64>,
    pub(crate) prev_epsilon: f64,
    pub(crate) prev_adjusted_error: f64,
    pub(crate) scratch: GeneralizedScratch,
}

/// Working copies for the sample in progress, committed by swapping once the
/// converter has accepted the new cepstrum.
#[derive(Debug, Clone, Default)]
pub(crate) struct GeneralizedScratch {
    pub(crate) normalized_cepstrum: Vec<f64>,
    pub(crate) delay: Vec<f64>,
    pub(crate) gradient: Vec<f64>,
}

impl Default for GeneralizedCepstralState {
    fn default() -> Self {
        GeneralizedCepstralState {
            initialized: false,
            normalized_cepstrum: Vec::new(),
            delay: Vec::new(),
            gradient: Vec::new(),
            prev_epsilon: 1.0,
            prev_adjusted_error: 0.0,
            scratch: GeneralizedScratch::default(),
        }
    }
}

impl PartialEq for GeneralizedCepstralState {
    fn eq(&self, other: &Self) -> bool {
        self.initialized == other.initialized
            && self.normalized_cepstrum == other.normalized_cepstrum
            && self.delay == other.delay
            && self.gradient == other.gradient
            && self.prev_epsilon == other.prev_epsilon
            && self.prev_adjusted_error == other.prev_adjusted_error
    }
}

impl GeneralizedCepstralState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn normalized_cepstrum(&self) -> &[f64] {
        &self.normalized_cepstrum
    }

    pub fn delay(&self) -> &[f64] {
        &self.delay
    }

    pub fn gradient(&self) -> &[f64] {
        &self.gradient
    }

    pub fn epsilon(&self) -> f64 {
        self.prev_epsilon
    }

    /// The smoothed squared prediction error the gain is derived from.
    pub fn adjusted_error(&self) -> f64 {
        self.prev_adjusted_error
    }
}

impl AdaptiveGeneralizedCepstralAnalysis {
    pub fn new(config: GeneralizedCepstralConfig) -> Result<Self, Error> {
        config.validate()?;
        let converter = InverseGainNormalization::new(config.order, config.gamma())?;
        AdaptiveGeneralizedCepstralAnalysis::from_parts(config, converter)
    }
}

impl<C: CoefficientConverter> AdaptiveGeneralizedCepstralAnalysis<C> {
    pub fn from_parts(config: GeneralizedCepstralConfig, converter: C) -> Result<Self, Error> {
        config.validate()?;
        if converter.num_order() != config.order {
            return Err(Error::OrderMismatch {
                component: "converter",
                expected: config.order,
                actual: converter.num_order(),
            });
        }

        let adaptation = config.adaptation;
        let gain_forgetting_factor = config.gain_forgetting_factor();
        debug!(
            order = config.order,
            num_stage = config.num_stage,
            min_epsilon = adaptation.min_epsilon,
            momentum = adaptation.momentum,
            forgetting_factor = adaptation.forgetting_factor,
            gain_forgetting_factor,
            step_size_factor = adaptation.step_size_factor,
            "created adaptive generalized cepstral analysis"
        );
        Ok(AdaptiveGeneralizedCepstralAnalysis {
            config,
            converter,
            cascade: CascadeRegressor::new(config.order, config.num_stage, config.gamma()),
            power: PowerTracker::new(adaptation.forgetting_factor, adaptation.min_epsilon),
            gain_power: PowerTracker::new(gain_forgetting_factor, adaptation.min_epsilon),
            gradient: GradientUpdater::new(adaptation.momentum, adaptation.step_size_factor),
        })
    }

    pub fn config(&self) -> &GeneralizedCepstralConfig {
        &self.config
    }

    pub fn gamma(&self) -> f64 {
        self.config.gamma()
    }

    fn prepare(&self, state: &mut GeneralizedCepstralState) -> Result<(), Error> {
        let order = self.config.order;
        let delay_len = self.cascade.delay_len();
        if !state.initialized {
            reset_zeroed(&mut state.normalized_cepstrum, order + 1);
            reset_zeroed(&mut state.delay, delay_len);
            reset_zeroed(&mut state.gradient, order);
            state.prev_epsilon = 1.0;
            state.prev_adjusted_error = 0.0;
            state.initialized = true;
            trace!(order, delay_len, "initialized generalized cepstral analysis state");
            return Ok(());
        }
        check_length("normalized_cepstrum", &state.normalized_cepstrum, order + 1)?;
        check_length("delay", &state.delay, delay_len)?;
        check_length("gradient", &state.gradient, order)
    }
}

impl<C: CoefficientConverter> AdaptiveAnalysis for AdaptiveGeneralizedCepstralAnalysis<C> {
    type State = GeneralizedCepstralState;

    fn num_order(&self) -> usize {
        self.config.order
    }

    fn run(
        &self,
        input: f64,
        state: &mut GeneralizedCepstralState,
        generalized_cepstrum: &mut Vec<f64>,
    ) -> Result<f64, Error> {
        self.prepare(state)?;
        let order = self.config.order;
        let scratch = &mut state.scratch;

        scratch.delay.clone_from(&state.delay);
        let output = self
            .cascade
            .run(input, &state.normalized_cepstrum[1..], &mut scratch.delay);
        let error = output.prediction_error;

        let epsilon = self.power.update(state.prev_epsilon, output.last_stage_input);

        scratch.normalized_cepstrum.clone_from(&state.normalized_cepstrum);
        scratch.gradient.clone_from(&state.gradient);
        if order > 0 {
            let cascade = &self.cascade;
            let delay = &scratch.delay;
            self.gradient.step(
                error,
                epsilon,
                &mut scratch.gradient,
                &mut scratch.normalized_cepstrum[1..],
                |m| cascade.direction(delay, &output, m),
            );
        }

        let adjusted_error = self.gain_power.update(state.prev_adjusted_error, error);
        scratch.normalized_cepstrum[0] = libm::sqrt(adjusted_error);

        self.converter
            .convert(&scratch.normalized_cepstrum, generalized_cepstrum)?;

        mem::swap(&mut state.normalized_cepstrum, &mut scratch.normalized_cepstrum);
        mem::swap(&mut state.delay, &mut scratch.delay);
        mem::swap(&mut state.gradient, &mut scratch.gradient);
        state.prev_adjusted_error = adjusted_error;
        state.prev_epsilon = epsilon;
        Ok(error)
    }
}
