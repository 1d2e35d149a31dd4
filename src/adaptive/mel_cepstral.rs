use alloc::vec::Vec;
use core::mem;
use tracing::{debug, trace};

use super::buffer::{check_length, reset_zeroed};
use super::config::MelCepstralConfig;
use super::gradient::GradientUpdater;
use super::power::PowerTracker;
use super::regressor::MelWarpRegressor;
use super::AdaptiveAnalysis;
use crate::conversion::{CoefficientConverter, MlsaToMelCepstrum};
use crate::filter::{FilterPrimitive, MlsaDigitalFilter, MlsaFilterState};
use crate::Error;

/// Adaptive mel-cepstral analysis.
///
/// Each call filters one sample through the inverse MLSA filter given by the
/// current coefficients, giving the prediction error e(n), and moves the
/// coefficients along the gradient of e(n)^2. The coefficients are kept in
/// MLSA filter form b(m) and converted to the mel-cepstrum on output.
#[derive(Debug)]
pub struct AdaptiveMelCepstralAnalysis<F = MlsaDigitalFilter, C = MlsaToMelCepstrum> {
    config: MelCepstralConfig,
    filter: F,
    converter: C,
    regressor: MelWarpRegressor,
    power: PowerTracker,
    gradient: GradientUpdater,
}

/// Everything [`AdaptiveMelCepstralAnalysis`] remembers between samples.
///
/// Buffers are sized and zeroed on first use, whatever they contained before.
/// One state belongs to one input stream. Equality ignores the scratch
/// buffers a sample is computed in.
#[derive(Debug, Clone)]
pub struct MelCepstralState<S = MlsaFilterState> {
    pub(crate) initialized: bool,
    /// MLSA filter coefficients, b(0) is the gain term.
    pub(crate) coefficients: Vec<f64>,
    pub(crate) regressor: Vec<f64>,
    pub(crate) gradient: Vec<f64>,
    pub(crate) filter_state: S,
    pub(crate) prev_prediction_error: f64,
    pub(crate) prev_epsilon: f64,
    pub(crate) scratch: MelScratch<S>,
}

/// Working copies for the sample in progress. They are swapped into the
/// state once every collaborator has accepted its input.
#[derive(Debug, Clone, Default)]
pub(crate) struct MelScratch<S> {
    pub(crate) inverse_coefficients: Vec<f64>,
    pub(crate) coefficients: Vec<f64>,
    pub(crate) regressor: Vec<f64>,
    pub(crate) gradient: Vec<f64>,
    pub(crate) filter_state: S,
}

impl<S: Default> Default for MelCepstralState<S> {
    fn default() -> Self {
        MelCepstralState {
            initialized: false,
            coefficients: Vec::new(),
            regressor: Vec::new(),
            gradient: Vec::new(),
            filter_state: S::default(),
            prev_prediction_error: 0.0,
            prev_epsilon: 1.0,
            scratch: MelScratch::default(),
        }
    }
}

impl<S: PartialEq> PartialEq for MelCepstralState<S> {
    fn eq(&self, other: &Self) -> bool {
        self.initialized == other.initialized
            && self.coefficients == other.coefficients
            && self.regressor == other.regressor
            && self.gradient == other.gradient
            && self.filter_state == other.filter_state
            && self.prev_prediction_error == other.prev_prediction_error
            && self.prev_epsilon == other.prev_epsilon
    }
}

impl<S: Default> MelCepstralState<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// MLSA filter coefficients b(0), ..., b(M).
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn gradient(&self) -> &[f64] {
        &self.gradient
    }

    pub fn regressor(&self) -> &[f64] {
        &self.regressor
    }

    pub fn filter_state(&self) -> &S {
        &self.filter_state
    }

    /// The most recent power estimate.
    pub fn epsilon(&self) -> f64 {
        self.prev_epsilon
    }

    /// The most recent prediction error.
    pub fn prediction_error(&self) -> f64 {
        self.prev_prediction_error
    }
}

impl AdaptiveMelCepstralAnalysis {
    pub fn new(config: MelCepstralConfig) -> Result<Self, Error> {
        config.validate()?;
        let filter = MlsaDigitalFilter::new(config.order, config.pade_order, config.alpha)?;
        let converter = MlsaToMelCepstrum::new(config.order, config.alpha)?;
        AdaptiveMelCepstralAnalysis::from_parts(config, filter, converter)
    }
}

impl<F: FilterPrimitive, C: CoefficientConverter> AdaptiveMelCepstralAnalysis<F, C> {
    pub fn from_parts(config: MelCepstralConfig, filter: F, converter: C) -> Result<Self, Error> {
        config.validate()?;
        if filter.num_order() != config.order {
            return Err(Error::OrderMismatch {
                component: "filter",
                expected: config.order,
                actual: filter.num_order(),
            });
        }
        if converter.num_order() != config.order {
            return Err(Error::OrderMismatch {
                component: "converter",
                expected: config.order,
                actual: converter.num_order(),
            });
        }

        let adaptation = config.adaptation;
        debug!(
            order = config.order,
            alpha = config.alpha,
            pade_order = config.pade_order,
            min_epsilon = adaptation.min_epsilon,
            momentum = adaptation.momentum,
            forgetting_factor = adaptation.forgetting_factor,
            step_size_factor = adaptation.step_size_factor,
            "created adaptive mel-cepstral analysis"
        );
        Ok(AdaptiveMelCepstralAnalysis {
            config,
            filter,
            converter,
            regressor: MelWarpRegressor::new(config.alpha),
            power: PowerTracker::new(adaptation.forgetting_factor, adaptation.min_epsilon),
            gradient: GradientUpdater::new(adaptation.momentum, adaptation.step_size_factor),
        })
    }

    pub fn config(&self) -> &MelCepstralConfig {
        &self.config
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    fn prepare(&self, state: &mut MelCepstralState<F::State>) -> Result<(), Error> {
        let order = self.config.order;
        if !state.initialized {
            reset_zeroed(&mut state.coefficients, order + 1);
            reset_zeroed(&mut state.regressor, order + 1);
            reset_zeroed(&mut state.gradient, order);
            state.filter_state = F::State::default();
            state.prev_prediction_error = 0.0;
            state.prev_epsilon = 1.0;
            state.initialized = true;
            trace!(order, "initialized mel-cepstral analysis state");
            return Ok(());
        }
        check_length("coefficients", &state.coefficients, order + 1)?;
        check_length("regressor", &state.regressor, order + 1)?;
        check_length("gradient", &state.gradient, order)?;
        self.filter.check_state(&state.filter_state)
    }
}

impl<F: FilterPrimitive, C: CoefficientConverter> AdaptiveAnalysis
    for AdaptiveMelCepstralAnalysis<F, C>
{
    type State = MelCepstralState<F::State>;

    fn num_order(&self) -> usize {
        self.config.order
    }

    fn run(
        &self,
        input: f64,
        state: &mut Self::State,
        mel_cepstrum: &mut Vec<f64>,
    ) -> Result<f64, Error> {
        self.prepare(state)?;
        let order = self.config.order;
        let scratch = &mut state.scratch;

        // Inverse filter. Its gain term stays at zero.
        scratch.inverse_coefficients.clear();
        scratch.inverse_coefficients.push(0.0);
        scratch
            .inverse_coefficients
            .extend(state.coefficients[1..].iter().map(|b| -b));
        scratch.filter_state.clone_from(&state.filter_state);
        let error = self.filter.apply(
            &scratch.inverse_coefficients,
            input,
            &mut scratch.filter_state,
        )?;

        // The regressor is driven by the error of the previous sample.
        scratch.regressor.clone_from(&state.regressor);
        if order > 0 {
            self.regressor
                .update(state.prev_prediction_error, &mut scratch.regressor);
        }

        let epsilon = self.power.update(state.prev_epsilon, error);

        scratch.coefficients.clone_from(&state.coefficients);
        scratch.gradient.clone_from(&state.gradient);
        if order > 0 {
            let direction = MelWarpRegressor::direction(&scratch.regressor);
            self.gradient.step(
                error,
                epsilon,
                &mut scratch.gradient,
                &mut scratch.coefficients[1..],
                |m| direction[m],
            );
        }
        scratch.coefficients[0] = 0.5 * libm::log(epsilon);

        self.converter.convert(&scratch.coefficients, mel_cepstrum)?;

        mem::swap(&mut state.coefficients, &mut scratch.coefficients);
        mem::swap(&mut state.regressor, &mut scratch.regressor);
        mem::swap(&mut state.gradient, &mut scratch.gradient);
        mem::swap(&mut state.filter_state, &mut scratch.filter_state);
        state.prev_prediction_error = error;
        state.prev_epsilon = epsilon;
        Ok(error)
    }
}
