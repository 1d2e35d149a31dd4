use tracing::warn;

use crate::Error;

/// Adaptation constants shared by both estimators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptationOptions {
    /// Lower bound of the power estimate. Must be greater than 0.
    pub min_epsilon: f64,
    /// Momentum of the gradient accumulator, in [0, 1).
    pub momentum: f64,
    /// Forgetting factor of the power estimate, in [0, 1).
    pub forgetting_factor: f64,
    /// Step size scale, in (0, 1).
    pub step_size_factor: f64,
}

impl Default for AdaptationOptions {
    fn default() -> Self {
        AdaptationOptions {
            min_epsilon: 1e-16,
            momentum: 0.9,
            forgetting_factor: 0.98,
            step_size_factor: 0.1,
        }
    }
}

impl AdaptationOptions {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.min_epsilon > 0.0) {
            return reject("min_epsilon", self.min_epsilon, "(0, inf)");
        }
        check_unit_interval("momentum", self.momentum)?;
        check_unit_interval("forgetting_factor", self.forgetting_factor)?;
        if !(0.0 < self.step_size_factor && self.step_size_factor < 1.0) {
            return reject("step_size_factor", self.step_size_factor, "(0, 1)");
        }
        Ok(())
    }
}

/// Configuration of [`AdaptiveMelCepstralAnalysis`](super::AdaptiveMelCepstralAnalysis).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MelCepstralConfig {
    /// Order of the mel-cepstrum. The coefficient vector has `order + 1` elements.
    pub order: usize,
    /// All-pass constant of the frequency warping, in (-1, 1).
    pub alpha: f64,
    /// Order of the Pade approximation used by the MLSA filter, 4 to 7.
    pub pade_order: usize,
    pub adaptation: AdaptationOptions,
}

impl Default for MelCepstralConfig {
    fn default() -> Self {
        MelCepstralConfig::new(25, 0.35)
    }
}

impl MelCepstralConfig {
    pub fn new(order: usize, alpha: f64) -> Self {
        MelCepstralConfig {
            order,
            alpha,
            pade_order: 4,
            adaptation: AdaptationOptions::default(),
        }
    }

    pub fn with_adaptation(mut self, adaptation: AdaptationOptions) -> Self {
        self.adaptation = adaptation;
        self
    }

    pub fn with_pade_order(mut self, pade_order: usize) -> Self {
        self.pade_order = pade_order;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_alpha(self.alpha)?;
        if !(4..=7).contains(&self.pade_order) {
            warn!(pade_order = self.pade_order, "rejected pade order");
            return Err(Error::UnsupportedPadeOrder(self.pade_order));
        }
        self.adaptation.validate()
    }
}

/// Configuration of
/// [`AdaptiveGeneralizedCepstralAnalysis`](super::AdaptiveGeneralizedCepstralAnalysis).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneralizedCepstralConfig {
    /// Order of the generalized cepstrum.
    pub order: usize,
    /// Number of cascaded all-zero stages. Gamma is `-1 / num_stage`.
    pub num_stage: usize,
    /// Forgetting factor of the gain accumulator. `None` uses
    /// `adaptation.forgetting_factor`.
    pub gain_forgetting_factor: Option<f64>,
    pub adaptation: AdaptationOptions,
}

impl Default for GeneralizedCepstralConfig {
    fn default() -> Self {
        GeneralizedCepstralConfig::new(25, 1)
    }
}

impl GeneralizedCepstralConfig {
    pub fn new(order: usize, num_stage: usize) -> Self {
        GeneralizedCepstralConfig {
            order,
            num_stage,
            gain_forgetting_factor: None,
            adaptation: AdaptationOptions::default(),
        }
    }

    pub fn with_adaptation(mut self, adaptation: AdaptationOptions) -> Self {
        self.adaptation = adaptation;
        self
    }

    pub fn with_gain_forgetting_factor(mut self, gain_forgetting_factor: f64) -> Self {
        self.gain_forgetting_factor = Some(gain_forgetting_factor);
        self
    }

    pub fn gamma(&self) -> f64 {
        -1.0 / (self.num_stage as f64)
    }

    pub fn gain_forgetting_factor(&self) -> f64 {
        self.gain_forgetting_factor.unwrap_or(self.adaptation.forgetting_factor)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.num_stage == 0 {
            return reject("num_stage", 0.0, "[1, inf)");
        }
        if let Some(factor) = self.gain_forgetting_factor {
            check_unit_interval("gain_forgetting_factor", factor)?;
        }
        self.adaptation.validate()
    }
}

pub(crate) fn check_alpha(alpha: f64) -> Result<(), Error> {
    if !(-1.0 < alpha && alpha < 1.0) {
        return reject("alpha", alpha, "(-1, 1)");
    }
    Ok(())
}

pub(crate) fn check_gamma(gamma: f64) -> Result<(), Error> {
    if !(-1.0 <= gamma && gamma <= 1.0) {
        return reject("gamma", gamma, "[-1, 1]");
    }
    Ok(())
}

fn check_unit_interval(parameter: &'static str, value: f64) -> Result<(), Error> {
    if !(0.0 <= value && value < 1.0) {
        return reject(parameter, value, "[0, 1)");
    }
    Ok(())
}

fn reject(parameter: &'static str, value: f64, range: &'static str) -> Result<(), Error> {
    warn!(parameter, value, range, "rejected configuration");
    Err(Error::ParameterOutOfRange {
        parameter,
        value,
        range,
    })
}
