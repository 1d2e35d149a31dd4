/// Mel-warped regressor of the mel-cepstral estimator.
///
/// Runs the previous prediction error through a chain of first order all-pass
/// sections, giving the signals phi_1(n), ..., phi_M(n) in `buffer[1..=M]`.
/// `buffer` has M + 1 elements. Index 0 is the head of the one-pole recursion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MelWarpRegressor {
    alpha: f64,
}

impl MelWarpRegressor {
    pub(crate) fn new(alpha: f64) -> Self {
        MelWarpRegressor { alpha }
    }

    pub(crate) fn update(&self, previous_error: f64, buffer: &mut [f64]) {
        let order = buffer.len() - 1;
        let alpha = self.alpha;
        let beta = 1.0 - alpha * alpha;
        buffer[0] = alpha * buffer[0] + beta * previous_error;
        for i in 1..order {
            buffer[i] += alpha * (buffer[i + 1] - buffer[i - 1]);
        }
        for i in (1..=order).rev() {
            buffer[i] = buffer[i - 1];
        }
    }

    /// The gradient direction, i.e. `buffer[1..]`.
    pub(crate) fn direction(buffer: &[f64]) -> &[f64] {
        &buffer[1..]
    }
}

/// Result of running one sample through a [`CascadeRegressor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CascadeOutput {
    /// Output of the last stage, e_gamma(n).
    pub(crate) prediction_error: f64,
    /// Input of the last stage, now held in its first tap.
    pub(crate) last_stage_input: f64,
    /// Value shifted out of the last tap of the last stage, e_gamma(n - M).
    pub(crate) discarded: f64,
}

/// Cascade of `num_stage` all-zero filters sharing the shape coefficients of
/// the generalized cepstral estimator.
///
/// Each stage has M taps. A stage computes y = sum c(j) d(j) over its taps,
/// shifts its delay line, stores its input in tap 0 and hands
/// input + gamma * y to the next stage. `delay` holds the stages one after
/// the other, M * num_stage values in total.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CascadeRegressor {
    order: usize,
    num_stage: usize,
    gamma: f64,
}

impl CascadeRegressor {
    pub(crate) fn new(order: usize, num_stage: usize, gamma: f64) -> Self {
        CascadeRegressor {
            order,
            num_stage,
            gamma,
        }
    }

    pub(crate) fn delay_len(&self) -> usize {
        self.order * self.num_stage
    }

    pub(crate) fn run(&self, input: f64, shape: &[f64], delay: &mut [f64]) -> CascadeOutput {
        let order = self.order;
        if order == 0 {
            return CascadeOutput {
                prediction_error: input,
                last_stage_input: input,
                discarded: 0.0,
            };
        }

        // Saved before any stage shifts.
        let discarded = delay[delay.len() - 1];

        let mut x = input;
        let mut last_stage_input = input;
        for taps in delay.chunks_exact_mut(order) {
            let mut y = 0.0;
            for j in (1..order).rev() {
                y += shape[j] * taps[j];
                taps[j] = taps[j - 1];
            }
            y += shape[0] * taps[0];
            taps[0] = x;
            last_stage_input = x;
            x += y * self.gamma;
        }

        CascadeOutput {
            prediction_error: x,
            last_stage_input,
            discarded,
        }
    }

    /// Gradient direction at index `m` in 0..M.
    ///
    /// Entries below M - 1 read the last stage's tap at offset m + 1. The last
    /// entry would read past the end of the stage, so it takes the value that
    /// was shifted out of the last tap before this sample, `output.discarded`.
    pub(crate) fn direction(&self, delay: &[f64], output: &CascadeOutput, m: usize) -> f64 {
        if m + 1 == self.order {
            output.discarded
        } else {
            delay[self.order * (self.num_stage - 1) + m + 1]
        }
    }
}
