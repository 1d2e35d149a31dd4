/// Momentum-based stochastic gradient step over the shape coefficients.
///
/// For m = 0, ..., M - 1
///
/// ```text
/// g(m) <- momentum * g(m) - 2 * (1 - momentum) * e(n) * phi(m)
/// b(m) <- b(m) - step_size_factor / (M * epsilon(n)) * g(m)
/// ```
///
/// where phi is the regressor and epsilon the floored power estimate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GradientUpdater {
    momentum: f64,
    step_size_factor: f64,
}

impl GradientUpdater {
    pub(crate) fn new(momentum: f64, step_size_factor: f64) -> Self {
        GradientUpdater {
            momentum,
            step_size_factor,
        }
    }

    /// Performs one step. `gradient` and `coefficients` must have the same
    /// non-zero length M and `regressor` is queried for each m in 0..M in order.
    pub(crate) fn step<R>(
        &self,
        error: f64,
        epsilon: f64,
        gradient: &mut [f64],
        coefficients: &mut [f64],
        regressor: R,
    ) where
        R: Fn(usize) -> f64,
    {
        debug_assert_eq!(gradient.len(), coefficients.len());
        let order = coefficients.len();
        let sigma = 2.0 * (1.0 - self.momentum) * error;
        let mu = self.step_size_factor / ((order as f64) * epsilon);
        for (m, (g, b)) in gradient.iter_mut().zip(coefficients.iter_mut()).enumerate() {
            *g = self.momentum * *g - sigma * regressor(m);
            *b -= mu * *g;
        }
    }
}
