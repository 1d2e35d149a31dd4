/// Exponentially weighted estimate of a squared signal, floored at a minimum value.
///
/// ```text
/// p(n) = max(lambda * p(n - 1) + (1 - lambda) * e(n)^2, floor)
/// ```
///
/// The tracker holds only the constants. The running value belongs to the
/// caller's state and is passed in on every update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PowerTracker {
    forgetting_factor: f64,
    floor: f64,
}

impl PowerTracker {
    pub(crate) fn new(forgetting_factor: f64, floor: f64) -> Self {
        PowerTracker {
            forgetting_factor,
            floor,
        }
    }

    /// Returns the updated estimate given the previous one and the current error.
    pub(crate) fn update(&self, previous: f64, error: f64) -> f64 {
        let power = self.forgetting_factor * previous
            + (1.0 - self.forgetting_factor) * (error * error);
        if power < self.floor {
            self.floor
        } else {
            power
        }
    }
}
