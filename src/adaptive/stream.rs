use alloc::vec::Vec;
use tracing::{debug, error, warn};

use super::AdaptiveAnalysis;
use crate::Error;

/// Runs one input stream through an [`AdaptiveAnalysis`] and emits a
/// cepstrum frame every `output_period` samples.
///
/// Frames are the estimate after the last sample of each period, or with
/// averaging enabled the mean of the estimates over the period. Periods
/// continue across calls to [`AnalysisStream::process`].
#[derive(Debug)]
pub struct AnalysisStream<A: AdaptiveAnalysis> {
    analysis: A,
    state: A::State,
    output_period: usize,
    averaging: bool,
    cepstrum: Vec<f64>,
    frame: Vec<f64>,
    period_position: usize,
    sample_counter: usize,
    aborted: bool,
}

impl<A: AdaptiveAnalysis> AnalysisStream<A> {
    pub fn new(analysis: A, output_period: usize) -> Result<Self, Error> {
        if output_period == 0 {
            warn!(output_period, "rejected configuration");
            return Err(Error::ParameterOutOfRange {
                parameter: "output_period",
                value: 0.0,
                range: "[1, inf)",
            });
        }
        let order = analysis.num_order();
        debug!(order, output_period, "created analysis stream");
        Ok(AnalysisStream {
            analysis,
            state: A::State::default(),
            output_period,
            averaging: false,
            cepstrum: Vec::with_capacity(order + 1),
            frame: Vec::with_capacity(order + 1),
            period_position: 0,
            sample_counter: 0,
            aborted: false,
        })
    }

    /// Emit the mean over each period instead of its last estimate.
    pub fn with_averaging(mut self, averaging: bool) -> Self {
        self.averaging = averaging;
        self
    }

    pub fn analysis(&self) -> &A {
        &self.analysis
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn output_period(&self) -> usize {
        self.output_period
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// The number of samples consumed so far.
    pub fn sample_count(&self) -> usize {
        self.sample_counter
    }

    /// Analyzes `samples`, writing one prediction error per sample to
    /// `prediction_errors`. `handler` receives the index of the sample that
    /// completed a period along with the frame.
    ///
    /// A failing sample aborts the stream and every later call returns
    /// [`Error::StreamAborted`]. Analysis continues with a new stream.
    pub fn process<F>(
        &mut self,
        samples: &[f64],
        prediction_errors: &mut [f64],
        mut handler: F,
    ) -> Result<(), Error>
    where
        F: FnMut(usize, &[f64]),
    {
        if self.aborted {
            return Err(Error::StreamAborted);
        }
        if prediction_errors.len() != samples.len() {
            return Err(Error::OutputLength {
                expected: samples.len(),
                actual: prediction_errors.len(),
            });
        }

        for (x, e) in samples.iter().zip(prediction_errors.iter_mut()) {
            *e = match self.analysis.run(*x, &mut self.state, &mut self.cepstrum) {
                Ok(error) => error,
                Err(cause) => {
                    let sample_index = self.sample_counter;
                    error!(sample_index, %cause, "aborting analysis stream");
                    self.aborted = true;
                    return Err(cause);
                }
            };
            let sample_index = self.sample_counter;
            self.sample_counter += 1;
            self.period_position += 1;

            if self.averaging {
                if self.period_position == 1 {
                    self.frame.clear();
                    self.frame.resize(self.cepstrum.len(), 0.0);
                }
                for (sum, c) in self.frame.iter_mut().zip(self.cepstrum.iter()) {
                    *sum += c;
                }
            }

            if self.period_position == self.output_period {
                self.period_position = 0;
                if self.averaging {
                    let count = self.output_period as f64;
                    for sum in self.frame.iter_mut() {
                        *sum /= count;
                    }
                    handler(sample_index, &self.frame);
                } else {
                    handler(sample_index, &self.cepstrum);
                }
            }
        }
        Ok(())
    }
}
