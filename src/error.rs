use thiserror::Error;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid constructor arguments. Detected once, at construction.
    Configuration,
    /// A malformed state container or output buffer passed to a call.
    Argument,
    /// A filter or converter rejected its input.
    Collaborator,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("{parameter} = {value} is outside {range}")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        range: &'static str,
    },
    #[error("Pade approximation order {0} is not supported, expected 4 to 7")]
    UnsupportedPadeOrder(usize),
    #[error("{component} has order {actual}, expected {expected}")]
    OrderMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("state buffer `{buffer}` has length {actual}, expected {expected}")]
    MalformedState {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("output buffer has length {actual}, expected {expected}")]
    OutputLength { expected: usize, actual: usize },
    #[error("unsupported FFT size {0}")]
    UnsupportedFftSize(usize),
    #[error("stream was aborted by an earlier failure")]
    StreamAborted,
    #[error("{component} got {actual} coefficients, expected {expected}")]
    CoefficientLength {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ParameterOutOfRange { .. }
            | Error::UnsupportedPadeOrder(_)
            | Error::OrderMismatch { .. } => ErrorKind::Configuration,
            Error::MalformedState { .. }
            | Error::OutputLength { .. }
            | Error::UnsupportedFftSize(_)
            | Error::StreamAborted => ErrorKind::Argument,
            Error::CoefficientLength { .. } => ErrorKind::Collaborator,
        }
    }
}

/// Checks that a coefficient vector has `order + 1` elements.
pub(crate) fn check_coefficient_length(
    component: &'static str,
    coefficients: &[f64],
    order: usize,
) -> Result<(), Error> {
    if coefficients.len() != order + 1 {
        return Err(Error::CoefficientLength {
            component,
            expected: order + 1,
            actual: coefficients.len(),
        });
    }
    Ok(())
}
