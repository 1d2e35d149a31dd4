use alloc::vec::Vec;

use crate::Error;

/// Resizes `buffer` to `len` and sets every element to zero, whatever it held before.
pub(crate) fn reset_zeroed(buffer: &mut Vec<f64>, len: usize) {
    buffer.clear();
    buffer.resize(len, 0.0);
}

/// Checks the length of a buffer of an already initialized state.
pub(crate) fn check_length(
    buffer: &'static str,
    values: &[f64],
    expected: usize,
) -> Result<(), Error> {
    if values.len() != expected {
        return Err(Error::MalformedState {
            buffer,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_reset_zeroed_overwrites_contents() {
        let mut buffer = vec![1.0, 2.0, 3.0];
        reset_zeroed(&mut buffer, 2);
        assert_eq!(buffer, vec![0.0, 0.0]);
        let mut buffer = vec![4.0];
        reset_zeroed(&mut buffer, 3);
        assert_eq!(buffer, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_check_length() {
        assert!(check_length("gradient", &[0.0; 3], 3).is_ok());
        assert_eq!(
            check_length("gradient", &[0.0; 2], 3),
            Err(Error::MalformedState {
                buffer: "gradient",
                expected: 3,
                actual: 2
            })
        );
    }
}
