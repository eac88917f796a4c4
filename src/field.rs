use crate::algorithms::{Error, InvalidInput};

/// Predicted mean and variance of the sampled field, one entry per grid cell.
///
/// Produced by an external estimator; the partitioner only reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldEstimate {
    mean: Vec<f64>,
    variance: Vec<f64>,
}

impl FieldEstimate {
    pub fn new(mean: Vec<f64>, variance: Vec<f64>) -> Result<Self, Error> {
        if mean.len() != variance.len() {
            return Err(InvalidInput::InputLenMismatch {
                expected: mean.len(),
                actual: variance.len(),
            }
            .into());
        }
        let bad_cell = mean
            .iter()
            .zip(&variance)
            .position(|(m, v)| !m.is_finite() || !v.is_finite() || *v < 0.0);
        if let Some(cell) = bad_cell {
            return Err(InvalidInput::InvalidField(cell).into());
        }
        Ok(Self { mean, variance })
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn variance(&self) -> &[f64] {
        &self.variance
    }

    /// Variance scaled into `[0, 1]` by the largest variance of the field.
    pub fn normalized_variance(&self) -> Vec<f64> {
        let max = self.variance.iter().cloned().fold(0.0f64, f64::max);
        if max == 0.0 {
            return vec![0.0; self.variance.len()];
        }
        self.variance.iter().map(|v| v / max).collect()
    }

    /// Mean min-max scaled into `[0, 1]`, the input of heat-map colouring.
    pub fn normalized_mean(&self) -> Vec<f64> {
        let min = self.mean.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.mean.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range <= 0.0 {
            return vec![0.0; self.mean.len()];
        }
        self.mean.iter().map(|m| (m - min) / range).collect()
    }
}
