//! Standard scaling of numeric columns.

use crate::types::Scaling;
use crate::utils::sample_variance;

/// Added to the variance before taking the square root so a constant
/// column scales to zeros instead of dividing by zero.
pub const STANDARDIZATION_EPSILON: f64 = 1e-9;

/// Zero-mean, unit-variance scaler fitted on one fully-populated column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler {
    mean: f64,
    std_dev: f64,
}

impl StandardScaler {
    /// Fit on the given values. An empty slice fits to mean 0.
    pub fn fit(data: &[f64]) -> Self {
        let mean = if data.is_empty() {
            0.0
        } else {
            data.iter().sum::<f64>() / data.len() as f64
        };
        let variance = sample_variance(data, mean);
        let std_dev = (variance + STANDARDIZATION_EPSILON).sqrt();

        StandardScaler { mean, std_dev }
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }

    pub fn transform_in_place(&self, data: &mut [f64]) {
        for value in data.iter_mut() {
            *value = self.transform(*value);
        }
    }

    pub fn scaling(&self) -> Scaling {
        Scaling {
            mean: self.mean,
            std: self.std_dev,
        }
    }
}
