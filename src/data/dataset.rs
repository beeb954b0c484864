use crate::error::{Result, SymregError};

/// Paired `(x, y)` samples to fit against.
///
/// Construction rejects empty input, mismatched lengths and non-finite values,
/// so evaluation code can divide by `len()` and trust every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Dataset {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.is_empty() {
            return Err(SymregError::Dataset(
                "Dataset must contain at least one sample".to_string(),
            ));
        }
        if xs.len() != ys.len() {
            return Err(SymregError::Dataset(format!(
                "x and y lengths differ: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if let Some(i) = xs.iter().zip(&ys).position(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(SymregError::Dataset(format!("Sample {} is not finite", i)));
        }
        Ok(Self { xs, ys })
    }

    pub fn from_slices(xs: &[f64], ys: &[f64]) -> Result<Self> {
        Self::new(xs.to_vec(), ys.to_vec())
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn x_range(&self) -> (f64, f64) {
        min_max(&self.xs)
    }

    pub fn y_range(&self) -> (f64, f64) {
        min_max(&self.ys)
    }

    /// Population variance of y.
    pub fn y_variance(&self) -> f64 {
        let n = self.ys.len() as f64;
        let mean = self.ys.iter().sum::<f64>() / n;
        self.ys.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / n
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_input() {
        assert!(matches!(Dataset::new(vec![], vec![]), Err(SymregError::Dataset(_))));
        assert!(matches!(
            Dataset::new(vec![1.0, 2.0], vec![1.0]),
            Err(SymregError::Dataset(_))
        ));
        assert!(Dataset::new(vec![1.0, f64::NAN], vec![1.0, 2.0]).is_err());
        assert!(Dataset::new(vec![1.0], vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_statistics() {
        let data = Dataset::from_slices(&[-3.0, 0.0, 6.0], &[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.x_range(), (-3.0, 6.0));
        assert_eq!(data.y_range(), (2.0, 6.0));
        assert!((data.y_variance() - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(data.pairs().collect::<Vec<_>>()[1], (0.0, 4.0));
    }
}
