// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::error::{AnalysisError, Result};

/// Weighted presence of each canonical input source, `None` where unknown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterVector {
    values: Vec<Option<f64>>,
}

impl ClusterVector {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn dense(values: impl IntoIterator<Item = f64>) -> Self {
        Self { values: values.into_iter().map(Some).collect() }
    }

    pub fn zeros(len: usize) -> Self {
        Self { values: vec![Some(0.0); len] }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Option::is_none)
    }

    fn check_len(&self, other: &ClusterVector) -> Result<()> {
        if self.len() != other.len() {
            return Err(AnalysisError::LengthMismatch { expected: self.len(), actual: other.len() });
        }
        Ok(())
    }

    /// Dot product; missing entries count as zero.
    pub fn dot(&self, other: &ClusterVector) -> Result<f64> {
        self.check_len(other)?;
        Ok(self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a.unwrap_or(0.0) * b.unwrap_or(0.0))
            .sum())
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v.unwrap_or(0.0).powi(2)).sum::<f64>().sqrt()
    }

    /// Unit-length copy. A zero vector stays zero.
    pub fn normalized(&self) -> ClusterVector {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        Self { values: self.values.iter().map(|v| v.map(|x| x / norm)).collect() }
    }

    /// Weighted mean of `parts`, per position over the parts that have a value.
    pub fn weighted_average(parts: &[(&ClusterVector, f64)]) -> Result<ClusterVector> {
        let Some((first, _)) = parts.first() else {
            return Ok(ClusterVector::default());
        };
        let len = first.len();
        let mut sums = vec![0.0f64; len];
        let mut weights = vec![0.0f64; len];
        for (vector, weight) in parts {
            first.check_len(vector)?;
            for (idx, value) in vector.values.iter().enumerate() {
                if let Some(value) = value {
                    sums[idx] += value * weight;
                    weights[idx] += weight;
                }
            }
        }
        Ok(Self {
            values: sums
                .into_iter()
                .zip(weights)
                .map(|(sum, weight)| (weight > 0.0).then(|| sum / weight))
                .collect(),
        })
    }

    /// Replaces every missing entry with the mean of its column.
    ///
    /// A column with no values at all becomes zero.
    pub fn fill_missing_with_column_mean(vectors: &mut [ClusterVector]) -> Result<()> {
        let Some(len) = vectors.first().map(ClusterVector::len) else {
            return Ok(());
        };
        if let Some(bad) = vectors.iter().find(|v| v.len() != len) {
            return Err(AnalysisError::LengthMismatch { expected: len, actual: bad.len() });
        }

        for col in 0..len {
            let present = vectors.iter().filter_map(|v| v.values[col]).collect::<Vec<_>>();
            let mean = if present.is_empty() {
                0.0
            } else {
                present.iter().sum::<f64>() / present.len() as f64
            };
            for vector in vectors.iter_mut() {
                vector.values[col].get_or_insert(mean);
            }
        }
        Ok(())
    }

    /// Exact bit pattern, used to bucket identical vectors.
    pub(crate) fn pattern_key(&self) -> Vec<u64> {
        self.values.iter().map(|v| v.map_or(u64::MAX, f64::to_bits)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ClusterVector;
    use crate::error::AnalysisError;

    const EPS: f64 = 1e-12;

    #[test]
    fn dot_treats_missing_as_zero() {
        let a = ClusterVector::new(vec![Some(1.0), None, Some(2.0)]);
        let b = ClusterVector::dense([3.0, 5.0, 0.5]);
        assert!((a.dot(&b).unwrap() - 4.0).abs() < EPS);
    }

    #[test]
    fn dot_rejects_mismatched_lengths() {
        let err = ClusterVector::zeros(2).dot(&ClusterVector::zeros(3)).unwrap_err();
        assert_eq!(err, AnalysisError::LengthMismatch { expected: 2, actual: 3 });
    }

    #[test]
    fn normalization_yields_unit_length() {
        let v = ClusterVector::dense([3.0, 4.0]).normalized();
        assert!((v.norm() - 1.0).abs() < EPS);
        assert!((v.get(0).unwrap() - 0.6).abs() < EPS);
        assert_eq!(ClusterVector::zeros(3).normalized(), ClusterVector::zeros(3));
    }

    #[test]
    fn weighted_average_skips_missing_positions() {
        let a = ClusterVector::new(vec![Some(1.0), None]);
        let b = ClusterVector::new(vec![Some(0.0), Some(4.0)]);
        let avg = ClusterVector::weighted_average(&[(&a, 3.0), (&b, 1.0)]).unwrap();
        assert!((avg.get(0).unwrap() - 0.75).abs() < EPS);
        assert!((avg.get(1).unwrap() - 4.0).abs() < EPS);
    }

    #[test]
    fn fills_missing_with_column_mean() {
        let mut vectors = vec![
            ClusterVector::new(vec![Some(1.0), None, None]),
            ClusterVector::new(vec![Some(3.0), Some(2.0), None]),
        ];
        ClusterVector::fill_missing_with_column_mean(&mut vectors).unwrap();
        assert_eq!(vectors[0], ClusterVector::dense([1.0, 2.0, 0.0]));
        assert_eq!(vectors[1], ClusterVector::dense([3.0, 2.0, 0.0]));
    }
}
