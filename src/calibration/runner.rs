use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::simulation::{simulate_performance, SimulationInput, SimulationTables};
use crate::{round_to, safe_divide};

/// A finished campaign: the inputs it would have been simulated with and
/// what it actually delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub campaign_id: String,
    #[serde(flatten)]
    pub input: SimulationInput,
    pub actual_impressions: u64,
    pub actual_clicks: u64,
    pub actual_conversions: u64,
    pub actual_revenue: f64,
}

impl CalibrationSample {
    /// Percent.
    pub fn actual_ctr(&self) -> f64 {
        safe_divide(self.actual_clicks as f64, self.actual_impressions as f64, 0.0) * 100.0
    }

    /// Percent.
    pub fn actual_cvr(&self) -> f64 {
        safe_divide(self.actual_conversions as f64, self.actual_clicks as f64, 0.0) * 100.0
    }

    pub fn actual_roas(&self) -> f64 {
        safe_divide(self.actual_revenue, self.input.budget, 0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalibrationMetrics {
    pub ctr_mae: f64,
    pub cvr_mae: f64,
    pub roas_mae: f64,
    pub roas_correlation: f64,
    pub pairwise_ranking_accuracy: f64,
    pub sample_count: usize,
}

pub struct CalibrationRunner {
    pub samples: Vec<CalibrationSample>,
}

impl CalibrationRunner {
    pub fn new(samples: Vec<CalibrationSample>) -> Self {
        Self { samples }
    }

    pub fn compute_metrics(&self, tables: &SimulationTables) -> Result<CalibrationMetrics> {
        if self.samples.is_empty() {
            return Ok(CalibrationMetrics::default());
        }

        let mut ctr_errors = Vec::new();
        let mut cvr_errors = Vec::new();
        let mut roas_errors = Vec::new();
        let mut roas_pairs = Vec::new();

        for sample in &self.samples {
            let output = simulate_performance(&sample.input, tables)?;

            ctr_errors.push((output.expected_ctr - sample.actual_ctr()).abs());
            cvr_errors.push((output.expected_cvr - sample.actual_cvr()).abs());
            roas_errors.push((output.expected_roas - sample.actual_roas()).abs());
            roas_pairs.push((output.expected_roas, sample.actual_roas()));
        }

        let (predicted, actual): (Vec<f64>, Vec<f64>) = roas_pairs.iter().cloned().unzip();

        Ok(CalibrationMetrics {
            ctr_mae: round_to(mean(&ctr_errors), 4),
            cvr_mae: round_to(mean(&cvr_errors), 4),
            roas_mae: round_to(mean(&roas_errors), 4),
            roas_correlation: round_to(correlation(&roas_pairs), 4),
            pairwise_ranking_accuracy: round_to(pairwise_accuracy(&predicted, &actual), 4),
            sample_count: self.samples.len(),
        })
    }
}

fn correlation(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.iter().cloned().unzip();
    let mean_x = mean(&xs);
    let mean_y = mean(&ys);

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;

    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    safe_divide(numerator, denom_x.sqrt() * denom_y.sqrt(), 0.0)
}

fn mean(values: &[f64]) -> f64 {
    safe_divide(values.iter().sum::<f64>(), values.len() as f64, 0.0)
}

/// Share of pairs ordered the same way in both series. A tie only counts as
/// correct when both sides tie.
fn pairwise_accuracy(predicted: &[f64], actual: &[f64]) -> f64 {
    let mut correct = 0usize;
    let mut total = 0usize;

    for i in 0..predicted.len() {
        for j in (i + 1)..predicted.len() {
            let pred_order = predicted[i].partial_cmp(&predicted[j]);
            let actual_order = actual[i].partial_cmp(&actual[j]);
            if let (Some(pred), Some(act)) = (pred_order, actual_order) {
                if pred == act {
                    correct += 1;
                }
                total += 1;
            }
        }
    }

    safe_divide(correct as f64, total as f64, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ties_count_as_correct() {
        assert_eq!(pairwise_accuracy(&[1.0, 1.0], &[3.0, 3.0]), 1.0);
    }

    #[test]
    fn one_sided_ties_count_as_wrong() {
        assert_eq!(pairwise_accuracy(&[1.0, 1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(pairwise_accuracy(&[1.0, 2.0, 2.0], &[1.0, 2.0, 3.0]), 2.0 / 3.0);
    }

    #[test]
    fn fewer_than_two_points_have_no_correlation() {
        assert_eq!(correlation(&[(1.0, 2.0)]), 0.0);
        assert_eq!(pairwise_accuracy(&[4.0], &[5.0]), 0.0);
    }
}
