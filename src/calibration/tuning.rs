use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::calibration::runner::CalibrationSample;
use crate::error::Result;
use crate::simulation::{simulate_performance, Channel, ChannelRates, SimulationTables};
use crate::round_to;

const TUNING_SEED: u64 = 42;
const ITERATIONS: usize = 200;
const STEP: f64 = 0.2;

/// Random-search tuner for the per-channel base CTR and CVR.
pub struct RateTuner {
    pub calibration_data: Vec<CalibrationSample>,
}

impl RateTuner {
    pub fn new(calibration_data: Vec<CalibrationSample>) -> Self {
        Self { calibration_data }
    }

    /// Returns the tables with the lowest combined CTR and CVR RMSE found.
    /// Only base rates are perturbed; CPC, order value and strategy
    /// multipliers are carried over unchanged.
    pub fn tune(&self, initial: &SimulationTables) -> Result<SimulationTables> {
        let mut rng = StdRng::seed_from_u64(TUNING_SEED);
        let mut best = initial.clone();
        let mut best_score = objective(&best, &self.calibration_data)?;
        let starting_score = best_score;

        for _ in 0..ITERATIONS {
            let candidate = perturb_rates(&best, &mut rng, STEP);
            let score = objective(&candidate, &self.calibration_data)?;
            if score < best_score {
                best = candidate;
                best_score = score;
            }
        }

        debug!(starting_score, best_score, "rate tuning finished");
        Ok(best)
    }
}

fn objective(tables: &SimulationTables, data: &[CalibrationSample]) -> Result<f64> {
    if data.is_empty() {
        return Ok(0.0);
    }

    let mut ctr_error = 0.0;
    let mut cvr_error = 0.0;
    for sample in data {
        let output = simulate_performance(&sample.input, tables)?;
        ctr_error += (output.expected_ctr - sample.actual_ctr()).powi(2);
        cvr_error += (output.expected_cvr - sample.actual_cvr()).powi(2);
    }

    let count = data.len() as f64;
    Ok((ctr_error / count).sqrt() + (cvr_error / count).sqrt())
}

fn perturb_rates(tables: &SimulationTables, rng: &mut StdRng, scale: f64) -> SimulationTables {
    let mut next = tables.clone();
    let mut adjust = |value: f64| -> f64 { round_to(value * (1.0 + rng.gen_range(-scale..scale)), 4) };

    for channel in Channel::ALL {
        let rates: &mut ChannelRates = next.channels.get_mut(channel);
        rates.ctr = adjust(rates.ctr);
        rates.cvr = adjust(rates.cvr);
    }

    next
}
