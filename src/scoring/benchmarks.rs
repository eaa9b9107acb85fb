use serde::{Deserialize, Serialize};

/// Thresholds a metric is measured against. Hitting `average` scores 50,
/// `good` scores 75 and `excellent` scores 95.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BenchmarkTiers {
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
    /// Units above `excellent` that earn one extra point, up to 5.
    pub overflow_step: f64,
}

impl BenchmarkTiers {
    pub const fn new(average: f64, good: f64, excellent: f64, overflow_step: f64) -> Self {
        Self {
            average,
            good,
            excellent,
            overflow_step,
        }
    }

    pub fn score(&self, value: f64) -> f64 {
        let value = sanitize(value);
        let score = if value >= self.excellent {
            let step = if self.overflow_step > 0.0 {
                self.overflow_step
            } else {
                1.0
            };
            95.0 + ((value - self.excellent) / step).min(5.0)
        } else if value >= self.good {
            75.0 + interpolate(value, self.good, self.excellent) * 20.0
        } else if value >= self.average {
            50.0 + interpolate(value, self.average, self.good) * 25.0
        } else if self.average > 0.0 {
            value / self.average * 50.0
        } else {
            0.0
        };
        clamp_score(score)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Benchmarks {
    /// View count that maps to a views score of 80.
    pub reference_views: f64,
    pub ctr: BenchmarkTiers,
    pub engagement: BenchmarkTiers,
    pub retention: BenchmarkTiers,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            reference_views: 100_000.0,
            ctr: BenchmarkTiers::new(2.0, 4.0, 10.0, 2.0),
            engagement: BenchmarkTiers::new(2.0, 4.0, 8.0, 2.0),
            retention: BenchmarkTiers::new(30.0, 50.0, 70.0, 10.0),
        }
    }
}

impl Benchmarks {
    pub fn views_score(&self, views: u64) -> f64 {
        if self.reference_views <= 0.0 {
            return 100.0;
        }
        clamp_score(views as f64 / self.reference_views * 80.0)
    }
}

fn interpolate(value: f64, low: f64, high: f64) -> f64 {
    if high <= low {
        return 1.0;
    }
    (value - low) / (high - low)
}

pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_nan() || value.is_sign_negative() {
        return 0.0;
    }
    value
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(100.0)
}
