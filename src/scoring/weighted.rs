use serde::{Deserialize, Serialize};

use crate::scoring::benchmarks::clamp_score;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub views_score: f64,
    pub engagement_score: f64,
    pub watch_time_score: f64,
    pub ctr_score: f64,
}

impl ScoreBreakdown {
    pub fn new(views_score: f64, engagement_score: f64, watch_time_score: f64, ctr_score: f64) -> Self {
        Self {
            views_score: clamp_score(views_score),
            engagement_score: clamp_score(engagement_score),
            watch_time_score: clamp_score(watch_time_score),
            ctr_score: clamp_score(ctr_score),
        }
    }
}

/// Per-dimension weights of the overall score. They sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub views: f64,
    pub engagement: f64,
    pub watch_time: f64,
    pub ctr: f64,
}

impl ScoreWeights {
    pub const STANDARD: ScoreWeights = ScoreWeights {
        views: 0.25,
        engagement: 0.30,
        watch_time: 0.25,
        ctr: 0.20,
    };

    pub fn total(&self) -> f64 {
        self.views + self.engagement + self.watch_time + self.ctr
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    weights: ScoreWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn score(&self, breakdown: &ScoreBreakdown) -> f64 {
        let mut score = 0.0;

        score += clamp_score(breakdown.views_score) * self.weights.views;
        score += clamp_score(breakdown.engagement_score) * self.weights.engagement;
        score += clamp_score(breakdown.watch_time_score) * self.weights.watch_time;
        score += clamp_score(breakdown.ctr_score) * self.weights.ctr;

        clamp_score(score)
    }
}
