use serde::Serialize;

use crate::scoring::{Benchmarks, Grade, ScoreBreakdown, WeightedScorer};
use crate::VideoMetrics;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmarks {
    pub avg_ctr: f64,
    pub avg_engagement: f64,
    pub avg_retention: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceScore {
    pub overall_score: f64,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
    pub benchmarks: IndustryBenchmarks,
}

#[derive(Debug, Clone, Default)]
pub struct PerformanceScorer {
    benchmarks: Benchmarks,
    weighted_scorer: WeightedScorer,
}

impl PerformanceScorer {
    pub fn new(benchmarks: Benchmarks, weighted_scorer: WeightedScorer) -> Self {
        Self {
            benchmarks,
            weighted_scorer,
        }
    }

    pub fn benchmarks(&self) -> &Benchmarks {
        &self.benchmarks
    }

    pub fn breakdown(&self, metrics: &VideoMetrics) -> ScoreBreakdown {
        let metrics = metrics.sanitized();
        ScoreBreakdown::new(
            self.benchmarks.views_score(metrics.views),
            self.benchmarks.engagement.score(metrics.engagement_rate()),
            self.benchmarks.retention.score(metrics.retention_percentage()),
            self.benchmarks.ctr.score(metrics.click_through_rate),
        )
    }

    pub fn score(&self, metrics: &VideoMetrics) -> PerformanceScore {
        let breakdown = self.breakdown(metrics);
        self.score_breakdown(breakdown)
    }

    pub fn score_breakdown(&self, breakdown: ScoreBreakdown) -> PerformanceScore {
        let overall_score = self.weighted_scorer.score(&breakdown);
        PerformanceScore {
            overall_score,
            grade: Grade::from_score(overall_score),
            breakdown,
            benchmarks: IndustryBenchmarks {
                avg_ctr: self.benchmarks.ctr.average,
                avg_engagement: self.benchmarks.engagement.average,
                avg_retention: self.benchmarks.retention.average,
            },
        }
    }
}
