pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod recommendations;
pub mod scoring;
pub mod server;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::MockDataGenerator;
use crate::recommendations::{Recommendation, RecommendationEngine};
use crate::scoring::{Benchmarks, PerformanceScore, PerformanceScorer, WeightedScorer};

pub const ANALYTICS_VERSION: &str = "1.0.0";
pub const SERVICE_NAME: &str = "Video Analytics API";

/// Snapshot of a single video's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetrics {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comments: u64,
    pub shares: u64,
    pub subscribers: u64,
    pub duration_seconds: f64,
    pub watch_time_hours: f64,
    pub avg_view_duration_seconds: f64,
    pub click_through_rate: f64,
    pub published_at: DateTime<Utc>,
}

impl VideoMetrics {
    /// Copy with float fields forced into their valid ranges.
    pub fn sanitized(&self) -> Self {
        let mut metrics = self.clone();
        metrics.duration_seconds = non_negative(metrics.duration_seconds);
        metrics.watch_time_hours = non_negative(metrics.watch_time_hours);
        metrics.avg_view_duration_seconds = non_negative(metrics.avg_view_duration_seconds);
        metrics.click_through_rate = non_negative(metrics.click_through_rate).min(100.0);
        metrics
    }

    pub fn total_engagements(&self) -> u64 {
        self.likes.saturating_add(self.comments)
    }

    /// (likes + comments) / views as a percentage.
    pub fn engagement_rate(&self) -> f64 {
        if self.views == 0 {
            return 0.0;
        }
        self.total_engagements() as f64 / self.views as f64 * 100.0
    }

    /// Average view duration as a share of the full video length.
    pub fn retention_percentage(&self) -> f64 {
        let duration = non_negative(self.duration_seconds);
        if duration <= 0.0 {
            return 0.0;
        }
        non_negative(self.avg_view_duration_seconds) / duration * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub views: u64,
    pub watch_time: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub engagement_rate: f64,
    pub like_to_dislike_ratio: f64,
    pub watch_time_percentage: f64,
    pub total_engagements: u64,
    pub avg_view_duration_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_views: u64,
    pub watch_time_hours: f64,
    pub engagement_rate: f64,
    pub click_through_rate: f64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub avg_view_duration_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRate {
    pub engagement_rate: f64,
    pub likes: u64,
    pub comments: u64,
    pub views: u64,
    pub total_engagements: u64,
    pub calculation: String,
    pub last_updated: String,
}

/// One slice of the likes/dislikes pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

/// Served with snake_case keys; the dashboard's reaction chart reads them as-is.
#[derive(Debug, Clone, Serialize)]
pub struct LikesDislikes {
    pub likes: u64,
    pub dislikes: u64,
    pub total_reactions: u64,
    pub like_percentage: f64,
    pub dislike_percentage: f64,
    pub ratio: f64,
    pub ratio_text: String,
    pub chart_data: Vec<ChartSlice>,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub current_video: VideoMetrics,
    pub views_over_time: Vec<TrendPoint>,
    pub engagement_metrics: EngagementMetrics,
    pub performance_score: PerformanceScore,
    pub recommendations: Vec<Recommendation>,
    pub last_updated: String,
    pub analytics_version: String,
}

/// Stateless scoring and aggregation over generated metrics.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    scorer: PerformanceScorer,
    recommender: RecommendationEngine,
}

impl AnalyticsEngine {
    pub fn new(benchmarks: Benchmarks) -> Self {
        Self {
            scorer: PerformanceScorer::new(benchmarks, WeightedScorer::default()),
            recommender: RecommendationEngine::default(),
        }
    }

    pub fn performance(&self, metrics: &VideoMetrics) -> PerformanceScore {
        self.scorer.score(metrics)
    }

    pub fn recommendations(&self, metrics: &VideoMetrics) -> Vec<Recommendation> {
        let breakdown = self.scorer.breakdown(metrics);
        self.recommender.evaluate(metrics, &breakdown)
    }

    pub fn engagement_metrics(&self, metrics: &VideoMetrics) -> EngagementMetrics {
        let like_to_dislike_ratio = if metrics.dislikes > 0 {
            metrics.likes as f64 / metrics.dislikes as f64
        } else {
            0.0
        };

        EngagementMetrics {
            engagement_rate: round_to(metrics.engagement_rate(), 2),
            like_to_dislike_ratio: round_to(like_to_dislike_ratio, 1),
            watch_time_percentage: round_to(metrics.retention_percentage(), 1),
            total_engagements: metrics.total_engagements(),
            avg_view_duration_seconds: non_negative(metrics.avg_view_duration_seconds),
        }
    }

    pub fn key_metrics(&self, metrics: &VideoMetrics) -> KeyMetrics {
        KeyMetrics {
            total_views: metrics.views,
            watch_time_hours: non_negative(metrics.watch_time_hours),
            engagement_rate: round_to(metrics.engagement_rate(), 2),
            click_through_rate: non_negative(metrics.click_through_rate).min(100.0),
            total_likes: metrics.likes,
            total_comments: metrics.comments,
            avg_view_duration_seconds: non_negative(metrics.avg_view_duration_seconds),
        }
    }

    pub fn engagement_rate(&self, metrics: &VideoMetrics, now: DateTime<Utc>) -> EngagementRate {
        EngagementRate {
            engagement_rate: round_to(metrics.engagement_rate(), 2),
            likes: metrics.likes,
            comments: metrics.comments,
            views: metrics.views,
            total_engagements: metrics.total_engagements(),
            calculation: format!(
                "({} likes + {} comments) / {} views x 100",
                format_number(metrics.likes as f64),
                format_number(metrics.comments as f64),
                format_number(metrics.views as f64)
            ),
            last_updated: timestamp(now),
        }
    }

    pub fn likes_dislikes(&self, metrics: &VideoMetrics, now: DateTime<Utc>) -> LikesDislikes {
        let likes = metrics.likes;
        let dislikes = metrics.dislikes;
        let total_reactions = likes.saturating_add(dislikes);

        let (like_percentage, dislike_percentage) = if total_reactions > 0 {
            let total = total_reactions as f64;
            (likes as f64 / total * 100.0, dislikes as f64 / total * 100.0)
        } else {
            (0.0, 0.0)
        };
        let ratio = if dislikes > 0 {
            likes as f64 / dislikes as f64
        } else {
            likes as f64
        };
        let ratio = round_to(ratio, 1);

        LikesDislikes {
            likes,
            dislikes,
            total_reactions,
            like_percentage: round_to(like_percentage, 1),
            dislike_percentage: round_to(dislike_percentage, 1),
            ratio,
            ratio_text: format!("{:.1}:1", ratio),
            chart_data: vec![
                ChartSlice {
                    name: "Likes".to_string(),
                    value: likes,
                    color: "#10b981".to_string(),
                },
                ChartSlice {
                    name: "Dislikes".to_string(),
                    value: dislikes,
                    color: "#ef4444".to_string(),
                },
            ],
            last_updated: timestamp(now),
        }
    }

    pub fn overview<R: Rng>(
        &self,
        generator: &mut MockDataGenerator<R>,
        days: i64,
        now: DateTime<Utc>,
    ) -> Overview {
        let current_video = generator.video_metrics_at(now);
        let views_over_time = generator.views_trend(days, now.date_naive());
        let performance_score = self.performance(&current_video);
        let recommendations = self
            .recommender
            .evaluate(&current_video, &performance_score.breakdown);

        Overview {
            engagement_metrics: self.engagement_metrics(&current_video),
            current_video,
            views_over_time,
            performance_score,
            recommendations,
            last_updated: timestamp(now),
            analytics_version: ANALYTICS_VERSION.to_string(),
        }
    }
}

pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}

pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as u64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
