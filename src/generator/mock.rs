use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{AppConfig, GeneratorConfig};
use crate::{round_to, TrendPoint, VideoMetrics};

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const ID_LEN: usize = 11;

/// Compounding stops once expected daily views would pass this, keeping every
/// jittered point well inside `u64`.
pub const TREND_VIEW_CEILING: f64 = 1e15;
const MAX_PREALLOCATED_DAYS: i64 = 366;

const TITLES: [&str; 6] = [
    "How to Build Amazing React Applications - Complete Tutorial",
    "10 Productivity Tricks Every Developer Should Know",
    "Rust in 100 Minutes: From Zero to Async",
    "I Rebuilt My Home Studio for Under $500",
    "The Truth About Learning to Code in 2024",
    "Designing Dashboards People Actually Use",
];

/// Produces bounded pseudo-random video statistics. The randomness source is
/// injected so tests and seeded deployments get repeatable output.
pub struct MockDataGenerator<R: Rng = StdRng> {
    rng: R,
    settings: GeneratorConfig,
}

impl MockDataGenerator<StdRng> {
    pub fn seeded(seed: u64, settings: GeneratorConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), settings)
    }

    pub fn from_entropy(settings: GeneratorConfig) -> Self {
        Self::with_rng(StdRng::from_entropy(), settings)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let settings = config.generator.clone();
        match settings.seed {
            Some(seed) => Self::seeded(seed, settings),
            None => Self::from_entropy(settings),
        }
    }
}

impl<R: Rng> MockDataGenerator<R> {
    pub fn with_rng(rng: R, settings: GeneratorConfig) -> Self {
        Self { rng, settings }
    }

    pub fn video_metrics(&mut self) -> VideoMetrics {
        self.video_metrics_at(Utc::now())
    }

    pub fn video_metrics_at(&mut self, now: DateTime<Utc>) -> VideoMetrics {
        let (low, high) = ordered(self.settings.views_min, self.settings.views_max);
        let views = self.rng.gen_range(low..=high);
        let views_f = views as f64;

        let likes = (views_f * self.rng.gen_range(0.02..0.09)).round() as u64;
        let comments = (views_f * self.rng.gen_range(0.003..0.015)).round() as u64;
        let shares = (views_f * self.rng.gen_range(0.002..0.008)).round() as u64;
        let dislikes = (likes as f64 * self.rng.gen_range(0.01..0.04)).round() as u64;
        let subscribers = self.rng.gen_range(20_000..=80_000);

        let duration_seconds = self.rng.gen_range(600..=1800) as f64;
        let avg_view_duration_seconds =
            (duration_seconds * self.rng.gen_range(0.3..0.8)).round();
        let watch_time_hours = round_to(views_f * avg_view_duration_seconds / 3600.0, 1);
        let click_through_rate = round_to(self.rng.gen_range(2.0..12.0), 1);

        let title = TITLES[self.rng.gen_range(0..TITLES.len())].to_string();
        let published_at = now - Duration::hours(self.rng.gen_range(24..=24 * 30));

        VideoMetrics {
            id: self.video_id(),
            title,
            views,
            likes,
            dislikes,
            comments,
            shares,
            subscribers,
            duration_seconds,
            watch_time_hours,
            avg_view_duration_seconds,
            click_through_rate,
            published_at,
        }
    }

    /// Daily views ending at `today`. Views compound by the configured growth
    /// rate with +/-20% jitter, so later days trend upward.
    pub fn views_trend(&mut self, days: i64, today: NaiveDate) -> Vec<TrendPoint> {
        if days <= 0 {
            return Vec::new();
        }

        let growth_rate = self.settings.trend_growth_rate.max(0.0);
        let mut expected = self.settings.trend_base_views.clamp(0.0, TREND_VIEW_CEILING);
        let mut points = Vec::with_capacity(days.min(MAX_PREALLOCATED_DAYS) as usize);

        for idx in 0..days {
            let date = today - Duration::days(days - 1 - idx);
            let views = (expected * self.rng.gen_range(0.8..1.2)).round() as u64;
            let watch_time = round_to(views as f64 * self.rng.gen_range(0.015..0.025), 1);

            let next = expected * growth_rate;
            if next.is_finite() && next <= TREND_VIEW_CEILING {
                expected = next;
            }

            points.push(TrendPoint {
                date,
                views,
                watch_time,
            });
        }

        points
    }

    fn video_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

fn ordered(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
