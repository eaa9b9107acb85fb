use serde::{Deserialize, Serialize};

use crate::scoring::ScoreBreakdown;
use crate::VideoMetrics;

pub const LOW_SCORE_THRESHOLD: f64 = 60.0;
pub const STRONG_SCORE_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Engagement,
    Retention,
    Discoverability,
    Growth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Severity tag the dashboard styles recommendation cards by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: Kind,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub priority: Level,
    pub impact: Level,
    pub action_items: Vec<String>,
}

pub struct RuleContext<'a> {
    pub metrics: &'a VideoMetrics,
    pub breakdown: &'a ScoreBreakdown,
}

/// A condition paired with the recommendation it emits. Rules never see
/// each other's output.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub predicate: fn(&RuleContext<'_>) -> bool,
    pub build: fn(&RuleContext<'_>) -> Recommendation,
}

impl Rule {
    pub fn apply(&self, context: &RuleContext<'_>) -> Option<Recommendation> {
        if (self.predicate)(context) {
            Some((self.build)(context))
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "low_engagement",
            predicate: |ctx| ctx.breakdown.engagement_score < LOW_SCORE_THRESHOLD,
            build: boost_interaction,
        },
        Rule {
            name: "low_ctr",
            predicate: |ctx| ctx.breakdown.ctr_score < LOW_SCORE_THRESHOLD,
            build: improve_ctr,
        },
        Rule {
            name: "low_retention",
            predicate: |ctx| ctx.breakdown.watch_time_score < LOW_SCORE_THRESHOLD,
            build: improve_retention,
        },
        Rule {
            name: "low_views",
            predicate: |ctx| ctx.breakdown.views_score < LOW_SCORE_THRESHOLD,
            build: increase_discoverability,
        },
        Rule {
            name: "breakout_engagement",
            predicate: |ctx| {
                ctx.breakdown.engagement_score >= STRONG_SCORE_THRESHOLD
                    && ctx.breakdown.views_score >= STRONG_SCORE_THRESHOLD
            },
            build: build_series,
        },
    ]
}

fn boost_interaction(ctx: &RuleContext<'_>) -> Recommendation {
    Recommendation {
        kind: Kind::Info,
        category: Category::Engagement,
        title: "Boost Audience Interaction".to_string(),
        description: format!(
            "Engagement rate of {:.1}% trails strong performers. Higher interaction signals quality content to the recommendation algorithm.",
            ctx.metrics.engagement_rate()
        ),
        priority: Level::High,
        impact: Level::High,
        action_items: items(&[
            "Ask specific questions to encourage comments",
            "Create polls and community posts",
            "Respond to comments within the first hour",
            "End videos with a clear call-to-action",
        ]),
    }
}

fn improve_ctr(ctx: &RuleContext<'_>) -> Recommendation {
    Recommendation {
        kind: Kind::Info,
        category: Category::Discoverability,
        title: "Improve Click-Through Rate".to_string(),
        description: format!(
            "A CTR of {:.1}% is below optimal. Strong channels reach 8-12% through thumbnail and title work.",
            ctx.metrics.click_through_rate
        ),
        priority: Level::Medium,
        impact: Level::High,
        action_items: items(&[
            "Use bright, contrasting colors in thumbnails",
            "Include emotional expressions in thumbnails",
            "Write curiosity-driven titles",
            "A/B test thumbnail styles",
        ]),
    }
}

fn improve_retention(ctx: &RuleContext<'_>) -> Recommendation {
    Recommendation {
        kind: Kind::Warning,
        category: Category::Retention,
        title: "Improve Audience Retention".to_string(),
        description: format!(
            "Viewers leave after {:.1}% of the video on average. Retention weighs heavily in ranking.",
            ctx.metrics.retention_percentage()
        ),
        priority: Level::High,
        impact: Level::High,
        action_items: items(&[
            "Hook viewers in the first 15 seconds",
            "Cut slow sections",
            "Add a pattern interrupt every 30 seconds",
            "Use jump cuts and visual variety",
        ]),
    }
}

fn increase_discoverability(ctx: &RuleContext<'_>) -> Recommendation {
    Recommendation {
        kind: Kind::Warning,
        category: Category::Discoverability,
        title: "Increase Video Discoverability".to_string(),
        description: format!(
            "{} views is below the reach this channel should expect. Search and suggested traffic need work.",
            crate::format_number(ctx.metrics.views as f64)
        ),
        priority: Level::Medium,
        impact: Level::Medium,
        action_items: items(&[
            "Research keywords for titles and descriptions",
            "Add the video to relevant playlists",
            "Post when your audience is most active",
            "Share to community tab and other platforms",
        ]),
    }
}

fn build_series(_ctx: &RuleContext<'_>) -> Recommendation {
    Recommendation {
        kind: Kind::Success,
        category: Category::Growth,
        title: "Turn This Video Into a Series".to_string(),
        description: "This content resonates strongly and reaches well beyond the baseline. Build on the momentum.".to_string(),
        priority: Level::Low,
        impact: Level::Medium,
        action_items: items(&[
            "Plan follow-up videos on the same theme",
            "Analyze which topics drove engagement",
            "Pin a comment pointing to related videos",
            "Promote this video across platforms",
        ]),
    }
}

fn items(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
