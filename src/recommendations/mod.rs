pub mod rules;

pub use rules::{default_rules, Category, Kind, Level, Recommendation, Rule, RuleContext};

use crate::scoring::ScoreBreakdown;
use crate::VideoMetrics;

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    rules: Vec<Rule>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl RecommendationEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Every recommendation whose rule fires, in rule order.
    pub fn evaluate(&self, metrics: &VideoMetrics, breakdown: &ScoreBreakdown) -> Vec<Recommendation> {
        let context = RuleContext { metrics, breakdown };
        self.rules
            .iter()
            .filter_map(|rule| rule.apply(&context))
            .collect()
    }
}
