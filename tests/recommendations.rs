use chrono::Utc;
use video_analytics::recommendations::{
    default_rules, Category, Kind, Level, Recommendation, RecommendationEngine,
};
use video_analytics::scoring::ScoreBreakdown;
use video_analytics::{AnalyticsEngine, VideoMetrics};

fn metrics() -> VideoMetrics {
    VideoMetrics {
        id: "rec".to_string(),
        title: "Recommendation fixture".to_string(),
        views: 100_000,
        likes: 2_000,
        dislikes: 50,
        comments: 400,
        shares: 200,
        subscribers: 40_000,
        duration_seconds: 1_000.0,
        watch_time_hours: 18_000.0,
        avg_view_duration_seconds: 650.0,
        click_through_rate: 5.5,
        published_at: Utc::now(),
    }
}

fn categories(recs: &[Recommendation]) -> Vec<Category> {
    recs.iter().map(|rec| rec.category).collect()
}

#[test]
fn low_engagement_emits_single_engagement_entry() {
    let engine = RecommendationEngine::default();
    let breakdown = ScoreBreakdown::new(80.0, 55.0, 90.0, 80.0);

    let recs = engine.evaluate(&metrics(), &breakdown);

    assert_eq!(categories(&recs), vec![Category::Engagement]);
    assert_eq!(recs[0].title, "Boost Audience Interaction");
    assert_eq!(recs[0].priority, Level::High);
}

#[test]
fn analytics_engine_matches_rule_table_for_fixture() {
    let engine = AnalyticsEngine::default();
    let recs = engine.recommendations(&metrics());

    let engagement = recs
        .iter()
        .filter(|rec| rec.category == Category::Engagement)
        .count();
    assert_eq!(engagement, 1);
    assert!(recs.iter().all(|rec| rec.category != Category::Retention));
    assert!(recs.iter().all(|rec| rec.title != "Improve Click-Through Rate"));
}

#[test]
fn rules_fire_in_table_order() {
    let engine = RecommendationEngine::default();
    let breakdown = ScoreBreakdown::new(10.0, 10.0, 10.0, 10.0);

    let recs = engine.evaluate(&metrics(), &breakdown);
    let titles: Vec<&str> = recs.iter().map(|rec| rec.title.as_str()).collect();

    assert_eq!(
        titles,
        vec![
            "Boost Audience Interaction",
            "Improve Click-Through Rate",
            "Improve Audience Retention",
            "Increase Video Discoverability",
        ]
    );
}

#[test]
fn healthy_scores_produce_no_fixes() {
    let engine = RecommendationEngine::default();
    let breakdown = ScoreBreakdown::new(70.0, 70.0, 70.0, 70.0);

    assert!(engine.evaluate(&metrics(), &breakdown).is_empty());
}

#[test]
fn strong_reach_and_engagement_suggests_growth() {
    let engine = RecommendationEngine::default();
    let breakdown = ScoreBreakdown::new(85.0, 90.0, 75.0, 75.0);

    let recs = engine.evaluate(&metrics(), &breakdown);
    assert_eq!(categories(&recs), vec![Category::Growth]);
    assert_eq!(recs[0].priority, Level::Low);
}

#[test]
fn threshold_table() {
    let cases: [((f64, f64, f64, f64), &[Category]); 5] = [
        ((59.9, 60.0, 60.0, 60.0), &[Category::Discoverability]),
        ((60.0, 59.9, 60.0, 60.0), &[Category::Engagement]),
        ((60.0, 60.0, 59.9, 60.0), &[Category::Retention]),
        ((60.0, 60.0, 60.0, 59.9), &[Category::Discoverability]),
        ((80.0, 80.0, 60.0, 60.0), &[Category::Growth]),
    ];

    let engine = RecommendationEngine::default();
    for ((views, engagement, watch_time, ctr), expected) in cases {
        let breakdown = ScoreBreakdown::new(views, engagement, watch_time, ctr);
        let recs = engine.evaluate(&metrics(), &breakdown);
        assert_eq!(categories(&recs), expected.to_vec(), "{:?}", breakdown);
    }
}

#[test]
fn evaluation_is_deterministic() {
    let engine = RecommendationEngine::default();
    let breakdown = ScoreBreakdown::new(30.0, 45.0, 62.0, 58.0);
    let fixture = metrics();

    let first = engine.evaluate(&fixture, &breakdown);
    for _ in 0..20 {
        assert_eq!(engine.evaluate(&fixture, &breakdown), first);
    }
}

#[test]
fn custom_rule_tables_are_supported() {
    let rules = default_rules().into_iter().take(1).collect();
    let engine = RecommendationEngine::new(rules);
    let breakdown = ScoreBreakdown::new(0.0, 0.0, 0.0, 0.0);

    let recs = engine.evaluate(&metrics(), &breakdown);
    assert_eq!(recs.len(), 1);
    assert_eq!(engine.rules()[0].name, "low_engagement");
}

#[test]
fn recommendation_serializes_with_wire_names() {
    let engine = RecommendationEngine::default();
    let breakdown = ScoreBreakdown::new(80.0, 55.0, 90.0, 80.0);
    let recs = engine.evaluate(&metrics(), &breakdown);

    let value = serde_json::to_value(&recs[0]).unwrap();
    assert_eq!(value["type"], "info");
    assert!(value.get("kind").is_none());
    assert_eq!(value["category"], "Engagement");
    assert_eq!(value["priority"], "high");
    assert_eq!(value["impact"], "high");
    assert!(value["actionItems"].as_array().is_some());
}

#[test]
fn severity_tags_follow_the_rule() {
    let engine = RecommendationEngine::default();

    let weak = engine.evaluate(&metrics(), &ScoreBreakdown::new(10.0, 10.0, 10.0, 10.0));
    let kinds: Vec<Kind> = weak.iter().map(|rec| rec.kind).collect();
    assert_eq!(
        kinds,
        vec![Kind::Info, Kind::Info, Kind::Warning, Kind::Warning]
    );

    let strong = engine.evaluate(&metrics(), &ScoreBreakdown::new(90.0, 90.0, 90.0, 90.0));
    assert_eq!(strong[0].kind, Kind::Success);
}
