pub mod benchmarks;
pub mod grade;
pub mod performance;
pub mod weighted;

pub use benchmarks::{BenchmarkTiers, Benchmarks};
pub use grade::Grade;
pub use performance::{IndustryBenchmarks, PerformanceScore, PerformanceScorer};
pub use weighted::{ScoreBreakdown, ScoreWeights, WeightedScorer};
