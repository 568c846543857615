pub mod classifier;
pub mod metrics;
pub mod scoring;
pub mod advice;
pub mod report;
pub mod analyzer;
pub mod pipeline;

pub use classifier::EventClassifier;
pub use metrics::{ActivityMetrics, MetricAggregator};
pub use scoring::{CompositeScores, ScoreComposer};
pub use advice::AdviceGenerator;
pub use report::ReportBuilder;
pub use analyzer::{analyze, summarize};
pub use pipeline::AnalysisPipeline;
