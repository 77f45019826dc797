// Core algorithm exports
pub mod analytics;
pub mod matcher;
pub mod ranker;
pub mod reason;
pub mod requirements;
pub mod scoring;
pub mod validation;

pub use analytics::{
    aggregate, academic_performance, job_type_compatibility, AcademicPerformance, AnalyticsOptions, MatchAnalytics,
};
pub use matcher::Matcher;
pub use ranker::{rank_results, RankBy};
pub use reason::generate_reason;
pub use requirements::{evaluate_requirements, RequirementEvaluation};
pub use scoring::{calculate_match_score, SubScores};
