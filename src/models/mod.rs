// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Grade, JobId, JobProfile, MatchPolicy, MatchResult, ScoringWeights, Student, StudentId,
    StudentProfile, Subject, SubjectCatalog, SubjectFact, SubjectId, SubjectRequirement,
    GRADE_SCALE_MAX,
};
pub use requests::{JobAnalyticsRequest, RankCandidatesRequest, RankJobsRequest, ScoreRequest, StudentAnalyticsRequest};
pub use responses::{ErrorResponse, HealthResponse, JobAnalyticsResponse, RankingResponse, StudentAnalyticsResponse};
