use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{JobProfile, Student, Subject};

/// Request to score one student against one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub student: Student,
    pub job: JobProfile,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// Request to rank jobs for a student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankJobsRequest {
    pub student: Student,
    #[serde(default)]
    pub jobs: Vec<JobProfile>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<f64>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank students for a job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    pub job: JobProfile,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<f64>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request for a student's match analytics across jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAnalyticsRequest {
    pub student: Student,
    #[serde(default)]
    pub jobs: Vec<JobProfile>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// Request for a job's match analytics across students
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAnalyticsRequest {
    pub job: JobProfile,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}
