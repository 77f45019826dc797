use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::core::{AcademicPerformance, MatchAnalytics};
use crate::models::domain::{JobId, MatchResult, StudentId};

/// Response for the ranking endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub results: Vec<MatchResult>,
    /// Number of pairs scored before threshold and limit
    pub total_scored: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnalyticsResponse {
    pub student_id: StudentId,
    pub analytics: MatchAnalytics,
    pub best_matches: Vec<MatchResult>,
    /// Average final score per job type
    pub job_type_compatibility: BTreeMap<String, f64>,
    pub academic_performance: AcademicPerformance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalyticsResponse {
    pub job_id: JobId,
    pub job_title: String,
    pub analytics: MatchAnalytics,
    pub top_candidates: Vec<MatchResult>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
