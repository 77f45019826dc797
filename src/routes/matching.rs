use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{academic_performance, aggregate, job_type_compatibility, validation::validate_student_record, Matcher};
use crate::error::MatchError;
use crate::models::{
    ErrorResponse, HealthResponse, JobAnalyticsRequest, JobAnalyticsResponse, RankCandidatesRequest,
    RankJobsRequest, RankingResponse, ScoreRequest, StudentAnalyticsRequest, StudentAnalyticsResponse,
    Student, StudentProfile, Subject, SubjectCatalog,
};
use std::sync::Arc;

/// Number of entries in the analytics "best" lists
const ANALYTICS_TOP_MATCHES: usize = 5;
const ANALYTICS_TOP_CANDIDATES: usize = 10;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Matcher labelling facts with the subjects sent along with the request
    fn matcher_for(&self, subjects: &[Subject]) -> Matcher {
        if subjects.is_empty() {
            return self.matcher.clone();
        }
        let catalog = SubjectCatalog::new(subjects.iter().cloned());
        self.matcher.clone().with_catalog(Arc::new(catalog))
    }
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/score", web::post().to(score_pair))
        .route("/matching/student/recommended-jobs", web::post().to(recommended_jobs))
        .route("/matching/job/recommended-candidates", web::post().to(recommended_candidates))
        .route("/matching/analytics/student", web::post().to(student_analytics))
        .route("/matching/analytics/job", web::post().to(job_analytics));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one student against one job
///
/// POST /api/v1/matching/score
///
/// Request body:
/// ```json
/// {
///   "student": { "id": 1, "course": "CS", "semester": 5, "grades": [] },
///   "job": { "id": 7, "minimumGpa": 7.0, "requirements": [] },
///   "subjects": []
/// }
/// ```
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    let profile = match project_student(&req.student, "student") {
        Ok(profile) => profile,
        Err(e) => return invalid_input(e),
    };
    let matcher = state.matcher_for(&req.subjects);

    match matcher.score(&profile, &req.job) {
        Ok(result) => {
            tracing::debug!(
                "Scored student {} against job {}: {:.2}",
                result.student_id,
                result.job_id,
                result.final_score
            );
            HttpResponse::Ok().json(result)
        }
        Err(e) => invalid_input(e),
    }
}

/// Recommended jobs for a student
///
/// POST /api/v1/matching/student/recommended-jobs
async fn recommended_jobs(
    state: web::Data<AppState>,
    req: web::Json<RankJobsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommended-jobs request: {:?}", errors);
        return validation_failed(errors);
    }

    let min_score = req.min_score.unwrap_or(state.matching.student_min_score);
    let limit = state.matching.effective_limit(req.limit);
    let profile = match project_student(&req.student, "student") {
        Ok(profile) => profile,
        Err(e) => return invalid_input(e),
    };

    tracing::info!(
        "Ranking {} jobs for student {}, min_score: {}, limit: {}",
        req.jobs.len(),
        profile.id,
        min_score,
        limit
    );

    match state
        .matcher_for(&req.subjects)
        .rank_jobs_for_student(&profile, &req.jobs, Some(min_score), Some(limit))
    {
        Ok(results) => HttpResponse::Ok().json(RankingResponse {
            results,
            total_scored: req.jobs.len(),
        }),
        Err(e) => invalid_input(e),
    }
}

/// Recommended candidates for a job
///
/// POST /api/v1/matching/job/recommended-candidates
async fn recommended_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommended-candidates request: {:?}", errors);
        return validation_failed(errors);
    }

    let min_score = req.min_score.unwrap_or(state.matching.job_min_score);
    let limit = state.matching.effective_limit(req.limit);
    let profiles = match project_students(&req.students) {
        Ok(profiles) => profiles,
        Err(e) => return invalid_input(e),
    };

    tracing::info!(
        "Ranking {} candidates for job {}, min_score: {}, limit: {}",
        profiles.len(),
        req.job.id,
        min_score,
        limit
    );

    match state
        .matcher_for(&req.subjects)
        .rank_candidates_for_job(&req.job, &profiles, Some(min_score), Some(limit))
    {
        Ok(results) => HttpResponse::Ok().json(RankingResponse {
            results,
            total_scored: profiles.len(),
        }),
        Err(e) => invalid_input(e),
    }
}

/// Match analytics for a student across the given jobs
///
/// POST /api/v1/matching/analytics/student
async fn student_analytics(
    state: web::Data<AppState>,
    req: web::Json<StudentAnalyticsRequest>,
) -> impl Responder {
    let catalog = SubjectCatalog::new(req.subjects.iter().cloned());
    let matcher = state.matcher_for(&req.subjects);
    let profile = match project_student(&req.student, "student") {
        Ok(profile) => profile,
        Err(e) => return invalid_input(e),
    };

    let results = match matcher.rank_jobs_for_student(&profile, &req.jobs, None, None) {
        Ok(results) => results,
        Err(e) => return invalid_input(e),
    };

    let analytics = aggregate(&results, Some(&catalog), &state.matching.analytics_options());
    let job_types = job_type_compatibility(&results, &req.jobs);
    let best_matches = results.into_iter().take(ANALYTICS_TOP_MATCHES).collect();

    HttpResponse::Ok().json(StudentAnalyticsResponse {
        student_id: profile.id,
        analytics,
        best_matches,
        job_type_compatibility: job_types,
        academic_performance: academic_performance(&req.student, &catalog),
    })
}

/// Match analytics for a job across the given students
///
/// POST /api/v1/matching/analytics/job
async fn job_analytics(
    state: web::Data<AppState>,
    req: web::Json<JobAnalyticsRequest>,
) -> impl Responder {
    let catalog = SubjectCatalog::new(req.subjects.iter().cloned());
    let matcher = state.matcher_for(&req.subjects);
    let profiles = match project_students(&req.students) {
        Ok(profiles) => profiles,
        Err(e) => return invalid_input(e),
    };

    let results = match matcher.rank_candidates_for_job(&req.job, &profiles, None, None) {
        Ok(results) => results,
        Err(e) => return invalid_input(e),
    };

    let options = state.matching.analytics_options();
    let analytics = aggregate(&results, Some(&catalog), &options);
    let top_candidates = results
        .into_iter()
        .filter(|r| r.final_score >= options.qualified_threshold)
        .take(ANALYTICS_TOP_CANDIDATES)
        .collect();

    HttpResponse::Ok().json(JobAnalyticsResponse {
        job_id: req.job.id,
        job_title: req.job.title.clone(),
        analytics,
        top_candidates,
    })
}

/// Check the full grade history, then project it for matching
fn project_student(student: &Student, path: &str) -> Result<StudentProfile, MatchError> {
    validate_student_record(student, path)?;
    Ok(student.profile())
}

fn project_students(students: &[Student]) -> Result<Vec<StudentProfile>, MatchError> {
    students
        .iter()
        .enumerate()
        .map(|(i, student)| project_student(student, &format!("students[{}]", i)))
        .collect()
}

fn invalid_input(e: MatchError) -> HttpResponse {
    tracing::info!("Rejected matching input: {}", e);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid input".to_string(),
        message: e.to_string(),
        status_code: 400,
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
