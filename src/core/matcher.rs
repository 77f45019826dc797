use crate::core::{
    ranker::{rank_results, RankBy},
    scoring::calculate_match_score,
    validation::{validate_job, validate_policy, validate_student, validate_weights},
};
use crate::error::MatchError;
use crate::models::{JobProfile, MatchPolicy, MatchResult, ScoringWeights, StudentProfile, SubjectCatalog};
use rayon::prelude::*;
use std::sync::Arc;

/// Main matching entry point
///
/// Validates input, then scores pairs and ranks them. Holds only immutable
/// policy, so a single instance can be shared across threads and requests.
///
/// # Pipeline Stages
/// 1. Input validation
/// 2. Requirement evaluation per pair
/// 3. Weighted scoring and explanation
/// 4. Threshold, ordering and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    policy: MatchPolicy,
    catalog: Option<Arc<SubjectCatalog>>,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, policy: MatchPolicy) -> Result<Self, MatchError> {
        validate_weights(&weights)?;
        validate_policy(&policy)?;
        Ok(Self {
            weights,
            policy,
            catalog: None,
        })
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
            policy: MatchPolicy::default(),
            catalog: None,
        }
    }

    /// Label subject facts with code and name from the catalog
    pub fn with_catalog(mut self, catalog: Arc<SubjectCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Score a single student against a single job
    pub fn score(&self, student: &StudentProfile, job: &JobProfile) -> Result<MatchResult, MatchError> {
        validate_student(student, "student")?;
        validate_job(job, "job")?;
        Ok(self.score_unchecked(student, job))
    }

    /// Best jobs for a student
    ///
    /// # Arguments
    /// * `student` - The student being placed
    /// * `jobs` - Candidate job postings
    /// * `min_score` - Drop results below this percentage; `None` keeps all
    /// * `limit` - Maximum number of results; `None` keeps all
    pub fn rank_jobs_for_student(
        &self,
        student: &StudentProfile,
        jobs: &[JobProfile],
        min_score: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Vec<MatchResult>, MatchError> {
        validate_min_score(min_score)?;
        validate_student(student, "student")?;
        for (i, job) in jobs.iter().enumerate() {
            validate_job(job, &format!("jobs[{}]", i))?;
        }

        let results: Vec<MatchResult> = jobs
            .par_iter()
            .map(|job| self.score_unchecked(student, job))
            .collect();

        Ok(rank_results(results, min_score, limit, RankBy::Job))
    }

    /// Best students for a job
    pub fn rank_candidates_for_job(
        &self,
        job: &JobProfile,
        students: &[StudentProfile],
        min_score: Option<f64>,
        limit: Option<usize>,
    ) -> Result<Vec<MatchResult>, MatchError> {
        validate_min_score(min_score)?;
        validate_job(job, "job")?;
        for (i, student) in students.iter().enumerate() {
            validate_student(student, &format!("students[{}]", i))?;
        }

        let results: Vec<MatchResult> = students
            .par_iter()
            .map(|student| self.score_unchecked(student, job))
            .collect();

        Ok(rank_results(results, min_score, limit, RankBy::Student))
    }

    #[inline]
    fn score_unchecked(&self, student: &StudentProfile, job: &JobProfile) -> MatchResult {
        calculate_match_score(student, job, &self.weights, &self.policy, self.catalog.as_deref())
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn validate_min_score(min_score: Option<f64>) -> Result<(), MatchError> {
    match min_score {
        Some(score) if !score.is_finite() => Err(MatchError::invalid("minScore", "must be a finite number")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Subject, SubjectRequirement};
    use std::collections::{BTreeMap, BTreeSet};

    fn create_student(id: u64, gpa: f64, course: &str, grades: &[(u64, f64)]) -> StudentProfile {
        StudentProfile {
            id,
            gpa,
            course: course.to_string(),
            semester: 5,
            grades: grades.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn create_job(id: u64, minimum_gpa: f64, requirements: Vec<SubjectRequirement>) -> JobProfile {
        JobProfile {
            id,
            title: format!("Job {}", id),
            minimum_gpa,
            minimum_semester: Some(3),
            preferred_courses: BTreeSet::from(["CS".to_string()]),
            job_type: None,
            requirements,
        }
    }

    fn requirement(subject_id: u64, minimum_grade: f64) -> SubjectRequirement {
        SubjectRequirement { subject_id, minimum_grade, weight: 1.0, is_mandatory: true }
    }

    #[test]
    fn test_rank_jobs_for_student() {
        let matcher = Matcher::with_default_weights();
        let student = create_student(1, 8.0, "CS", &[(1, 8.0)]);

        let jobs = vec![
            create_job(3, 9.0, vec![requirement(1, 7.0)]), // GPA short
            create_job(1, 7.0, vec![requirement(2, 7.0)]), // Subject missing
            create_job(2, 7.0, vec![requirement(1, 7.0)]), // Perfect
        ];

        let ranked = matcher.rank_jobs_for_student(&student, &jobs, None, None).unwrap();

        let ids: Vec<u64> = ranked.iter().map(|r| r.job_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(ranked[0].final_score, 100.0);
    }

    #[test]
    fn test_rank_candidates_for_job_threshold_and_limit() {
        let matcher = Matcher::with_default_weights();
        let job = create_job(1, 7.0, vec![requirement(1, 7.0)]);

        let students: Vec<StudentProfile> = (0..10)
            .map(|i| create_student(i, 8.0, if i % 2 == 0 { "CS" } else { "Law" }, &[(1, 8.0)]))
            .collect();

        let ranked = matcher.rank_candidates_for_job(&job, &students, Some(90.0), Some(3)).unwrap();

        assert_eq!(ranked.len(), 3);
        let ids: Vec<u64> = ranked.iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec![0, 2, 4]);
    }

    #[test]
    fn test_ranking_is_reproducible() {
        let matcher = Matcher::with_default_weights();
        let student = create_student(1, 7.5, "CS", &[(1, 6.0), (2, 9.0)]);
        let jobs: Vec<JobProfile> = (0..50)
            .map(|i| create_job(50 - i, 5.0 + (i % 5) as f64, vec![requirement(1 + i % 3, 6.5)]))
            .collect();

        let first = matcher.rank_jobs_for_student(&student, &jobs, Some(10.0), Some(20)).unwrap();
        let second = matcher.rank_jobs_for_student(&student, &jobs, Some(10.0), Some(20)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_candidate_fails_fast() {
        let matcher = Matcher::with_default_weights();
        let student = create_student(1, 8.0, "CS", &[]);
        let mut bad = create_job(2, 7.0, vec![requirement(1, 7.0)]);
        bad.requirements[0].weight = 0.0;

        let err = matcher
            .rank_jobs_for_student(&student, &[create_job(1, 7.0, vec![]), bad], None, None)
            .unwrap_err();
        assert_eq!(err.field(), "jobs[1].requirements[0].weight");
    }

    #[test]
    fn test_rejects_invalid_weights() {
        let weights = ScoringWeights { subjects: f64::NAN, ..ScoringWeights::default() };
        assert!(Matcher::new(weights, MatchPolicy::default()).is_err());
    }

    #[test]
    fn test_catalog_labels_missing_subjects() {
        let catalog = Arc::new(SubjectCatalog::new([Subject {
            id: 2,
            code: "MAT101".to_string(),
            name: "Calculus I".to_string(),
            category: Some("mathematics".to_string()),
        }]));
        let matcher = Matcher::with_default_weights().with_catalog(catalog);

        let result = matcher
            .score(&create_student(1, 8.0, "CS", &[]), &create_job(1, 7.0, vec![requirement(2, 6.0)]))
            .unwrap();
        assert!(result.recommendation_reason.contains("missing required: MAT101"));
    }
}
