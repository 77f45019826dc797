use crate::core::reason::generate_reason;
use crate::core::requirements::{evaluate_requirements, RequirementEvaluation};
use crate::models::{
    domain::round2, JobProfile, MatchPolicy, MatchResult, ScoringWeights, SubjectCatalog,
    StudentProfile,
};

/// The four normalized sub-scores and their threshold checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub subjects: f64,
    pub gpa: f64,
    pub course: f64,
    pub semester: f64,
    pub gpa_match: bool,
    pub course_match: bool,
    pub semester_match: bool,
}

/// Calculate the explained match between one student and one job
///
/// Scoring formula:
/// final = 100 * (
///     subjects * w.subjects +    # weighted requirement coverage
///     gpa      * w.gpa +         # partial credit below the minimum
///     course   * w.course +      # binary
///     semester * w.semester      # partial credit below the minimum
/// ) / sum(w)
///
/// Inputs are assumed validated; see `core::validation`.
pub fn calculate_match_score(
    student: &StudentProfile,
    job: &JobProfile,
    weights: &ScoringWeights,
    policy: &MatchPolicy,
    catalog: Option<&SubjectCatalog>,
) -> MatchResult {
    let evaluation = evaluate_requirements(&student.grades, &job.requirements, policy, catalog);
    let scores = calculate_sub_scores(student, job, &evaluation);

    let weighted = scores.subjects * weights.subjects
        + scores.gpa * weights.gpa
        + scores.course * weights.course
        + scores.semester * weights.semester;
    let total_weight = weights.sum();

    let final_score = if total_weight > 0.0 {
        (weighted / total_weight * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    let max_possible_score = total_weight * 100.0;
    let raw_score = (weighted * 100.0).clamp(0.0, max_possible_score);

    let recommendation_reason = generate_reason(student, job, &scores, &evaluation);

    MatchResult {
        student_id: student.id,
        job_id: job.id,
        raw_score: round2(raw_score),
        max_possible_score: round2(max_possible_score),
        final_score: round2(final_score),
        gpa_match: scores.gpa_match,
        semester_match: scores.semester_match,
        course_match: scores.course_match,
        matched_subjects: evaluation.matched,
        missing_subjects: evaluation.missing,
        recommendation_reason,
    }
}

/// Normalize each component to [0, 1]
pub fn calculate_sub_scores(
    student: &StudentProfile,
    job: &JobProfile,
    evaluation: &RequirementEvaluation,
) -> SubScores {
    let (gpa, gpa_match) = calculate_threshold_score(student.gpa, job.minimum_gpa);
    let (semester, semester_match) = calculate_threshold_score(
        student.semester as f64,
        job.minimum_semester.unwrap_or(0) as f64,
    );
    let course_match = calculate_course_match(&student.course, job);

    SubScores {
        subjects: evaluation.sub_score(),
        gpa,
        course: if course_match { 1.0 } else { 0.0 },
        semester,
        gpa_match,
        course_match,
        semester_match,
    }
}

/// Full credit at or above the minimum, proportional credit below it
///
/// A non-positive minimum cannot be divided by and counts as no minimum.
#[inline]
fn calculate_threshold_score(actual: f64, minimum: f64) -> (f64, bool) {
    if minimum <= 0.0 || actual >= minimum {
        return (1.0, true);
    }
    ((actual / minimum).clamp(0.0, 1.0), false)
}

/// An empty preference list accepts every course
#[inline]
fn calculate_course_match(course: &str, job: &JobProfile) -> bool {
    job.preferred_courses.is_empty() || job.preferred_courses.contains(course)
}
