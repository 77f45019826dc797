use crate::error::MatchError;
use crate::models::{JobProfile, MatchPolicy, ScoringWeights, Student, StudentProfile, GRADE_SCALE_MAX};
use std::collections::HashSet;

/// Check a student's full grade history before it is projected
///
/// Every recorded grade feeds the GPA, so older terms are checked too.
/// A (subject, term) pair may appear only once.
pub fn validate_student_record(student: &Student, path: &str) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(student.grades.len());

    for (i, grade) in student.grades.iter().enumerate() {
        if !on_grade_scale(grade.value) {
            return Err(MatchError::invalid(
                format!("{}.grades[{}].value", path, i),
                format!("must be a number between 0 and {}", GRADE_SCALE_MAX),
            ));
        }
        if !seen.insert((grade.subject_id, grade.term.as_str())) {
            return Err(MatchError::invalid(
                format!("{}.grades[{}]", path, i),
                format!("duplicate grade for subject {} in term {}", grade.subject_id, grade.term),
            ));
        }
    }

    Ok(())
}

/// Check that a student projection can be scored
///
/// `path` prefixes the field names in the returned error, e.g. `students[2]`.
pub fn validate_student(student: &StudentProfile, path: &str) -> Result<(), MatchError> {
    if !on_grade_scale(student.gpa) {
        return Err(MatchError::invalid(
            format!("{}.gpa", path),
            format!("must be a number between 0 and {}", GRADE_SCALE_MAX),
        ));
    }

    if student.course.trim().is_empty() {
        return Err(MatchError::invalid(format!("{}.course", path), "must not be empty"));
    }

    for (subject_id, value) in &student.grades {
        if !on_grade_scale(*value) {
            return Err(MatchError::invalid(
                format!("{}.grades[{}]", path, subject_id),
                format!("must be a number between 0 and {}", GRADE_SCALE_MAX),
            ));
        }
    }

    Ok(())
}

/// Check that a job projection can be scored
pub fn validate_job(job: &JobProfile, path: &str) -> Result<(), MatchError> {
    if !job.minimum_gpa.is_finite() || job.minimum_gpa < 0.0 {
        return Err(MatchError::invalid(
            format!("{}.minimumGpa", path),
            "must be a non-negative number",
        ));
    }

    for (i, req) in job.requirements.iter().enumerate() {
        if !req.minimum_grade.is_finite() || req.minimum_grade < 0.0 {
            return Err(MatchError::invalid(
                format!("{}.requirements[{}].minimumGrade", path, i),
                "must be a non-negative number",
            ));
        }
        if !req.weight.is_finite() || req.weight <= 0.0 {
            return Err(MatchError::invalid(
                format!("{}.requirements[{}].weight", path, i),
                "must be greater than 0",
            ));
        }
    }

    Ok(())
}

/// Check a weighting policy before it is handed to the matcher
pub fn validate_weights(weights: &ScoringWeights) -> Result<(), MatchError> {
    let parts = [
        ("weights.subjects", weights.subjects),
        ("weights.gpa", weights.gpa),
        ("weights.course", weights.course),
        ("weights.semester", weights.semester),
    ];

    for (field, value) in parts {
        if !value.is_finite() || value < 0.0 {
            return Err(MatchError::invalid(field, "must be a non-negative number"));
        }
    }

    if weights.sum() <= 0.0 {
        return Err(MatchError::invalid("weights", "must have a positive sum"));
    }

    Ok(())
}

pub fn validate_policy(policy: &MatchPolicy) -> Result<(), MatchError> {
    if !policy.subject_ratio_cap.is_finite() || policy.subject_ratio_cap < 1.0 {
        return Err(MatchError::invalid(
            "policy.subjectRatioCap",
            "must be a number of at least 1.0",
        ));
    }
    Ok(())
}

#[inline]
fn on_grade_scale(value: f64) -> bool {
    value.is_finite() && (0.0..=GRADE_SCALE_MAX).contains(&value)
}
