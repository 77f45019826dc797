use crate::core::requirements::RequirementEvaluation;
use crate::core::scoring::SubScores;
use crate::models::{JobProfile, StudentProfile};

/// Build the advisory explanation for a match
///
/// Clauses are joined with "; ". The text is for humans only and carries no
/// information that is not already present in the structured result.
pub fn generate_reason(
    student: &StudentProfile,
    job: &JobProfile,
    scores: &SubScores,
    evaluation: &RequirementEvaluation,
) -> String {
    let mut reasons = Vec::with_capacity(5);

    reasons.push(gpa_clause(student.gpa, job.minimum_gpa));

    if !job.preferred_courses.is_empty() {
        if scores.course_match {
            reasons.push(format!("course {} matches preferred courses", student.course));
        } else {
            reasons.push(format!("course {} does not match preferred courses", student.course));
        }
    }

    if let Some(minimum) = job.minimum_semester.filter(|m| *m > 0) {
        let relation = if scores.semester_match { "meets" } else { "below" };
        reasons.push(format!("semester {} {} minimum {}", student.semester, relation, minimum));
    }

    reasons.push(mandatory_clause(evaluation.mandatory_met, evaluation.mandatory_total));

    let missing: Vec<String> = evaluation.mandatory_missing().map(|f| f.label()).collect();
    if !missing.is_empty() {
        reasons.push(format!("missing required: {}", missing.join(", ")));
    }

    reasons.join("; ")
}

fn gpa_clause(gpa: f64, minimum: f64) -> String {
    let relation = if gpa > minimum {
        "exceeds"
    } else if gpa == minimum {
        "meets"
    } else {
        "below"
    };
    format!("GPA {:.2} {} minimum {:.2}", gpa, relation, minimum)
}

fn mandatory_clause(met: usize, total: usize) -> String {
    if total == 0 {
        return "no required subjects".to_string();
    }
    let percentage = met as f64 / total as f64 * 100.0;
    format!("{}/{} required subjects met ({:.0}%)", met, total, percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::requirements::evaluate_requirements;
    use crate::core::scoring::calculate_sub_scores;
    use crate::models::{MatchPolicy, SubjectRequirement};
    use std::collections::{BTreeMap, BTreeSet};

    fn explain(student: &StudentProfile, job: &JobProfile) -> String {
        let evaluation = evaluate_requirements(&student.grades, &job.requirements, &MatchPolicy::default(), None);
        let scores = calculate_sub_scores(student, job, &evaluation);
        generate_reason(student, job, &scores, &evaluation)
    }

    fn student(gpa: f64, grades: &[(u64, f64)]) -> StudentProfile {
        StudentProfile {
            id: 1,
            gpa,
            course: "CS".to_string(),
            semester: 5,
            grades: grades.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn job(preferred: &[&str], requirements: Vec<SubjectRequirement>) -> JobProfile {
        JobProfile {
            id: 9,
            title: "Web Developer Intern".to_string(),
            minimum_gpa: 7.0,
            minimum_semester: None,
            preferred_courses: preferred.iter().map(|c| c.to_string()).collect::<BTreeSet<_>>(),
            job_type: None,
            requirements,
        }
    }

    fn requirement(subject_id: u64, is_mandatory: bool) -> SubjectRequirement {
        SubjectRequirement { subject_id, minimum_grade: 7.0, weight: 1.0, is_mandatory }
    }

    #[test]
    fn test_full_reason() {
        let reason = explain(&student(8.9, &[(1, 9.0)]), &job(&["CS"], vec![requirement(1, true)]));
        assert_eq!(
            reason,
            "GPA 8.90 exceeds minimum 7.00; course CS matches preferred courses; 1/1 required subjects met (100%)"
        );
    }

    #[test]
    fn test_course_clause_omitted_without_preference() {
        let reason = explain(&student(7.0, &[]), &job(&[], vec![]));
        assert_eq!(reason, "GPA 7.00 meets minimum 7.00; no required subjects");
    }

    #[test]
    fn test_missing_mandatory_is_surfaced() {
        let reason = explain(
            &student(6.0, &[(2, 8.0)]),
            &job(&["Law"], vec![requirement(1, true), requirement(2, true), requirement(3, false)]),
        );
        assert!(reason.starts_with("GPA 6.00 below minimum 7.00"));
        assert!(reason.contains("course CS does not match preferred courses"));
        assert!(reason.contains("1/2 required subjects met (50%)"));
        assert!(reason.ends_with("missing required: #1"));
    }

    #[test]
    fn test_near_miss_gpa_keeps_distinct_values() {
        let reason = explain(&student(6.96, &[]), &job(&[], vec![]));
        assert!(reason.starts_with("GPA 6.96 below minimum 7.00"));
    }

    #[test]
    fn test_only_mandatory_requirements_are_counted() {
        let reason = explain(&student(8.0, &[]), &job(&[], vec![requirement(1, true), requirement(2, false)]));
        assert!(reason.contains("0/1 required subjects met (0%)"));
    }

    #[test]
    fn test_semester_clause() {
        let mut j = job(&[], vec![]);
        j.minimum_semester = Some(6);
        let reason = explain(&student(8.0, &[]), &j);
        assert!(reason.contains("semester 5 below minimum 6"));
    }
}
