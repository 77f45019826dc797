use crate::models::{MatchPolicy, SubjectCatalog, SubjectFact, SubjectId, SubjectRequirement};
use std::collections::BTreeMap;

/// Subject-level outcome for one student against one job's requirements
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementEvaluation {
    pub matched: Vec<SubjectFact>,
    pub missing: Vec<SubjectFact>,
    /// Sum of `weight * min(grade / required, cap)` over matched requirements
    pub achieved: f64,
    /// Sum of weights over all requirements
    pub maximum: f64,
    pub mandatory_total: usize,
    pub mandatory_met: usize,
}

impl RequirementEvaluation {
    /// Normalized subject sub-score in [0, 1]
    ///
    /// A job without requirements has nothing to fail and scores 1.0.
    pub fn sub_score(&self) -> f64 {
        if self.maximum <= 0.0 {
            return 1.0;
        }
        (self.achieved / self.maximum).clamp(0.0, 1.0)
    }

    /// False when any mandatory requirement is missing
    pub fn mandatory_satisfied(&self) -> bool {
        self.mandatory_met == self.mandatory_total
    }

    pub fn mandatory_missing(&self) -> impl Iterator<Item = &SubjectFact> {
        self.missing.iter().filter(|f| f.is_mandatory)
    }
}

/// Classify each requirement as matched or missing and accumulate the weighted score
///
/// A requirement is matched when the student has a grade for the subject that is at
/// least the required minimum. Missing mandatory requirements do not zero the score;
/// they only lower `mandatory_met`.
pub fn evaluate_requirements(
    grades: &BTreeMap<SubjectId, f64>,
    requirements: &[SubjectRequirement],
    policy: &MatchPolicy,
    catalog: Option<&SubjectCatalog>,
) -> RequirementEvaluation {
    let mut evaluation = RequirementEvaluation {
        matched: Vec::new(),
        missing: Vec::new(),
        achieved: 0.0,
        maximum: 0.0,
        mandatory_total: 0,
        mandatory_met: 0,
    };

    for req in requirements {
        evaluation.maximum += req.weight;
        if req.is_mandatory {
            evaluation.mandatory_total += 1;
        }

        let student_grade = grades.get(&req.subject_id).copied();
        let fact = build_fact(req, student_grade, catalog);

        match student_grade {
            Some(grade) if grade >= req.minimum_grade => {
                evaluation.achieved += req.weight * grade_ratio(grade, req.minimum_grade, policy);
                if req.is_mandatory {
                    evaluation.mandatory_met += 1;
                }
                evaluation.matched.push(fact);
            }
            _ => evaluation.missing.push(fact),
        }
    }

    evaluation
}

/// Ratio of achieved to required grade, bounded by the policy cap
///
/// A non-positive requirement has no meaningful ratio and earns full credit.
#[inline]
fn grade_ratio(grade: f64, required: f64, policy: &MatchPolicy) -> f64 {
    let ratio = if required > 0.0 { grade / required } else { 1.0 };
    ratio.min(policy.subject_ratio_cap)
}

fn build_fact(
    req: &SubjectRequirement,
    student_grade: Option<f64>,
    catalog: Option<&SubjectCatalog>,
) -> SubjectFact {
    let subject = catalog.and_then(|c| c.get(req.subject_id));

    SubjectFact {
        subject_id: req.subject_id,
        subject_code: subject.map(|s| s.code.clone()),
        subject_name: subject.map(|s| s.name.clone()),
        required_grade: req.minimum_grade,
        weight: req.weight,
        is_mandatory: req.is_mandatory,
        student_grade,
        grade_excess: student_grade.map(|g| g - req.minimum_grade),
    }
}
