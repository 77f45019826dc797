use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type StudentId = u64;
pub type JobId = u64;
pub type SubjectId = u64;

/// Upper bound of the grade scale used for grades and GPA
pub const GRADE_SCALE_MAX: f64 = 10.0;

/// Academic subject referenced by grades and job requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Subjects indexed by id
#[derive(Debug, Clone, Default)]
pub struct SubjectCatalog {
    subjects: HashMap<SubjectId, Subject>,
}

impl SubjectCatalog {
    pub fn new(subjects: impl IntoIterator<Item = Subject>) -> Self {
        Self {
            subjects: subjects.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn get(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.get(&id)
    }

    /// Category of a subject, if the subject is known and categorized
    pub fn category(&self, id: SubjectId) -> Option<&str> {
        self.get(id).and_then(|s| s.category.as_deref())
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// A student's grade for one subject in one term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    #[serde(rename = "subjectId")]
    pub subject_id: SubjectId,
    pub value: f64,
    /// Term label such as "2024.1"; later terms sort higher
    pub term: String,
}

/// Student record owning the full grade history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    pub course: String,
    pub semester: u32,
    #[serde(default)]
    pub grades: Vec<Grade>,
}

impl Student {
    /// Add a grade, replacing any existing grade for the same subject and term
    pub fn add_grade(&mut self, grade: Grade) {
        match self
            .grades
            .iter_mut()
            .find(|g| g.subject_id == grade.subject_id && g.term == grade.term)
        {
            Some(existing) => existing.value = grade.value,
            None => self.grades.push(grade),
        }
    }

    /// Mean of every recorded grade, rounded to two decimals
    pub fn gpa(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let total: f64 = self.grades.iter().map(|g| g.value).sum();
        round2(total / self.grades.len() as f64)
    }

    /// Matching projection: GPA over all grades, latest-term grade per subject
    pub fn profile(&self) -> StudentProfile {
        let mut latest: BTreeMap<SubjectId, &Grade> = BTreeMap::new();
        for grade in &self.grades {
            let newer = latest
                .get(&grade.subject_id)
                .map_or(true, |current| grade.term > current.term);
            if newer {
                latest.insert(grade.subject_id, grade);
            }
        }

        StudentProfile {
            id: self.id,
            gpa: self.gpa(),
            course: self.course.clone(),
            semester: self.semester,
            grades: latest.into_iter().map(|(id, g)| (id, g.value)).collect(),
        }
    }
}

/// Matching-relevant projection of a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: StudentId,
    pub gpa: f64,
    pub course: String,
    pub semester: u32,
    pub grades: BTreeMap<SubjectId, f64>,
}

/// Per-subject grade requirement declared by a job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectRequirement {
    #[serde(rename = "subjectId")]
    pub subject_id: SubjectId,
    #[serde(rename = "minimumGrade")]
    pub minimum_grade: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(rename = "isMandatory", default)]
    pub is_mandatory: bool,
}

fn default_weight() -> f64 { 1.0 }

/// Matching-relevant projection of a job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "minimumGpa", default)]
    pub minimum_gpa: f64,
    #[serde(rename = "minimumSemester", default)]
    pub minimum_semester: Option<u32>,
    /// Empty means no course restriction
    #[serde(rename = "preferredCourses", default)]
    pub preferred_courses: BTreeSet<String>,
    /// Free-form kind of position, e.g. "internship"
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub requirements: Vec<SubjectRequirement>,
}

/// Outcome of evaluating one requirement against a student's grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectFact {
    #[serde(rename = "subjectId")]
    pub subject_id: SubjectId,
    #[serde(rename = "subjectCode", skip_serializing_if = "Option::is_none", default)]
    pub subject_code: Option<String>,
    #[serde(rename = "subjectName", skip_serializing_if = "Option::is_none", default)]
    pub subject_name: Option<String>,
    #[serde(rename = "requiredGrade")]
    pub required_grade: f64,
    pub weight: f64,
    #[serde(rename = "isMandatory")]
    pub is_mandatory: bool,
    #[serde(rename = "studentGrade")]
    pub student_grade: Option<f64>,
    /// Student grade minus required grade, present only when the student has a grade
    #[serde(rename = "gradeExcess")]
    pub grade_excess: Option<f64>,
}

impl SubjectFact {
    /// Short label used in explanations: code, then name, then `#id`
    pub fn label(&self) -> String {
        self.subject_code
            .clone()
            .or_else(|| self.subject_name.clone())
            .unwrap_or_else(|| format!("#{}", self.subject_id))
    }
}

/// Scored, explained pairing of one student with one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "studentId")]
    pub student_id: StudentId,
    #[serde(rename = "jobId")]
    pub job_id: JobId,
    #[serde(rename = "rawScore")]
    pub raw_score: f64,
    #[serde(rename = "maxPossibleScore")]
    pub max_possible_score: f64,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
    #[serde(rename = "gpaMatch")]
    pub gpa_match: bool,
    #[serde(rename = "semesterMatch")]
    pub semester_match: bool,
    #[serde(rename = "courseMatch")]
    pub course_match: bool,
    #[serde(rename = "matchedSubjects")]
    pub matched_subjects: Vec<SubjectFact>,
    #[serde(rename = "missingSubjects")]
    pub missing_subjects: Vec<SubjectFact>,
    #[serde(rename = "recommendationReason")]
    pub recommendation_reason: String,
}

/// Weighting policy for the four sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub subjects: f64,
    pub gpa: f64,
    pub course: f64,
    pub semester: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.subjects + self.gpa + self.course + self.semester
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            subjects: 0.55,
            gpa: 0.20,
            course: 0.15,
            semester: 0.10,
        }
    }
}

/// Subject evaluation policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Upper bound for `student_grade / required_grade` on a single matched subject.
    /// Values above 1.0 let over-performance offset gaps elsewhere.
    pub subject_ratio_cap: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self { subject_ratio_cap: 1.0 }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(subject_id: SubjectId, value: f64, term: &str) -> Grade {
        Grade { subject_id, value, term: term.to_string() }
    }

    fn student() -> Student {
        Student {
            id: 1,
            full_name: "Ana Souza".to_string(),
            course: "CS".to_string(),
            semester: 5,
            grades: vec![],
        }
    }

    #[test]
    fn test_gpa_recomputed_on_add() {
        let mut s = student();
        assert_eq!(s.gpa(), 0.0);

        s.add_grade(grade(1, 8.0, "2024.1"));
        s.add_grade(grade(2, 7.0, "2024.1"));
        assert_eq!(s.gpa(), 7.5);

        // Same subject and term replaces
        s.add_grade(grade(2, 9.0, "2024.1"));
        assert_eq!(s.grades.len(), 2);
        assert_eq!(s.gpa(), 8.5);
    }

    #[test]
    fn test_profile_uses_latest_term() {
        let mut s = student();
        s.add_grade(grade(1, 5.0, "2023.2"));
        s.add_grade(grade(1, 8.0, "2024.1"));
        s.add_grade(grade(2, 6.0, "2024.1"));

        let profile = s.profile();
        assert_eq!(profile.grades.len(), 2);
        assert_eq!(profile.grades[&1], 8.0);
        // GPA still covers every term
        assert_eq!(profile.gpa, 6.33);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoringWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fact_label_fallbacks() {
        let mut fact = SubjectFact {
            subject_id: 7,
            subject_code: None,
            subject_name: Some("Databases".to_string()),
            required_grade: 7.0,
            weight: 1.0,
            is_mandatory: true,
            student_grade: None,
            grade_excess: None,
        };
        assert_eq!(fact.label(), "Databases");
        fact.subject_name = None;
        assert_eq!(fact.label(), "#7");
        fact.subject_code = Some("CS202".to_string());
        assert_eq!(fact.label(), "CS202");
    }
}
