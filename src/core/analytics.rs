use crate::models::{domain::round2, JobId, JobProfile, MatchResult, Student, SubjectCatalog, SubjectFact, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const UNCATEGORIZED: &str = "uncategorized";
const UNKNOWN_JOB_TYPE: &str = "unknown";

/// Knobs for `aggregate`
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsOptions {
    pub thresholds: Vec<f64>,
    pub qualified_threshold: f64,
    pub top_gaps: usize,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            thresholds: vec![50.0, 60.0, 80.0],
            qualified_threshold: 60.0,
            top_gaps: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCount {
    pub threshold: f64,
    pub above: usize,
    pub below: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    pub requirements: usize,
    pub matched: usize,
    /// Percentage of requirements in this category that were met
    pub match_rate: f64,
    /// Mean student grade over requirements where the student had a grade
    pub average_grade: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectGap {
    pub subject_id: SubjectId,
    pub label: String,
    pub missing_count: usize,
}

/// Summary of a set of match results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalytics {
    pub total: usize,
    pub average_score: f64,
    pub best_score: Option<f64>,
    pub worst_score: Option<f64>,
    pub qualified: usize,
    pub thresholds: Vec<ThresholdCount>,
    pub category_breakdown: Vec<CategoryPerformance>,
    pub most_frequent_gap: Option<SubjectGap>,
    pub common_gaps: Vec<SubjectGap>,
}

#[derive(Default)]
struct CategoryTally {
    requirements: usize,
    matched: usize,
    grade_sum: f64,
    graded: usize,
}

/// Summarize the score distribution and subject gaps across `results`
pub fn aggregate(
    results: &[MatchResult],
    catalog: Option<&SubjectCatalog>,
    options: &AnalyticsOptions,
) -> MatchAnalytics {
    let total = results.len();
    let scores = results.iter().map(|r| r.final_score);

    let average_score = if total > 0 {
        round2(scores.clone().sum::<f64>() / total as f64)
    } else {
        0.0
    };
    let best_score = scores.clone().max_by(|a, b| a.total_cmp(b));
    let worst_score = scores.min_by(|a, b| a.total_cmp(b));

    let thresholds = options
        .thresholds
        .iter()
        .map(|&threshold| {
            let above = results.iter().filter(|r| r.final_score >= threshold).count();
            ThresholdCount { threshold, above, below: total - above }
        })
        .collect();

    let qualified = results
        .iter()
        .filter(|r| r.final_score >= options.qualified_threshold)
        .count();

    let common_gaps = count_gaps(results, options.top_gaps);
    let most_frequent_gap = common_gaps.first().cloned();

    MatchAnalytics {
        total,
        average_score,
        best_score,
        worst_score,
        qualified,
        thresholds,
        category_breakdown: category_breakdown(results, catalog),
        most_frequent_gap,
        common_gaps,
    }
}

fn category_breakdown(results: &[MatchResult], catalog: Option<&SubjectCatalog>) -> Vec<CategoryPerformance> {
    let mut tallies: BTreeMap<String, CategoryTally> = BTreeMap::new();

    let mut record = |fact: &SubjectFact, matched: bool| {
        let category = catalog
            .and_then(|c| c.category(fact.subject_id))
            .unwrap_or(UNCATEGORIZED);
        let tally = tallies.entry(category.to_string()).or_default();
        tally.requirements += 1;
        if matched {
            tally.matched += 1;
        }
        if let Some(grade) = fact.student_grade {
            tally.grade_sum += grade;
            tally.graded += 1;
        }
    };

    for result in results {
        for fact in &result.matched_subjects {
            record(fact, true);
        }
        for fact in &result.missing_subjects {
            record(fact, false);
        }
    }

    tallies
        .into_iter()
        .map(|(category, t)| CategoryPerformance {
            category,
            requirements: t.requirements,
            matched: t.matched,
            match_rate: round2(t.matched as f64 / t.requirements as f64 * 100.0),
            average_grade: (t.graded > 0).then(|| round2(t.grade_sum / t.graded as f64)),
        })
        .collect()
}

/// Most frequently missing subjects, ties broken by ascending subject id
fn count_gaps(results: &[MatchResult], top: usize) -> Vec<SubjectGap> {
    let mut counts: BTreeMap<SubjectId, (usize, String)> = BTreeMap::new();

    for fact in results.iter().flat_map(|r| &r.missing_subjects) {
        counts
            .entry(fact.subject_id)
            .or_insert_with(|| (0, fact.label()))
            .0 += 1;
    }

    let mut gaps: Vec<SubjectGap> = counts
        .into_iter()
        .map(|(subject_id, (missing_count, label))| SubjectGap { subject_id, label, missing_count })
        .collect();

    // Stable sort keeps the ascending id order from the BTreeMap among equal counts
    gaps.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
    gaps.truncate(top);
    gaps
}

/// Average final score per job type across `results`
///
/// Results whose job is absent from `jobs` are skipped.
pub fn job_type_compatibility(results: &[MatchResult], jobs: &[JobProfile]) -> BTreeMap<String, f64> {
    let types: HashMap<JobId, &str> = jobs
        .iter()
        .map(|job| (job.id, job.job_type.as_deref().unwrap_or(UNKNOWN_JOB_TYPE)))
        .collect();

    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for result in results {
        if let Some(job_type) = types.get(&result.job_id) {
            let entry = sums.entry(job_type.to_string()).or_insert((0.0, 0));
            entry.0 += result.final_score;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(job_type, (sum, count))| (job_type, round2(sum / count as f64)))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDistribution {
    /// 9.0 and above
    pub excellent: usize,
    /// 7.0 to below 9.0
    pub good: usize,
    /// 5.0 to below 7.0
    pub average: usize,
    /// below 5.0
    pub below_average: usize,
}

/// Per-category view of a student's own grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPerformance {
    pub student_id: u64,
    pub gpa: f64,
    pub total_subjects: usize,
    pub category_averages: BTreeMap<String, f64>,
    pub best_category: Option<String>,
    pub grade_distribution: GradeDistribution,
}

/// Summarize a student's grade history by subject category
///
/// Only grades of categorized subjects contribute to `category_averages`.
pub fn academic_performance(student: &Student, catalog: &SubjectCatalog) -> AcademicPerformance {
    let mut by_category: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let mut distribution = GradeDistribution::default();

    for grade in &student.grades {
        if let Some(category) = catalog.category(grade.subject_id) {
            let entry = by_category.entry(category.to_string()).or_insert((0.0, 0));
            entry.0 += grade.value;
            entry.1 += 1;
        }

        match grade.value {
            v if v >= 9.0 => distribution.excellent += 1,
            v if v >= 7.0 => distribution.good += 1,
            v if v >= 5.0 => distribution.average += 1,
            _ => distribution.below_average += 1,
        }
    }

    let category_averages: BTreeMap<String, f64> = by_category
        .into_iter()
        .map(|(category, (sum, count))| (category, round2(sum / count as f64)))
        .collect();

    let mut best_category: Option<(&String, f64)> = None;
    for (category, &avg) in &category_averages {
        if best_category.map_or(true, |(_, best)| avg > best) {
            best_category = Some((category, avg));
        }
    }

    AcademicPerformance {
        student_id: student.id,
        gpa: student.gpa(),
        total_subjects: student.grades.len(),
        best_category: best_category.map(|(c, _)| c.clone()),
        category_averages,
        grade_distribution: distribution,
    }
}
