use crate::models::MatchResult;

/// Which side of the pair is being ranked, used for the tie-break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Job,
    Student,
}

impl RankBy {
    #[inline]
    fn key(self, result: &MatchResult) -> u64 {
        match self {
            RankBy::Job => result.job_id,
            RankBy::Student => result.student_id,
        }
    }
}

/// Apply the score threshold, order and truncate
///
/// Results are sorted by `final_score` descending, then by ascending id of the
/// ranked entity. The sort is stable, so equal ids keep their input order.
/// `None` for `min_score` keeps every result; `None` for `limit` keeps all.
pub fn rank_results(
    results: Vec<MatchResult>,
    min_score: Option<f64>,
    limit: Option<usize>,
    by: RankBy,
) -> Vec<MatchResult> {
    let mut ranked: Vec<MatchResult> = match min_score {
        Some(threshold) => results
            .into_iter()
            .filter(|r| r.final_score >= threshold)
            .collect(),
        None => results,
    };

    ranked.sort_by(|a, b| {
        b.final_score
            .total_cmp(&a.final_score)
            .then_with(|| by.key(a).cmp(&by.key(b)))
    });

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(student_id: u64, job_id: u64, final_score: f64) -> MatchResult {
        MatchResult {
            student_id,
            job_id,
            raw_score: final_score,
            max_possible_score: 100.0,
            final_score,
            gpa_match: true,
            semester_match: true,
            course_match: true,
            matched_subjects: vec![],
            missing_subjects: vec![],
            recommendation_reason: String::new(),
        }
    }

    #[test]
    fn test_sorted_descending_with_id_tie_break() {
        let results = vec![result(1, 30, 70.0), result(1, 10, 90.0), result(1, 20, 70.0)];
        let ranked = rank_results(results, None, None, RankBy::Job);

        let ids: Vec<u64> = ranked.iter().map(|r| r.job_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let results = vec![result(1, 1, 49.99), result(1, 2, 50.0), result(1, 3, 80.0)];
        let ranked = rank_results(results, Some(50.0), None, RankBy::Job);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.final_score >= 50.0));
    }

    #[test]
    fn test_limit_truncates() {
        let results = (0..20).map(|i| result(i, 1, i as f64)).collect();
        let ranked = rank_results(results, None, Some(5), RankBy::Student);

        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].student_id, 19);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_results(vec![], Some(10.0), Some(3), RankBy::Job).is_empty());
    }
}
