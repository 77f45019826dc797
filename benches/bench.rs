// Criterion benchmarks for Grade Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use grade_match::core::{aggregate, AnalyticsOptions, Matcher};
use grade_match::models::{JobProfile, StudentProfile, SubjectRequirement};
use std::collections::{BTreeMap, BTreeSet};

fn create_student(id: u64) -> StudentProfile {
    StudentProfile {
        id,
        gpa: 5.0 + (id % 50) as f64 / 10.0,
        course: if id % 3 == 0 { "Law" } else { "CS" }.to_string(),
        semester: 1 + (id % 10) as u32,
        grades: (0..20u64)
            .map(|subject| (subject, ((id + subject) % 11) as f64))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn create_job(id: u64) -> JobProfile {
    JobProfile {
        id,
        title: format!("Job {}", id),
        minimum_gpa: 6.0 + (id % 3) as f64,
        minimum_semester: Some(1 + (id % 8) as u32),
        preferred_courses: BTreeSet::from(["CS".to_string()]),
        job_type: None,
        requirements: (0..6u64)
            .map(|i| SubjectRequirement {
                subject_id: (id * 7 + i) % 25,
                minimum_grade: 6.0 + (i % 3) as f64,
                weight: 1.0 + i as f64 * 0.5,
                is_mandatory: i % 2 == 0,
            })
            .collect(),
    }
}

fn bench_single_score(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let student = create_student(42);
    let job = create_job(7);

    c.bench_function("score_pair", |b| {
        b.iter(|| matcher.score(black_box(&student), black_box(&job)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let student = create_student(1);

    let mut group = c.benchmark_group("ranking");

    for job_count in [10, 100, 1000, 5000].iter() {
        let jobs: Vec<JobProfile> = (0..*job_count).map(create_job).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_jobs_for_student", job_count),
            job_count,
            |b, _| {
                b.iter(|| {
                    matcher.rank_jobs_for_student(
                        black_box(&student),
                        black_box(&jobs),
                        black_box(Some(50.0)),
                        black_box(Some(20)),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_analytics(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let job = create_job(3);
    let students: Vec<StudentProfile> = (0..1000).map(create_student).collect();
    let results = matcher
        .rank_candidates_for_job(&job, &students, None, None)
        .unwrap_or_default();
    let options = AnalyticsOptions::default();

    c.bench_function("aggregate_1000_results", |b| {
        b.iter(|| aggregate(black_box(&results), None, &options));
    });
}

criterion_group!(
    benches,
    bench_single_score,
    bench_ranking,
    bench_analytics
);

criterion_main!(benches);
