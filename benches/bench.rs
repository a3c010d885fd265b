// Criterion benchmarks for Campus Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use campus_match::core::{
    currency::fee_in_usd,
    filters::filter_schools,
    Recommender,
};
use campus_match::models::{FeeTier, FilterCriteria, RankingTier, RawNumber, School, StudentProfile};

const REGIONS: &[&str] = &["North America", "Europe", "Asia", "Oceania"];
const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "INR", "SGD"];
const TAGS: &[&str] = &["Finance", "Strategy", "Technology", "Marketing", "Operations"];

fn create_school(id: usize) -> School {
    School {
        id: id as u32,
        name: format!("School of Management {}", id),
        location: format!("City {}", id % 40),
        region: REGIONS[id % REGIONS.len()].to_string(),
        country: format!("Country {}", id % 12),
        duration: Some(if id % 3 == 0 { "2 years" } else { "12 months" }.to_string()),
        ranking: Some((id % 150 + 1) as u32),
        // Every seventh fee arrives as display text
        tuition_fee: Some(if id % 7 == 0 {
            RawNumber::Text(format!("{},000", 40 + id % 60))
        } else {
            RawNumber::Number(30_000.0 + (id % 90) as f64 * 1_000.0)
        }),
        currency: CURRENCIES[id % CURRENCIES.len()].to_string(),
        average_gmat: Some(RawNumber::Number(600.0 + (id % 16) as f64 * 10.0)),
        min_work_experience: Some(RawNumber::Number((id % 5) as f64)),
        specializations: vec![
            TAGS[id % TAGS.len()].to_string(),
            TAGS[(id + 2) % TAGS.len()].to_string(),
        ],
    }
}

fn create_profile() -> StudentProfile {
    StudentProfile {
        gmat_score: Some(RawNumber::Number(710.0)),
        experience_years: Some(RawNumber::Number(4.0)),
        preferred_location: Some("Europe".to_string()),
        budget: Some(FeeTier::Medium),
        career_goal: Some("Finance".to_string()),
    }
}

fn bench_fee_normalization(c: &mut Criterion) {
    let school = create_school(14);

    c.bench_function("fee_in_usd_text_fee", |b| {
        b.iter(|| fee_in_usd(black_box(&school)));
    });
}

fn bench_filtering(c: &mut Criterion) {
    let criteria = FilterCriteria {
        query: Some("finance".to_string()),
        region: Some("Europe".to_string()),
        ranking_tier: Some(RankingTier::Top100),
        fee_tier: Some(FeeTier::Medium),
        ..Default::default()
    };

    let mut group = c.benchmark_group("filtering");

    for school_count in [15, 100, 1000].iter() {
        let schools: Vec<School> = (0..*school_count).map(create_school).collect();

        group.bench_with_input(
            BenchmarkId::new("filter_schools", school_count),
            school_count,
            |b, _| {
                b.iter(|| filter_schools(black_box(&schools), black_box(&criteria)));
            },
        );
    }

    group.finish();
}

fn bench_recommendation(c: &mut Criterion) {
    let recommender = Recommender::with_default_policy();
    let profile = create_profile();

    let mut group = c.benchmark_group("recommendation");

    for school_count in [15, 100, 1000].iter() {
        let schools: Vec<School> = (0..*school_count).map(create_school).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", school_count),
            school_count,
            |b, _| {
                b.iter(|| recommender.recommend(black_box(&schools), black_box(&profile)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fee_normalization,
    bench_filtering,
    bench_recommendation
);

criterion_main!(benches);
