// Criterion benchmarks for Care Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use care_match::core::{score, Ranker};
use care_match::models::{GenderPreference, Modality, PatientProfile, ProviderProfile};

const SPECIALTIES: &[&str] = &["Depression", "Anxiety", "Trauma", "Grief", "Bipolar disorder"];
const CARRIERS: &[&str] = &["Aetna", "Cigna", "United", "Kaiser"];
const CITIES: &[&str] = &["Boston", "Denver", "Austin"];

fn create_provider(id: usize) -> ProviderProfile {
    ProviderProfile {
        id: format!("dr_{}", id),
        name: None,
        specialties: vec![
            SPECIALTIES[id % SPECIALTIES.len()].to_string(),
            SPECIALTIES[(id + 2) % SPECIALTIES.len()].to_string(),
        ],
        insurance_accepted: vec![CARRIERS[id % CARRIERS.len()].to_string()],
        location: Some(CITIES[id % CITIES.len()].to_string()),
        virtual_available: id % 2 == 0,
        in_person_available: id % 3 != 0,
        gender: Some(if id % 2 == 0 { "female" } else { "male" }.to_string()),
        capacity: (id % 5) as i64,
    }
}

fn create_patient(id: usize) -> PatientProfile {
    PatientProfile {
        id: format!("patient_{}", id),
        diagnosis: Some(SPECIALTIES[id % SPECIALTIES.len()].to_string()),
        insurance: Some(CARRIERS[id % CARRIERS.len()].to_string()),
        location: Some(CITIES[id % CITIES.len()].to_string()),
        preferred_modality: Modality::Either,
        preferred_gender: if id % 4 == 0 { GenderPreference::Female } else { GenderPreference::NoPreference },
        urgency: (id % 5) as i64,
        eligible: Some(id % 7 != 0),
        join_sequence: Some(id as i64),
    }
}

fn bench_score(c: &mut Criterion) {
    let provider = create_provider(1);
    let patient = create_patient(1);

    c.bench_function("score", |b| {
        b.iter(|| score(black_box(&provider), black_box(&patient), None));
    });
}

fn bench_rank_providers(c: &mut Criterion) {
    let ranker = Ranker::with_default_weights();
    let patient = create_patient(3);

    let mut group = c.benchmark_group("rank_providers");

    for count in [10, 50, 100, 500, 1000].iter() {
        let providers: Vec<ProviderProfile> = (0..*count).map(create_provider).collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| ranker.rank_providers(black_box(&patient), black_box(&providers)));
        });
    }

    group.finish();
}

fn bench_rank_waitlist(c: &mut Criterion) {
    let ranker = Ranker::with_default_weights();
    let provider = create_provider(2);

    let mut group = c.benchmark_group("rank_waitlist");

    for count in [10, 100, 1000].iter() {
        let patients: Vec<PatientProfile> = (0..*count).map(create_patient).collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| ranker.rank_waitlist(black_box(&patients), black_box(&provider)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score, bench_rank_providers, bench_rank_waitlist);

criterion_main!(benches);
