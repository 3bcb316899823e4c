// Criterion benchmarks for Jeju Guide

use chrono::NaiveTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jeju_guide::catalog::Catalog;
use jeju_guide::core::{distance::geodesic_distance_km, Ranker};
use jeju_guide::models::{Place, RankingRequest, TimeWindow};

const CATEGORIES: [&str; 3] = ["attractions", "accommodations", "foods"];

fn create_place(id: usize, lat: f64, lon: f64) -> Place {
    Place {
        id,
        category: CATEGORIES[id % 3].to_string(),
        name: format!("Place {}", id),
        score: 4.0 + (id % 60) as f64 / 10.0,
        reviews: id as u32,
        information: String::new(),
        images: vec![],
        open_time: if id % 4 == 0 { Some("09:00".to_string()) } else { None },
        close_time: if id % 4 == 0 { Some("21:00".to_string()) } else { None },
        price: String::new(),
        latitude: lat,
        longitude: lon,
        gender_affinity: if id % 2 == 0 { "both" } else { "female" }.to_string(),
        weather_tags: if id % 5 == 0 { vec!["clear".to_string()] } else { vec!["all".to_string()] },
        recommended_windows: vec![TimeWindow::new("11:30", "13:30"), TimeWindow::new("18:00", "20:00")],
        menu: None,
    }
}

fn create_catalog(size: usize) -> Catalog {
    Catalog::new(
        (0..size)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.3;
                let lon_offset = (i as f64 * 0.0017) % 0.6;
                create_place(i + 1, 33.25 + lat_offset, 126.2 + lon_offset)
            })
            .collect(),
    )
}

fn bench_geodesic_distance(c: &mut Criterion) {
    c.bench_function("geodesic_distance", |b| {
        b.iter(|| {
            geodesic_distance_km(
                black_box(33.4996),
                black_box(126.5312),
                black_box(33.2541),
                black_box(126.5600),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = Ranker::with_default_weights();
    let request = RankingRequest::at(
        "foods",
        33.4996,
        126.5312,
        "female",
        "rain",
        NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
    );

    let mut group = c.benchmark_group("ranking");

    for size in [10, 100, 1000, 5000].iter() {
        let catalog = create_catalog(*size);

        group.bench_with_input(BenchmarkId::new("rank", size), size, |b, _| {
            b.iter(|| ranker.rank(black_box(&catalog), black_box(&request)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_geodesic_distance, bench_ranking);

criterion_main!(benches);
