use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fp_core::{BodyStrength, FourPillarsChart, Pillar, daily_fortune, score_pair};

fn chart(year: &str, month: &str, day: &str, hour: &str) -> FourPillarsChart {
    FourPillarsChart::new(
        year.parse::<Pillar>().unwrap(),
        month.parse::<Pillar>().unwrap(),
        day.parse::<Pillar>().unwrap(),
        hour.parse::<Pillar>().unwrap(),
    )
}

fn bench_score_pair(c: &mut Criterion) {
    let a = chart("jia-zi", "bing-yin", "wu-wu", "geng-shen");
    let b = chart("yi-chou", "ding-mao", "ji-wei", "xin-you");

    c.bench_function("score_pair", |bencher| {
        bencher.iter(|| {
            score_pair(
                black_box(&a),
                BodyStrength::Strong,
                black_box(&b),
                BodyStrength::Weak,
            )
        })
    });
}

fn bench_daily_fortune(c: &mut Criterion) {
    let day: Pillar = "ren-zi".parse().unwrap();

    c.bench_function("daily_fortune", |bencher| {
        bencher.iter(|| daily_fortune(black_box(fp_core::Element::Wood), black_box(day)))
    });
}

criterion_group!(benches, bench_score_pair, bench_daily_fortune);
criterion_main!(benches);
