use criterion::{criterion_group, criterion_main, Criterion};
use gridcaptcha::ReturnMode;

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_6x6_noise3_direct", |b| {
        b.iter(|| gridcaptcha::generate_captcha(6, 3, ReturnMode::Direct).unwrap())
    });

    c.bench_function("generate_6x6_noise3_transport", |b| {
        b.iter(|| gridcaptcha::generate_captcha(6, 3, ReturnMode::Transport).unwrap())
    });

    c.bench_function("generate_32x32_noise5_transport", |b| {
        b.iter(|| gridcaptcha::generate_captcha(32, 5, ReturnMode::Transport).unwrap())
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
