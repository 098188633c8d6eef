// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fetch_interceptor::network::{get_url_pattern_regex, UrlPattern};

fn pattern_compile_benchmark(c: &mut Criterion) {
    let patterns = vec![
        "*",
        "*://example.com/*",
        "https://cdn.example.com/assets/*.js?v=*",
        "*/api/v?/users/*",
    ];

    c.bench_function("glob_to_regex", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(get_url_pattern_regex(pattern));
            }
        })
    });

    c.bench_function("compile_pattern", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(UrlPattern::compile(pattern).is_ok());
            }
        })
    });
}

fn pattern_match_benchmark(c: &mut Criterion) {
    let urls = vec![
        "https://example.com/",
        "https://example.com/static/app.3f2a1c.js",
        "https://cdn.example.com/assets/vendor.js?v=12",
        "https://api.example.org/api/v2/users/42?expand=roles",
    ];

    let Ok(pattern) = UrlPattern::compile("*://*example.*/*") else {
        return;
    };

    c.bench_function("match_urls", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(pattern.is_match(url));
            }
        })
    });
}

criterion_group!(benches, pattern_compile_benchmark, pattern_match_benchmark);
criterion_main!(benches);
