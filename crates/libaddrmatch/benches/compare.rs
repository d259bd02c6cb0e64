use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use libaddrmatch::prelude::*;

fn compare_rules(c: &mut Criterion) {
  let matcher = Matcher::<DictionaryLemmatizer, RuleExtractor>::default();

  c.bench_function("compare_rules", |b| b.iter(|| black_box(matcher.compare("г. Москва, ул. Ленина, д. 5", "город Москва, улица Ленина, дом 5"))));
}

fn compare_segments(c: &mut Criterion) {
  let matcher = Matcher::new(Normalizer::new(DictionaryLemmatizer::default(), Unavailable).build());

  c.bench_function("compare_segments", |b| b.iter(|| black_box(matcher.compare("Москва, Ленина, 12 к. 3", "Москва, Ленина, 12к3"))));
}

fn compare_batch(c: &mut Criterion) {
  let matcher = Matcher::<DictionaryLemmatizer, RuleExtractor>::default();
  let pairs = std::iter::repeat(("г. Москва, ул. Ленина, д. 5", "Москва, Ленина, 7")).take(100).collect::<Vec<_>>();

  c.bench_function("compare_batch", |b| b.iter(|| black_box(matcher.compare_batch(&pairs))));
}

criterion_group!(benches, compare_rules, compare_segments, compare_batch);
criterion_main!(benches);
