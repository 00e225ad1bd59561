use criterion::{criterion_group, criterion_main, Criterion};
use std::fmt::Write;
use std::hint::black_box;
use yamlink::Mapping;

fn example_mapping() -> String {
    let mut doc = String::from(
        r#"example: https://www.example.com
docs:
  rust: https://doc.rust-lang.org
  mirrors:
    - https://mirror-a.example.com
    - https://mirror-b.example.com
    - https://mirror-c.example.com
teams:
  platform:
    oncall:
      primary: https://pager.example.com/platform/primary
      secondary: https://pager.example.com/platform/secondary
"#,
    );
    // A wide top level, like a company-wide link shortener.
    for i in 0..500 {
        writeln!(doc, "link{i}: https://links.example.com/{i}").unwrap();
    }
    doc
}

fn bench_lookup(c: &mut Criterion) {
    let mapping = Mapping::parse(&example_mapping()).expect("failed to parse mapping");
    c.bench_function("mapping_resolve", |b| {
        let test_paths = [
            "/example",
            "/docs/rust",
            "/docs/mirrors/2",
            "/teams/platform/oncall/secondary",
            "/link499",
            "/does/not/exist",
        ];
        b.iter(|| {
            for path in test_paths.iter() {
                let res = mapping.resolve(path);
                black_box(&res);
            }
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let doc = example_mapping();
    c.bench_function("mapping_parse", |b| {
        b.iter(|| black_box(Mapping::parse(black_box(&doc)).is_ok()))
    });
}

criterion_group!(benches, bench_lookup, bench_parse);
criterion_main!(benches);
