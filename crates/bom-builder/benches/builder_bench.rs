//! BOM 빌더 벤치마크
//!
//! 디스크립터 파싱, BOM 조립, 직렬화 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mkbom_builder::types::{BomIdentity, Coordinate};
use mkbom_builder::{aggregate, parse_descriptor, render};

/// 직접 선언된 좌표를 가진 디스크립터
const DIRECT_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>example-core</artifactId>
  <version>2.3.1</version>
  <packaging>jar</packaging>
  <dependencies>
    <dependency>
      <groupId>org.slf4j</groupId>
      <artifactId>slf4j-api</artifactId>
      <version>1.7.36</version>
    </dependency>
  </dependencies>
</project>
"#;

/// parent에서 groupId/version을 상속하는 디스크립터
const INHERITED_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.example</groupId>
    <artifactId>example-parent</artifactId>
    <version>2.3.1</version>
  </parent>
  <artifactId>example-web</artifactId>
</project>
"#;

fn identity() -> BomIdentity {
    BomIdentity {
        coordinate: Coordinate::new("com.example", "example-bom", "1.0"),
        name: Some("Bill of Materials".to_owned()),
    }
}

fn generate_records(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            Coordinate::new(
                format!("com.example.group{}", i % 10),
                format!("artifact-{i}"),
                format!("1.{i}.0-redhat-1"),
            )
        })
        .collect()
}

fn bench_descriptor_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("descriptor_parsing");
    group.throughput(Throughput::Elements(1));

    group.bench_function("direct_fields", |b| {
        b.iter(|| {
            parse_descriptor(black_box(DIRECT_DESCRIPTOR), "direct.pom", Some("redhat-1")).unwrap()
        })
    });

    group.bench_function("parent_fallback", |b| {
        b.iter(|| {
            parse_descriptor(
                black_box(INHERITED_DESCRIPTOR),
                "inherited.pom",
                Some("redhat-1"),
            )
            .unwrap()
        })
    });

    group.finish();
}

fn bench_aggregate_scaling(c: &mut Criterion) {
    let identity = identity();
    let mut group = c.benchmark_group("aggregate_scaling");

    for size in [10, 100, 1000].iter() {
        let records = generate_records(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| aggregate(black_box(&identity), black_box(&records)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let doc = aggregate(&identity(), &generate_records(1000));

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("render_1000_dependencies", |b| {
        b.iter(|| render(black_box(&doc)).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_descriptor_parsing,
    bench_aggregate_scaling,
    bench_render
);
criterion_main!(benches);
