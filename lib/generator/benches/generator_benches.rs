use criterion::{criterion_group, criterion_main, Criterion};
use gql_generator_core::{
    generate_documents, CrossReferencePolicy, DocumentGenerator, GeneratorConfig,
    IncludeAllFields, OperationKind, SchemaModel,
};
use std::hint::black_box;

fn load_schema(name: &str) -> SchemaModel {
    let path = format!("./fixture/tests/{}.graphql", name);
    let sdl =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("failed to open file {}", path));
    SchemaModel::parse(&sdl).expect("failed to build schema model")
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for name in ["users", "social", "search"] {
        let schema = load_schema(name);
        let config = GeneratorConfig::default();

        group.bench_function(format!("{}/all", name), |b| {
            b.iter(|| {
                generate_documents(black_box(&schema), black_box(&config), &IncludeAllFields)
                    .expect("invalid configuration")
            });
        });
    }

    let schema = load_schema("social");
    let config = GeneratorConfig {
        depth_limit: 8,
        cross_reference_policy: CrossReferencePolicy::AllowRepeats,
        ..Default::default()
    };
    let generator = DocumentGenerator::new(&schema, &config, &IncludeAllFields)
        .expect("invalid configuration");

    group.bench_function("social/allow_repeats", |b| {
        b.iter(|| {
            generator
                .generate(black_box(OperationKind::Query), black_box("user"))
                .expect("lookup failed")
        });
    });

    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
