// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

use criterion::{criterion_group, criterion_main, Criterion};

use planmodel::compliance::run_compliance_check;
use planmodel::{generate_plans, DesignBrief};

fn pipeline_benchmark(c: &mut Criterion) {
    let brief = DesignBrief::from_json(include_str!("../tests/data/brief_prd.json")).unwrap();

    c.bench_function("Full pipeline on the PRD brief", |b| {
        b.iter(|| generate_plans(&brief))
    });

    let result = generate_plans(&brief);
    let plan = &result.best().unwrap().plan;
    c.bench_function("Compliance run on the best plan", |b| {
        b.iter(|| run_compliance_check(plan, "irc-base", None).unwrap())
    });
}

// Benchmark configuration
criterion_group! {
    name = benches;
    // https://docs.rs/criterion/0.3.4/criterion/struct.Criterion.html
    config = Criterion::default().sample_size(10);
    targets = pipeline_benchmark
}

// Generate a main function running the benchmarks in the group
criterion_main!(benches);
