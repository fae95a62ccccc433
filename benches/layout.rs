// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rapidseq::app::render_text;
use rapidseq::format::build_instructions;
use rapidseq::layout::{compute_layout, LayoutConfig, MonospaceMeasure};
use rapidseq::render::RenderConfig;

// Benchmark identity (keep stable):
// - Group names: `format.build_instructions`, `layout.compute_layout`, `pipeline.render_text`
// - Case IDs after the `/` stay stable so results remain comparable across refactors.

#[derive(Debug, Clone, Copy)]
enum Case {
    Small,
    ManyActors,
    LongLabels,
}

impl Case {
    fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::ManyActors => "many_actors",
            Self::LongLabels => "long_labels",
        }
    }

    fn source(self) -> String {
        match self {
            Self::Small => "A -> B: hi\nA <- B: ok\nB => C: go\n/C -> A: done".to_owned(),
            Self::ManyActors => (0..200)
                .map(|idx| format!("P{} -> P{}: msg {idx}", idx % 40, (idx * 7 + 3) % 40))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::LongLabels => (0..120)
                .map(|idx| {
                    format!(
                        "Svc{} <= Svc{}: {}",
                        idx % 8,
                        (idx + 1) % 8,
                        "payload field ".repeat(1 + idx % 6)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

const CASES: [Case; 3] = [Case::Small, Case::ManyActors, Case::LongLabels];

fn benches_layout(c: &mut Criterion) {
    let config = LayoutConfig::terminal(400);
    let render = RenderConfig::default();

    {
        let mut group = c.benchmark_group("format.build_instructions");
        for case in CASES {
            let text = case.source();
            group.throughput(Throughput::Elements(text.lines().count() as u64));
            group.bench_function(case.id(), |b| {
                b.iter(|| black_box(build_instructions(black_box(&text)).expect("parse")))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.compute_layout");
        for case in CASES {
            let parsed = build_instructions(&case.source()).expect("parse");
            group.throughput(Throughput::Elements(parsed.instructions().len() as u64));
            group.bench_function(case.id(), |b| {
                b.iter_batched(
                    || parsed.clone(),
                    |mut diagram| {
                        black_box(
                            compute_layout(&mut diagram, &MonospaceMeasure, &config)
                                .expect("layout"),
                        )
                    },
                    BatchSize::SmallInput,
                )
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline.render_text");
        for case in CASES {
            let text = case.source();
            group.bench_function(case.id(), |b| {
                b.iter(|| {
                    black_box(
                        render_text(
                            black_box(&text),
                            &render.measure(),
                            &config,
                            &render,
                        )
                        .expect("render"),
                    )
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, benches_layout);
criterion_main!(benches);
