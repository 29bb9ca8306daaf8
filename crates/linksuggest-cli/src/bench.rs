//! linksuggest Benchmark Binary
//!
//! Measures index builds and suggestion cycles at different corpus sizes
//! (100, 1,000, 10,000 documents).
//! Run with: `cargo run --bin linksuggest-bench --release`

use std::time::Instant;

use linksuggest_core::SuggestConfig;
use linksuggest_engine::{reconcile, Extractor};
use linksuggest_index::{CorpusDocument, CorpusSnapshot, IndexBuilder, NameIndex};

// ---------------------------------------------------------------------------
// Synthetic data generation
// ---------------------------------------------------------------------------

const TOPICS: &[&str] = &[
    "architecture",
    "performance",
    "scalability",
    "deployment",
    "review",
    "sprint",
    "migration",
    "security",
    "testing",
    "pipeline",
    "design",
    "budget",
    "roadmap",
    "incident",
    "launch",
    "integration",
    "database",
    "frontend",
    "backend",
    "monitoring",
];

const SECTIONS: &[&str] = &[
    "Overview",
    "Key Risks",
    "Open Questions",
    "Decisions",
    "Next Steps",
    "Timeline",
];

const TYPED_LINES: &[&str] = &[
    "we should revisit the deployment plan before the launch review",
    "see the key risks section of the security roadmap",
    "the database migration notes mention open questions",
    "monitoring and alerting came up during the incident review",
    "next steps for the frontend sprint are in the timeline",
];

fn generate_document(i: usize) -> CorpusDocument {
    let topic = TOPICS[i % TOPICS.len()];
    let name = format!("{topic} notes {i}");
    let mut text = format!("# {name}\n\n");
    for (j, section) in SECTIONS.iter().enumerate() {
        if (i + j) % 2 == 0 {
            text.push_str(&format!("## {section} for {topic}\n\nSome body text.\n\n"));
        }
    }
    CorpusDocument {
        path: format!("{topic}/{name}.md"),
        display_name: name,
        text,
    }
}

// ---------------------------------------------------------------------------
// Percentile computation
// ---------------------------------------------------------------------------

/// Percentile of an ascending sample by rounded index, `q` in `[0, 1]`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let rank = (q * last as f64).round() as usize;
    sorted[rank.min(last)]
}

/// Keystroke-scale latency: microseconds, or milliseconds past one.
fn format_latency(us: f64) -> String {
    if us >= 1_000.0 {
        format!("{:.2} ms", us / 1_000.0)
    } else {
        format!("{us:.1} us")
    }
}

fn format_rate(docs_per_sec: f64) -> String {
    if docs_per_sec >= 1_000.0 {
        format!("{:.1}K docs/s", docs_per_sec / 1_000.0)
    } else {
        format!("{docs_per_sec:.0} docs/s")
    }
}

fn format_scale(n: usize) -> String {
    if n >= 1_000 {
        format!("{}K", n / 1_000)
    } else {
        n.to_string()
    }
}

// ---------------------------------------------------------------------------
// Benchmark runner for a single scale
// ---------------------------------------------------------------------------

type MetricRow = (&'static str, fn(&ScaleResult) -> f64);

#[derive(Default)]
struct ScaleResult {
    build_docs_per_sec: f64,
    query_p50_us: f64,
    query_p95_us: f64,
    cycle_p50_us: f64,
    cycle_p95_us: f64,
}

fn latencies<F: FnMut(usize)>(runs: usize, mut op: F) -> Vec<f64> {
    let mut out: Vec<f64> = (0..runs)
        .map(|i| {
            let start = Instant::now();
            op(i);
            start.elapsed().as_micros() as f64
        })
        .collect();
    out.sort_by(f64::total_cmp);
    out
}

fn run_benchmark(n: usize) -> ScaleResult {
    let snapshot = CorpusSnapshot {
        documents: (0..n).map(generate_document).collect(),
    };
    let config = SuggestConfig::default();
    let mut result = ScaleResult::default();

    let start = Instant::now();
    let index: NameIndex = IndexBuilder::build(&snapshot);
    result.build_docs_per_sec = n as f64 / start.elapsed().as_secs_f64();

    let runs = 50;
    let query = latencies(runs, |i| {
        let _ = index.query_all(TOPICS[i % TOPICS.len()]);
    });
    result.query_p50_us = percentile(&query, 0.50);
    result.query_p95_us = percentile(&query, 0.95);

    let extractor = Extractor::new(&index, &config);
    let cycle = latencies(runs, |i| {
        let line = TYPED_LINES[i % TYPED_LINES.len()];
        let found = extractor.extract(0, line, line.chars().count());
        let _ = reconcile(found, &config);
    });
    result.cycle_p50_us = percentile(&cycle, 0.50);
    result.cycle_p95_us = percentile(&cycle, 0.95);

    result
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let scales: &[usize] = &[100, 1_000, 10_000];

    println!();
    println!("linksuggest Benchmark");
    println!("=====================");
    println!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!();

    eprint!("Warming up... ");
    let _ = run_benchmark(10);
    eprintln!("done.");

    let mut results: Vec<(usize, ScaleResult)> = Vec::new();
    for &n in scales {
        eprint!("Benchmarking {} docs... ", n);
        let start = Instant::now();
        let result = run_benchmark(n);
        eprintln!("done in {:.1}s", start.elapsed().as_secs_f64());
        results.push((n, result));
    }
    println!();

    let col0 = 22;
    let colw = 14;

    print!("| {:col0$}", "Operation");
    for &n in scales {
        print!("| {:>colw$}", format!("{} docs", format_scale(n)));
    }
    println!("|");

    print!("|{}", "-".repeat(col0 + 1));
    for _ in scales {
        print!("|{}", "-".repeat(colw + 1));
    }
    println!("|");

    print!("| {:col0$}", "Index Build");
    for (_, r) in &results {
        print!("| {:>colw$}", format_rate(r.build_docs_per_sec));
    }
    println!("|");

    let rows: Vec<MetricRow> = vec![
        ("Name Query (p50)", |r: &ScaleResult| r.query_p50_us),
        ("Name Query (p95)", |r: &ScaleResult| r.query_p95_us),
        ("Suggest Cycle (p50)", |r: &ScaleResult| r.cycle_p50_us),
        ("Suggest Cycle (p95)", |r: &ScaleResult| r.cycle_p95_us),
    ];
    for (label, getter) in &rows {
        print!("| {:col0$}", label);
        for (_, r) in &results {
            print!("| {:>colw$}", format_latency(getter(r)));
        }
        println!("|");
    }

    println!();
}
