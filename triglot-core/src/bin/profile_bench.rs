//! Profile Benchmarking Tool
//!
//! Measures throughput of the identification pipeline on a large text file,
//! such as a language corpus or a Wikipedia dump.
//!
//! ## What It Benchmarks
//!
//! 1. **Extraction**: sliding the trigram window over every line
//! 2. **Profile**: extraction plus frequency counting
//! 3. **Normalize**: L2 normalization of the full profile
//! 4. **Scoring**: each similarity metric, comparing a query profile built
//!    from the first lines against the full-file profile
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/profile_bench /path/to/corpus.txt
//!
//! # Use the first 500 lines as the query (default 100)
//! ./target/release/profile_bench /path/to/corpus.txt 500
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Profile ===
//! --------------------------------
//! Mode        : Profile
//! Elapsed     : 0.181 s
//! Throughput  : 0.541 GiB/s
//! Trigrams    : 98_114_208
//! Trigrams/sec: 542_067_558
//! --------------------------------
//! ```
//!
//! Build in release mode and use an input of 100MB+ for stable numbers.

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use triglot_core::analyzer::{buffer_lines, extract_trigrams};
use triglot_core::{scorer_for, Algorithm, TrigramProfile, ValueMode};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: profile_bench <path> [query-lines]");
        std::process::exit(1);
    }

    let path = &args[1];
    let query_lines = args
        .get(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(100);

    println!("Loading file...");
    let bytes = fs::read(path)?;
    let input = String::from_utf8_lossy(&bytes);

    println!("File size:   {}", fmt_bytes(input.len() as u64));
    println!("Query lines: {}\n", query_lines);

    bench_extract(&input);
    let mut corpus = bench_profile(&input);
    bench_normalize(&input, &mut corpus);
    bench_scoring(&input, &corpus, query_lines);

    Ok(())
}

fn bench_extract(input: &str) {
    println!("=== Extract ===");

    warmup(|| {
        std::hint::black_box(extract_all(input));
    });

    let mut trigrams = 0u64;
    let elapsed = measure(|| {
        trigrams = extract_all(input);
        std::hint::black_box(trigrams);
    });

    print_perf("Extract", input.len(), elapsed, trigrams);
}

/// Slides the trigram window over every line, discarding the trigrams.
fn extract_all(input: &str) -> u64 {
    let mut n = 0u64;
    for line in buffer_lines(input) {
        extract_trigrams(line, |t| {
            std::hint::black_box(t);
            n += 1;
        });
    }
    n
}

fn bench_profile(input: &str) -> TrigramProfile {
    println!("=== Profile ===");

    warmup(|| {
        let mut profile = TrigramProfile::new();
        profile.extend_lines(buffer_lines(input), usize::MAX);
        std::hint::black_box(profile.len());
    });

    let mut profile = TrigramProfile::new();
    let elapsed = measure(|| {
        let mut local = TrigramProfile::new();
        local.extend_lines(buffer_lines(input), usize::MAX);
        profile = local;
        std::hint::black_box(profile.len());
    });

    let total = profile.stats().total_occurrences as u64;
    print_perf("Profile", input.len(), elapsed, total);
    println!("Profile     : {}\n", profile.stats());
    profile
}

fn bench_normalize(input: &str, profile: &mut TrigramProfile) {
    println!("=== Normalize ===");

    warmup(|| profile.normalize());
    let elapsed = measure(|| {
        profile.normalize();
        std::hint::black_box(profile.is_normalized());
    });

    print_perf("Normalize", input.len(), elapsed, profile.len() as u64);
}

fn bench_scoring(input: &str, corpus: &TrigramProfile, query_lines: usize) {
    let mut query = TrigramProfile::new();
    query.extend_lines(buffer_lines(input), query_lines);
    query.normalize();

    for algorithm in Algorithm::ALL {
        let scorer = scorer_for(algorithm);
        println!("=== Score ({}) ===", scorer.name());

        warmup(|| {
            std::hint::black_box(scorer.score(&query, corpus, ValueMode::Normalized));
        });

        let mut score = 0.0f32;
        let elapsed = measure(|| {
            score = scorer.score(&query, corpus, ValueMode::Normalized);
            std::hint::black_box(score);
        });

        println!("--------------------------------");
        println!("Mode        : {}", algorithm);
        println!("Elapsed     : {:.3} us", elapsed.as_secs_f64() * 1e6);
        println!("Query       : {} trigrams", fmt_count(query.len() as u64));
        println!("Score       : {:.6}", score);
        println!("--------------------------------\n");
    }
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, trigrams: u64) {
    let secs = elapsed.as_secs_f64();
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);

    if trigrams > 0 {
        println!("Trigrams    : {}", fmt_count(trigrams));
        println!("Trigrams/sec: {}", fmt_count((trigrams as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_all_visits_every_window() {
        // hello: 3, ab: 0, año!x: 3; the blank line is skipped
        assert_eq!(extract_all("hello\r\n\nab\naño!x"), 3 + 0 + 3);
        assert_eq!(extract_all(""), 0);
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(fmt_count(1234567), "1_234_567");
        assert_eq!(fmt_bytes(2048), "2.00 KiB");
    }
}
