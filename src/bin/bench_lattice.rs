use bumpalo::Bump;
use span_lattice::config::DecodeConfig;
use span_lattice::lattice::InputPaths;
use span_lattice::phrase::{Sentence, split_sentences};
use std::env;
use std::fs;
use std::time::Instant;
use std::fs::File;
use std::io::Write;
use pprof::protos::Message;

fn build_all(lines: &[&[u8]], config: &DecodeConfig) -> usize {
    let mut total = 0;
    for line in lines {
        let bump = Bump::new();
        let sentence = Sentence::new(line, &bump);
        let mut paths: InputPaths<'_> = InputPaths::build(&sentence, config, &bump);
        // Touch short spans like a search would, then drop the rest.
        for path in &paths {
            if path.num_words() <= 2 {
                path.mark_used();
            }
        }
        total += paths.len();
        paths.prune_unused();
    }
    total
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file> [max-phrase-length]", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let max_phrase_length = args
        .get(2)
        .map(|s| s.parse().expect("max-phrase-length must be a number"))
        .unwrap_or(span_lattice::config::DEFAULT_MAX_PHRASE_LENGTH);
    let config = DecodeConfig::new(max_phrase_length, 1);
    config.validate().expect("invalid config");

    let code = fs::read(path).expect("Failed to read file");
    let lines = split_sentences(&code);

    println!("Benchmarking: {}", path);
    println!("Sentences: {}, max phrase length: {}", lines.len(), max_phrase_length);

    // Warmup
    println!("Warming up...");
    for _ in 0..10 {
        let _ = build_all(&lines, &config);
    }

    // Benchmark
    let iterations = 100;
    println!("Running {} iterations...", iterations);

    let guard = pprof::ProfilerGuardBuilder::default().frequency(1000).blocklist(&["libc", "libgcc", "pthread", "vdso"]).build().unwrap();

    let start = Instant::now();

    let mut paths_built = 0;
    for _ in 0..iterations {
        paths_built += build_all(&lines, &config);
    }

    let duration = start.elapsed();

    if let Ok(report) = guard.report().build() {
        let file = File::create("profile.pb").unwrap();
        let profile = report.pprof().unwrap();
        let mut content = Vec::new();
        profile.write_to_vec(&mut content).unwrap();
        let mut file = file;
        file.write_all(&content).unwrap();
        println!("Profile written to profile.pb");

        let file = File::create("flamegraph.svg").unwrap();
        report.flamegraph(file).unwrap();
        println!("Flamegraph written to flamegraph.svg");
    };

    let avg_time = duration / iterations as u32;
    let throughput = paths_built as f64 / duration.as_secs_f64() / 1_000_000.0;

    println!("Total time: {:?}", duration);
    println!("Average time: {:?}", avg_time);
    println!("Throughput: {:.2} M paths/s", throughput);
}
