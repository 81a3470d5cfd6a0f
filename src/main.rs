// Sortscope: step traces and benchmark sweeps for five sorting algorithms.

use std::process;

use log::{LevelFilter, error};
use rand::Rng;

use sortscope::alloc::TrackingAllocator;
use sortscope::dataset::{DatasetSource, RandomDatasets};
use sortscope::summary;
use sortscope::{
    Algorithm, BenchmarkConfig, Harness, HighlightRole, Progress, ProgressSink, Step, generate_trace, run_comparison,
};

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

/// Prints progress to stderr as it arrives.
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, progress: Progress) {
        eprintln!("[{:>3.0}%] {}", progress.fraction * 100.0, progress.message);
    }
}

fn usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} sweep   [--size N] [--type random|reverse|partial] [--algorithms quick,heap,...]");
    eprintln!("  {program} compare [--size N] [--type random|reverse|partial] [--algorithms quick,heap,...]");
    eprintln!("  {program} trace   <algorithm> [v1,v2,...]");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program} sweep --size 50000 --type reverse");
    eprintln!("  {program} trace merge 4,2,5,1");
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("sortscope");

    let Some(command) = args.get(1) else {
        eprintln!("Error: no command given");
        eprintln!();
        usage(program);
        process::exit(1);
    };

    let result = match command.as_str() {
        "sweep" => run_sweep(&args[2..]),
        "compare" => run_compare(&args[2..]),
        "trace" => run_trace(&args[2..]),
        "-h" | "--help" | "help" => {
            usage(program);
            Ok(())
        }
        other => {
            eprintln!("Error: unknown command '{other}'");
            eprintln!();
            usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

fn run_sweep(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = BenchmarkConfig::from_args(args)?;
    let mut source = RandomDatasets::thread_local();
    let matrix = Harness::new().sweep(
        &config.algorithms,
        config.data_size,
        config.data_type,
        &mut source,
        &mut ConsoleProgress,
    );

    println!("Sweep: {} data up to {} elements", config.data_type, config.data_size);
    print!("{:<12}", "");
    for size in matrix.sizes() {
        print!("{size:>14}");
    }
    println!();
    for (algorithm, row) in matrix.iter() {
        print!("{:<12}", algorithm.name());
        for result in row.values() {
            let cell = if result.success() {
                result.format_time()
            } else {
                "ERROR".to_string()
            };
            print!("{cell:>14}");
        }
        println!();
    }

    println!();
    for (size, winners) in summary::summarize_sizes(&matrix) {
        if let (Some(fast), Some(lean)) = (winners.fastest, winners.most_memory_efficient) {
            println!(
                "{size:>7}: fastest {} ({}), most memory-efficient {} ({})",
                fast.algorithm_name(),
                fast.format_time(),
                lean.algorithm_name(),
                lean.format_memory()
            );
        }
    }
    for totals in summary::totals(&matrix).iter().filter(|t| t.failures > 0) {
        println!("{} failed {} measurement(s)", totals.algorithm, totals.failures);
    }
    Ok(())
}

fn run_compare(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = BenchmarkConfig::from_args(args)?;
    let data = RandomDatasets::thread_local().generate(config.data_type, config.data_size);
    let results = run_comparison(&config.algorithms, &data, config.data_type, &mut ConsoleProgress);

    println!("Configuration: {} | {} elements", config.data_type, config.data_size);
    println!();
    println!("Results (by speed):");
    for result in summary::ranked_by_time(&results) {
        println!(
            "  {result}  ({:.0} elements/s)",
            summary::throughput(result)
        );
    }
    for result in results.iter().filter(|r| !r.success()) {
        println!("  {result}");
    }

    let winners = summary::summarize(&results);
    if let Some(fast) = winners.fastest {
        println!();
        println!("Fastest: {} ({})", fast.algorithm_name(), fast.format_time());
    }
    if let Some(lean) = winners.most_memory_efficient {
        println!(
            "Most efficient: {} ({})",
            lean.algorithm_name(),
            lean.format_memory()
        );
    }
    Ok(())
}

fn run_trace(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let Some(name) = args.first() else {
        return Err("trace needs an algorithm name".into());
    };
    let algorithm: Algorithm = name.parse()?;

    let data: Vec<i64> = match args.get(1) {
        Some(values) => values
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<i64>)
            .collect::<Result<_, _>>()?,
        None => {
            let mut rng = rand::rng();
            let len = if algorithm == Algorithm::Heap { 10 } else { 12 };
            (0..len).map(|_| rng.random_range(5..=50)).collect()
        }
    };
    if data.len() > algorithm.max_trace_len() {
        log::warn!(
            "{} elements is more than the {} recommended for a {} trace",
            data.len(),
            algorithm.max_trace_len(),
            algorithm
        );
    }

    let trace = generate_trace(algorithm, &data)?;
    let info = algorithm.info();
    println!("{algorithm}: {} on {data:?}", info.description);
    for (i, line) in info.how_it_works.iter().enumerate() {
        println!("  {}. {line}", i + 1);
    }
    println!();

    let mut player = trace.player();
    while let Some(step) = player.step_forward() {
        let position = player.position().unwrap_or(0) + 1;
        println!("{position:>4}/{}  {}  {}", trace.len(), render(step), step.description());
    }
    Ok(())
}

/// One-line rendering: each value tagged by its highlight role.
fn render(step: &Step) -> String {
    let cells: Vec<String> = step
        .array()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let mark = match step.role(i) {
                HighlightRole::Normal => "",
                HighlightRole::Comparing => "?",
                HighlightRole::Swapping => "~",
                HighlightRole::Sorted => "*",
                HighlightRole::Pivot => "^",
                HighlightRole::Gap => "|",
                HighlightRole::Merging => "+",
            };
            format!("{v}{mark}")
        })
        .collect();
    format!("[{}]", cells.join(" "))
}
