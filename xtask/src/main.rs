use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the route simulation workspace",
    long_about = "A unified CLI for launching the UI, running the headless\n\
                  simulation, benchmarks, and CI checks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the simulation GUI
    Ui,
    /// Play a route headlessly and log progress
    Run {
        /// Skip the directions service and use a straight-line route
        #[arg(long, env = "ROUTE_SIM_OFFLINE")]
        offline: bool,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the headless example
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str], envs: &[(&str, &str)]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .status()
        .unwrap_or_else(|err| {
            eprintln!("failed to execute {program}: {err}");
            exit(1);
        })
}

fn run(program: &str, args: &[&str], envs: &[(&str, &str)]) {
    let status = spawn(program, args, envs);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    run("cargo", args, &[]);
}

fn run_git(args: &[&str]) {
    run("git", args, &[]);
}

fn run_headless(offline: bool) {
    let envs: &[(&str, &str)] = if offline {
        &[("ROUTE_SIM_OFFLINE", "1")]
    } else {
        &[]
    };
    run(
        "cargo",
        &[
            "run",
            "-p",
            "route_sim_core",
            "--example",
            "headless_run",
            "--features",
            "http",
            "--release",
        ],
        envs,
    );
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test route_sim_core");
    run_cargo(&["test", "-p", "route_sim_core"]);

    step("Test route_sim_core (http)");
    run_cargo(&["test", "-p", "route_sim_core", "--features", "http"]);

    step("Test route_sim_ui");
    run_cargo(&["test", "-p", "route_sim_ui"]);
}

fn ci_examples() {
    step("Run headless_run (offline)");
    run_headless(true);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&[
        "bench",
        "--package",
        "route_sim_core",
        "--bench",
        "performance",
    ]);
}

fn bench_compare() {
    let baseline_dir = Path::new("target/criterion");
    if baseline_dir.exists() {
        step("Removing existing benchmark data");
        if let Err(err) = std::fs::remove_dir_all(baseline_dir) {
            eprintln!("failed to remove target/criterion: {err}");
            exit(1);
        }
    }

    step("Stashing current changes");
    run_git(&[
        "stash",
        "push",
        "-m",
        "Temporary stash for benchmark comparison",
    ]);

    step("Running benchmark to create baseline");
    run_cargo(&[
        "bench",
        "--package",
        "route_sim_core",
        "--bench",
        "performance",
        "--",
        "--save-baseline",
        "main",
    ]);

    step("Reapplying changes");
    run_git(&["stash", "pop"]);

    step("Running benchmark comparing against baseline");
    run_cargo(&[
        "bench",
        "--package",
        "route_sim_core",
        "--bench",
        "performance",
        "--",
        "--baseline",
        "main",
    ]);

    eprintln!("\nDone! Check the output above to see performance comparison.");
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ui => {
            run_cargo(&["run", "-p", "route_sim_ui"]);
        }
        Commands::Run { offline } => run_headless(offline),
        Commands::Bench => ci_bench(),
        Commands::BenchCompare => bench_compare(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
