// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use the_switchyard::config::load_and_validate_pipeline;
use the_switchyard::engine::{PipelineExecutor, PipelineResult};

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "the-switchyard".to_string());
    let (flags, pipeline_files): (Vec<String>, Vec<String>) =
        args.partition(|arg| arg.starts_with("--"));
    let json = flags.iter().any(|flag| flag == "--json");

    if pipeline_files.is_empty() {
        eprintln!("Usage: {} <pipeline.yaml> [pipeline2.yaml ...] [--json]", program);
        eprintln!("Example: {} configs/hello.yaml", program);
        eprintln!("Example: {} configs/routing.yaml --json", program);
        eprintln!("Set RUST_LOG=info (or debug) to see engine logs on stderr.");
        return ExitCode::from(2);
    }

    let mut all_succeeded = true;
    for (i, pipeline_file) in pipeline_files.iter().enumerate() {
        if i > 0 && !json {
            println!("\n{}", "─".repeat(80));
        }

        match run_pipeline(pipeline_file, json).await {
            Ok(succeeded) => all_succeeded &= succeeded,
            Err(e) => {
                eprintln!("❌ Failed to run {}: {:#}", pipeline_file, e);
                all_succeeded = false;
            }
        }
    }

    if all_succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Load, validate and execute one definition file. Returns whether the run succeeded.
async fn run_pipeline(pipeline_file: &str, json: bool) -> anyhow::Result<bool> {
    let start_time = Instant::now();

    let (pipeline, options) = load_and_validate_pipeline(pipeline_file)
        .with_context(|| format!("loading {}", pipeline_file))?;

    if !json {
        println!("📋 Pipeline: {} ({} units)", pipeline_file, pipeline.len());
        println!("⏱️  Unit Timeout: {}ms", options.unit_timeout_ms);
        println!("⚙️  Max Concurrency: {}", options.concurrency());
        println!("🛡️  Continue On Error: {}", options.continue_on_error);
    }

    let result = PipelineExecutor::new(options).execute(&pipeline).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.report())?);
    } else {
        print_summary(&result);
        println!(
            "\n⏱️  Total Time (including load): {:?}",
            start_time.elapsed()
        );
    }

    Ok(result.success)
}

fn print_summary(result: &PipelineResult) {
    println!("\n📊 Execution Results:");
    println!("⏱️  Execution Time: {:?}", result.total_elapsed);
    println!("🔢 Units Attempted: {}", result.unit_results.len());

    println!("\n🔄 Execution Order:");
    for (i, unit) in result.unit_results.iter().enumerate() {
        match (&unit.outcome, result.outputs.get(&unit.unit_name)) {
            (Ok(_), Some(output)) => println!(
                "  {}. ✅ {} ({:?}) → {}",
                i + 1,
                unit.unit_name,
                unit.elapsed,
                serde_json::Value::Object(output.clone())
            ),
            (Ok(_), None) => println!("  {}. ✅ {} ({:?})", i + 1, unit.unit_name, unit.elapsed),
            (Err(e), _) => println!("  {}. ❌ {} ({:?}): {}", i + 1, unit.unit_name, unit.elapsed, e),
        }
    }

    match &result.error {
        None => println!("\n🎉 Pipeline succeeded"),
        Some(e) => println!("\n💥 {}", e),
    }
}
