//! Command-line entry point for blurpad.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use blurpad_cli::{Args, run};
use clap::Parser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report.plan) {
                    Ok(json) => println!("{json}"),
                    Err(e) => log::warn!("failed to serialize export plan: {e}"),
                }
            } else {
                println!(
                    "{} -> {} ({}, blur {}px)",
                    args.input.display(),
                    report.output.display(),
                    report.plan.dimensions,
                    report.plan.radius,
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
