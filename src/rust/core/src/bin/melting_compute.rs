// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
//
//! melting_compute — CLI binary for the MeltingKernel
//!
//! Takes a JSON melting request on stdin or as --json argument, evaluates
//! every requested material point at the given simulation time and prints
//! the JSON response (stiffness per point, phase window, evaluation path,
//! events) on stdout. Logs go to stderr; set RUST_LOG=debug for per-point
//! evaluation traces.
//!
//! Usage:
//!   echo '{"crystal":{"c11":204.6,"c12":137.7,"c44":126.2},"temperatures":{"1":[300,1660]},"time":0.5}' | melting_compute
//!   melting_compute --json '{"crystal":...}'
//!
//! Output: MeltingResponse JSON ({"points": [...], "events": [...], "compute_time_ms": ...})

use std::env;
use std::io::{self, Read};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use umst_melt::melting_kernel::{MeltingKernel, MeltingRequest};

fn main() {
    init_tracing();

    let input = match get_input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("ERROR: Failed to read stdin: {}", e);
            std::process::exit(1);
        }
    };

    let request: MeltingRequest = match serde_json::from_str(&input) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("ERROR: Invalid JSON input: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        time = request.time,
        elements = request.temperatures.elements().count(),
        activate_elems = request.config.activate_elems,
        "evaluating melting field"
    );

    let response = match MeltingKernel::run(&request) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(%e, "melting evaluation failed");
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    for event in &response.events {
        tracing::info!(topic = %event.topic, severity = %event.severity, "{}", event.message);
    }

    match serde_json::to_string(&response) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("ERROR: Failed to serialize response: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the JSON response only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn get_input() -> io::Result<String> {
    let args: Vec<String> = env::args().collect();

    // Check for --json argument
    if let Some(pos) = args.iter().position(|a| a == "--json") {
        if let Some(json) = args.get(pos + 1) {
            return Ok(json.clone());
        }
    }

    // Otherwise read from stdin
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}
