// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use lane_pack_model::prelude::*;
use lane_pack_solver::LayoutEngine;
use serde::Serialize;
use std::{fs::File, io::BufWriter, time::Instant};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct InstanceInfo {
    idx: usize,
    seed: u64,
    events: usize,
    horizon_min: i16,
    lane_count: u32,
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    instance: InstanceInfo,
    seed_width_sum: f64,
    seed_elapsed_us: u128,
    refined_width_sum: f64,
    refined_width_sum_sq: f64,
    refined_elapsed_us: u128,
}

#[derive(Debug, Clone, Serialize)]
struct BenchmarkReport {
    description: String,
    runs: Vec<RunResult>,
}

fn interpolate_u(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    let num = (val1 as isize - val0 as isize) * step as isize;
    (val0 as isize + num / (steps as isize - 1)).max(0) as usize
}

fn main() {
    enable_tracing();

    let n_instances = 10usize;
    let min_events = 20usize;
    let max_events = 400usize;
    let horizon_min = 1440i16;

    let mut seed_engine =
        LayoutEngine::with_options(LayoutOptions::default().with_refine_iterations(0));
    let mut refine_engine = LayoutEngine::new();

    let mut runs = Vec::with_capacity(n_instances);
    for idx in 0..n_instances {
        let events_count = interpolate_u(min_events, max_events, idx, n_instances);
        let seed = 0xC0FFEE + idx as u64;
        let config = EventGenConfig::default()
            .with_count(events_count)
            .with_horizon_min(horizon_min)
            .with_seed(seed);
        let events = EventGenerator::new(config).generate();

        let started = Instant::now();
        let seeded = seed_engine.compute(&events);
        let seed_elapsed_us = started.elapsed().as_micros();

        let started = Instant::now();
        let refined = refine_engine.compute(&events);
        let refined_elapsed_us = started.elapsed().as_micros();

        println!(
            "instance {:>2}: {:>4} events, {:>2} lanes | seeded Σw {:>8.1} in {:>6} µs | refined Σw {:>8.1} in {:>6} µs",
            idx,
            events_count,
            refined.lane_count(),
            seeded.stats().width_sum(),
            seed_elapsed_us,
            refined.stats().width_sum(),
            refined_elapsed_us,
        );

        runs.push(RunResult {
            instance: InstanceInfo {
                idx,
                seed,
                events: events_count,
                horizon_min,
                lane_count: refined.lane_count(),
            },
            seed_width_sum: seeded.stats().width_sum(),
            seed_elapsed_us,
            refined_width_sum: refined.stats().width_sum(),
            refined_width_sum_sq: refined.stats().width_sum_sq(),
            refined_elapsed_us,
        });
    }

    let report = BenchmarkReport {
        description: format!(
            "lane-pack layout ramp, {} instances from {} to {} events",
            n_instances, min_events, max_events
        ),
        runs,
    };
    let file = File::create("layout-report.json").expect("failed to create report file");
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .expect("failed to write report");
    println!("report written to layout-report.json");
}
