//! `sim_bench`: like `sim_main`, also counting evaluation steps.

use std::process::ExitCode;

use copperv_core::{DriverVariant, Simulator};
use copperv_core::sim::driver::run_main;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    copperv_sim::init_tracing(&args);
    run_main(DriverVariant::Benchmark, args, Simulator::from_context)
}
