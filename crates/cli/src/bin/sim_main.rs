//! `sim_main`: evaluate the copperv model until it finishes.

use std::process::ExitCode;

use copperv_core::{DriverVariant, Simulator};
use copperv_core::sim::driver::run_main;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    copperv_sim::init_tracing(&args);
    run_main(DriverVariant::Testbench, args, Simulator::from_context)
}
