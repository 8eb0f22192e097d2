//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the copperv model. It provides:
//! 1. **Cycles and IPC:** Total cycles, reset cycles, retired instructions and derived metrics.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, system).
//! 3. **Bus:** Cycles spent on bus transfers according to the configured width and latency.

use std::fmt::Write as _;
use std::time::Instant;

/// Simulation statistics structure.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total evaluations, reset included.
    pub cycles: u64,
    /// Evaluations spent with reset asserted.
    pub reset_cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branch instructions retired.
    pub inst_branch: u64,
    /// Count of conditional branches that were taken.
    pub branches_taken: u64,
    /// Count of JAL/JALR instructions retired.
    pub inst_jump: u64,
    /// Count of ALU (OP, OP-IMM, LUI, AUIPC) instructions retired.
    pub inst_alu: u64,
    /// Count of system and fence instructions retired.
    pub inst_system: u64,

    /// Cycles spent on the bus by fetches, loads and stores.
    pub bus_cycles: u64,
    /// Number of traps raised (including ECALL/EBREAK halts).
    pub traps_taken: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            reset_cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            branches_taken: 0,
            inst_jump: 0,
            inst_alu: 0,
            inst_system: 0,
            bus_cycles: 0,
            traps_taken: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"bus"`.
/// Pass an empty slice to `render_sections` to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "bus"];

const RULE: &str = "==========================================================";
const THIN_RULE: &str = "----------------------------------------------------------";

impl SimStats {
    /// Seconds of host time since these statistics were created.
    pub fn host_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Retired instructions per active (non-reset) cycle.
    pub fn ipc(&self) -> f64 {
        let active = self.cycles.saturating_sub(self.reset_cycles).max(1);
        self.instructions_retired as f64 / active as f64
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to render all sections.
    pub fn render_sections(&self, sections: &[&str]) -> String {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let seconds = self.host_seconds().max(f64::MIN_POSITIVE);
        let instr = self.instructions_retired.max(1) as f64;
        let mut out = String::new();

        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "COPPERV SIMULATION STATISTICS");
        let _ = writeln!(out, "{RULE}");
        if want("summary") {
            let khz = (self.cycles as f64 / seconds) / 1000.0;
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_reset_cycles         {}", self.reset_cycles);
            let _ = writeln!(out, "sim_freq                 {khz:.2} kHz");
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "traps                    {}", self.traps_taken);
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(
                    out,
                    "  {name:<22} {count} ({:.2}%)",
                    (count as f64 / instr) * 100.0
                );
            }
            let taken = if self.inst_branch > 0 {
                100.0 * self.branches_taken as f64 / self.inst_branch as f64
            } else {
                0.0
            };
            let _ = writeln!(out, "  branch.taken           {} ({taken:.2}%)", self.branches_taken);
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("bus") {
            let _ = writeln!(out, "BUS");
            let _ = writeln!(out, "  bus.cycles             {}", self.bus_cycles);
        }
        let _ = writeln!(out, "{RULE}");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[&str]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
