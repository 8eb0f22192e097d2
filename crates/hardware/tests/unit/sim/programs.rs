//! # Test Program Tests
//!
//! The uninitialised-variable test and the print program, run end to end.
//! The result register keeps the last value written, so the test always ends
//! in PASS: a non-zero variable only shows up as a FAIL write that is later
//! overwritten.

use copperv_core::sim::programs::{self, BSS_OFFSET};
use copperv_core::sim::simulator::HaltReason;
use copperv_core::soc::BusTransaction;
use copperv_core::soc::devices::TestOutcome;
use copperv_core::common::constants::{T_FAIL, T_PASS};
use copperv_core::isa::abi::REG_A0;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::{TestContext, quiet_config};

fn run_uninitialized(ram_fill: u8) -> TestContext {
    let mut config = quiet_config();
    config.system.ram_fill = ram_fill;
    config.general.record_transactions = true;
    let program = programs::uninitialized_variable_test(&config);
    let mut tc = TestContext::with_config(config);
    let _ = tc.sim.load_program(&program.to_bytes()).unwrap();
    assert_eq!(tc.run(), HaltReason::SelfLoop { pc: 4 });
    tc
}

#[test]
fn zero_variable_passes_without_a_fail_write() {
    let tc = run_uninitialized(0);
    assert_eq!(tc.sim.outcome(), TestOutcome::Pass);
    assert_eq!(tc.sim.test_result(), Some(T_PASS));
    assert!(!tc.sim.cpu.bus.fail_seen());
    assert_eq!(tc.get_reg(REG_A0), 0);
    assert_eq!(tc.sim.stats().instructions_retired, 13);
    assert_eq!(
        tc.sim.cpu.bus.bus.transactions(),
        [
            BusTransaction::Read { addr: BSS_OFFSET, data: 0 },
            BusTransaction::write(0x8000_0000, 4, T_PASS),
        ]
    );
}

#[rstest]
#[case(0x01)]
#[case(0xA5)]
#[case(0xFF)]
fn nonzero_variable_still_ends_in_pass(#[case] fill: u8) {
    let tc = run_uninitialized(fill);
    let a = u32::from_le_bytes([fill; 4]);

    assert_eq!(tc.sim.outcome(), TestOutcome::Pass);
    assert_eq!(tc.sim.test_result(), Some(T_PASS));
    assert!(tc.sim.cpu.bus.fail_seen());
    assert_eq!(tc.sim.stats().instructions_retired, 16);
    assert_eq!(
        tc.sim.cpu.bus.bus.transactions(),
        [
            BusTransaction::Read { addr: BSS_OFFSET, data: a },
            BusTransaction::write(0x8000_0000, 4, T_FAIL),
            BusTransaction::write(0x8000_0000, 4, T_PASS),
        ]
    );
}

#[test]
fn custom_sentinels_are_used() {
    let mut config = quiet_config();
    config.harness.pass_value = 0x600D;
    config.harness.fail_value = 0xBAD;
    config.system.ram_fill = 0x11;
    let program = programs::uninitialized_variable_test(&config);
    let mut tc = TestContext::with_config(config);
    let _ = tc.sim.load_program(&program.to_bytes()).unwrap();
    let _ = tc.run();
    assert_eq!(tc.sim.test_result(), Some(0x600D));
    assert!(tc.sim.cpu.bus.fail_seen());
}

#[rstest]
#[case("hello\n", "hello\n")]
#[case("", "")]
#[case("before\0after", "before")]
fn print_writes_each_character(#[case] message: &str, #[case] expected: &str) {
    let config = quiet_config();
    let program = programs::print(message, &config);
    let mut tc = TestContext::with_config(config);
    let _ = tc.sim.load_program(&program.to_bytes()).unwrap();
    assert_eq!(tc.run(), HaltReason::SelfLoop { pc: 36 });
    assert_eq!(tc.sim.output(), expected);
    assert_eq!(tc.sim.outcome(), TestOutcome::NotWritten);
}

#[test]
fn programs_follow_a_moved_ram_base() {
    let mut config = quiet_config();
    config.system.ram_base = 0x1000_0000;
    config.general.start_pc = 0x1000_0000;
    let program = programs::print("ok", &config);
    assert_eq!(program.data_addr(), 0x1000_0028);
    let mut tc = TestContext::with_config(config);
    let _ = tc.sim.load_program(&program.to_bytes()).unwrap();
    assert_eq!(tc.run(), HaltReason::SelfLoop { pc: 0x1000_0024 });
    assert_eq!(tc.sim.output(), "ok");
}
