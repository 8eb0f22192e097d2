//! # Test Register Tests
//!
//! `TEST_RESULT`, `SIM_OUT` and `TIMER_COUNTER` as mapped by `System`, and
//! the memory-map checks `System::new` performs.

use copperv_core::common::constants::{
    SIM_OUT_ADDR, T_FAIL, T_PASS, TEST_RESULT_ADDR, TIMER_COUNTER_ADDR,
};
use copperv_core::common::{AccessType, SimError};
use copperv_core::config::Config;
use copperv_core::soc::System;
use copperv_core::soc::devices::TestOutcome;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::quiet_config;

fn system() -> System {
    System::new(&quiet_config()).unwrap()
}

#[test]
fn result_register_starts_unwritten() {
    let sys = system();
    assert_eq!(sys.test_result(), None);
    assert_eq!(sys.outcome(), TestOutcome::NotWritten);
    assert!(!sys.fail_seen());
}

#[rstest]
#[case(&[T_PASS], TestOutcome::Pass)]
#[case(&[T_FAIL], TestOutcome::Fail)]
#[case(&[T_PASS, T_FAIL], TestOutcome::Fail)]
#[case(&[T_FAIL, T_PASS], TestOutcome::Pass)]
#[case(&[0x1234], TestOutcome::Other(0x1234))]
fn last_write_wins(#[case] writes: &[u32], #[case] outcome: TestOutcome) {
    let mut sys = system();
    for value in writes {
        sys.bus.store(TEST_RESULT_ADDR, 4, *value).unwrap();
    }
    assert_eq!(sys.outcome(), outcome);
    assert_eq!(sys.test_result(), writes.last().copied());
    assert_eq!(sys.fail_seen(), writes.contains(&T_FAIL));
}

#[test]
fn result_register_reads_back() {
    let mut sys = system();
    sys.bus.store(TEST_RESULT_ADDR, 4, T_FAIL).unwrap();
    assert_eq!(sys.bus.load(TEST_RESULT_ADDR, 4, AccessType::Read), Ok(T_FAIL));
    assert_eq!(sys.bus.load(TEST_RESULT_ADDR + 3, 1, AccessType::Read), Ok(0x02));
}

#[test]
fn byte_stores_build_the_pass_word() {
    let mut sys = system();
    sys.bus.store(TEST_RESULT_ADDR, 1, 0x01).unwrap();
    assert_eq!(sys.outcome(), TestOutcome::Other(0x0000_0001));
    sys.bus.store(TEST_RESULT_ADDR + 3, 1, 0x01).unwrap();
    assert_eq!(sys.outcome(), TestOutcome::Pass);
    assert_eq!(sys.test_result(), Some(T_PASS));
}

#[test]
fn halfword_store_replaces_only_its_half() {
    let mut sys = system();
    sys.bus.store(TEST_RESULT_ADDR, 4, T_PASS).unwrap();
    sys.bus.store(TEST_RESULT_ADDR + 2, 2, 0x0200).unwrap();
    assert_eq!(sys.outcome(), TestOutcome::Fail);
    assert!(sys.fail_seen());
}

#[test]
fn sentinels_come_from_the_harness_config() {
    let mut config = quiet_config();
    config.harness.pass_value = 1;
    config.harness.fail_value = 2;
    let mut sys = System::new(&config).unwrap();
    sys.bus.store(TEST_RESULT_ADDR, 4, T_PASS).unwrap();
    assert_eq!(sys.outcome(), TestOutcome::Other(T_PASS));
    sys.bus.store(TEST_RESULT_ADDR, 4, 1).unwrap();
    assert!(sys.outcome().passed());
}

#[test]
fn sim_out_collects_low_bytes() {
    let mut sys = system();
    sys.bus.store(SIM_OUT_ADDR, 4, u32::from(b'o') | 0xFF00).unwrap();
    sys.bus.store(SIM_OUT_ADDR, 1, u32::from(b'k')).unwrap();
    sys.bus.store(SIM_OUT_ADDR, 4, u32::from(b'\n')).unwrap();
    assert_eq!(sys.sim_output(), "ok\n");
    assert_eq!(sys.bus.load(SIM_OUT_ADDR, 4, AccessType::Read), Ok(0));
}

#[test]
fn timer_counter_follows_tick_and_ignores_writes() {
    let mut sys = system();
    assert_eq!(sys.bus.load(TIMER_COUNTER_ADDR, 4, AccessType::Read), Ok(0));
    sys.tick(0x1_0000_0005);
    assert_eq!(sys.bus.load(TIMER_COUNTER_ADDR, 4, AccessType::Read), Ok(5));
    sys.bus.store(TIMER_COUNTER_ADDR, 4, 99).unwrap();
    assert_eq!(sys.bus.load(TIMER_COUNTER_ADDR, 4, AccessType::Read), Ok(5));
}

#[test]
fn ram_fill_is_visible() {
    let mut config = quiet_config();
    config.system.ram_fill = 0xA5;
    let mut sys = System::new(&config).unwrap();
    assert_eq!(sys.bus.load(0x100, 4, AccessType::Read), Ok(0xA5A5_A5A5));
}

#[test]
fn ram_overlapping_the_test_registers_is_rejected() {
    let mut config = Config::default();
    config.system.ram_base = 0x7FFF_FFF0;
    config.system.ram_size = 0x20;
    assert!(matches!(System::new(&config), Err(SimError::InvalidMemoryMap(_))));
}

#[test]
fn ram_larger_than_the_address_space_is_rejected() {
    let mut config = Config::default();
    config.system.ram_size = 1 << 33;
    let err = System::new(&config).unwrap_err();
    assert!(err.to_string().contains("exceeds 4 GiB"));
}
