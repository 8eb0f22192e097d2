//! # Expectation Tests
//!
//! Register and transaction expectations in their text forms, checked
//! against real runs.

use copperv_core::isa::abi::{REG_T0, REG_T1};
use copperv_core::isa::encode::li;
use copperv_core::sim::expect::{
    Mismatch, RegExpectation, check_registers, check_transactions, parse_all,
};
use copperv_core::soc::BusTransaction;
use pretty_assertions::assert_eq;

use crate::common::builder::program::{b, snippet};
use crate::common::harness::{TestContext, quiet_config};

fn recorded() -> TestContext {
    let mut config = quiet_config();
    config.general.record_transactions = true;
    TestContext::with_config(config)
}

#[test]
fn register_expectations_match_a_run() {
    let [hi, lo] = li(REG_T0, 0x123);
    let mut tc = TestContext::new().load_program(&snippet(&[hi, lo, b().addi(REG_T1, REG_T0, 1).build()]));
    let _ = tc.run();

    let expected: Vec<RegExpectation> = parse_all(&["t0 0x123", "x6 292", "zero 0"]).unwrap();
    assert!(check_registers(&expected, &tc.sim.cpu.regs).is_empty());
}

#[test]
fn register_mismatch_is_reported() {
    let mut tc = TestContext::new().load_program(&snippet(&[b().addi(REG_T0, 0, 5).build()]));
    let _ = tc.run();

    let expected: Vec<RegExpectation> = parse_all(&["t0 0x123"]).unwrap();
    let mismatches = check_registers(&expected, &tc.sim.cpu.regs);
    assert_eq!(
        mismatches,
        [Mismatch::Register {
            expected: RegExpectation { reg: REG_T0, value: 0x123 },
            actual: 5,
        }]
    );
    assert_eq!(mismatches[0].to_string(), "t0: expected 0x123, found 0x5");
}

#[test]
fn parse_all_stops_at_the_first_bad_line() {
    let result: Result<Vec<RegExpectation>, _> = parse_all(&["t0 1", "bogus"]);
    assert_eq!(result.unwrap_err().to_string(), "invalid expectation 'bogus'");
}

#[test]
fn transaction_expectations_match_a_run() {
    let [hi, lo] = li(REG_T0, 0x100);
    let mut tc = recorded().load_program(&snippet(&[
        hi,
        lo,
        b().addi(REG_T1, 0, 0x5A).build(),
        b().sb(REG_T0, REG_T1, 3).build(),
        b().lhu(REG_T1, REG_T0, 2).build(),
        b().sw(REG_T0, REG_T1, 4).build(),
    ]));
    let _ = tc.run();

    let expected: Vec<BusTransaction> = parse_all(&[
        "0x100 0x5a000000 0b1000",
        "0x100 0x5a000000",
        "0x104 0x5a00 0xf 0",
    ])
    .unwrap();
    assert!(check_transactions(&expected, tc.sim.cpu.bus.bus.transactions()).is_empty());
}

#[test]
fn extra_transactions_are_mismatches() {
    let actual = [
        BusTransaction::Read { addr: 0, data: 1 },
        BusTransaction::Read { addr: 4, data: 2 },
    ];
    let expected = [BusTransaction::Read { addr: 0, data: 1 }];
    assert_eq!(
        check_transactions(&expected, &actual),
        [Mismatch::Transaction {
            index: 1,
            expected: None,
            actual: Some(actual[1]),
        }]
    );
}
