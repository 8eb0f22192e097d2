//! Run expectations.
//!
//! Unit tests for the core are written as a program plus lists of expected
//! effects. This module parses the textual forms of those lists and checks
//! them against a finished run:
//!
//! * register expectations: `"<reg> <value>"`, e.g. `"t0 0x123"` or `"x5 291"`
//! * data bus transactions: see [`BusTransaction`]

use std::fmt;
use std::str::FromStr;

use crate::common::RegisterFile;
use crate::common::error::{SimError, parse_u64};
use crate::isa::abi::{reg_index, reg_name};
use crate::soc::BusTransaction;

/// Expected final value of one integer register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegExpectation {
    /// Register index.
    pub reg: usize,
    /// Expected value.
    pub value: u32,
}

impl FromStr for RegExpectation {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SimError::InvalidExpectation(s.to_string());
        let mut fields = s.split_whitespace();
        let (Some(name), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(bad());
        };
        let reg = reg_index(name).ok_or_else(bad)?;
        let value = parse_u64(value)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(bad)?;
        Ok(Self { reg, value })
    }
}

impl fmt::Display for RegExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", reg_name(self.reg), self.value)
    }
}

/// One expectation that a run did not meet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mismatch {
    /// A register held a different value.
    Register {
        /// The expectation.
        expected: RegExpectation,
        /// The value found.
        actual: u32,
    },
    /// The transaction at `index` differs.
    Transaction {
        /// Position in the transaction list.
        index: usize,
        /// Expected transaction, if the list was long enough.
        expected: Option<BusTransaction>,
        /// Observed transaction, if the run produced one.
        actual: Option<BusTransaction>,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register { expected, actual } => write!(
                f,
                "{}: expected {:#x}, found {actual:#x}",
                reg_name(expected.reg),
                expected.value
            ),
            Self::Transaction {
                index,
                expected,
                actual,
            } => {
                let show = |t: &Option<BusTransaction>| {
                    t.map_or_else(|| "nothing".to_string(), |t| t.to_string())
                };
                write!(
                    f,
                    "transaction {index}: expected {}, found {}",
                    show(expected),
                    show(actual)
                )
            }
        }
    }
}

/// Parses a list of textual expectations.
///
/// # Errors
///
/// Returns [`SimError::InvalidExpectation`] for the first line that does not parse.
pub fn parse_all<T>(lines: &[&str]) -> Result<Vec<T>, SimError>
where
    T: FromStr<Err = SimError>,
{
    lines.iter().map(|l| l.parse()).collect()
}

/// Checks register expectations against a register file.
pub fn check_registers(expected: &[RegExpectation], regs: &RegisterFile) -> Vec<Mismatch> {
    expected
        .iter()
        .filter_map(|e| {
            let actual = regs.read(e.reg);
            (actual != e.value).then_some(Mismatch::Register {
                expected: *e,
                actual,
            })
        })
        .collect()
}

/// Checks that `actual` matches `expected` transaction for transaction, in order.
pub fn check_transactions(expected: &[BusTransaction], actual: &[BusTransaction]) -> Vec<Mismatch> {
    let len = expected.len().max(actual.len());
    (0..len)
        .filter_map(|index| {
            let (e, a) = (expected.get(index).copied(), actual.get(index).copied());
            (e != a).then_some(Mismatch::Transaction {
                index,
                expected: e,
                actual: a,
            })
        })
        .collect()
}
