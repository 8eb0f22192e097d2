//! Data bus transactions.
//!
//! The copperv core has separate instruction-read, data-read and data-write
//! bus channels. When recording is enabled the interconnect logs every data
//! transaction as a [`BusTransaction`], in the same shape the harness uses for
//! expected-transaction lists:
//!
//! * read: `"addr data"`
//! * write: `"addr data strobe"` or `"addr data strobe response"`
//!
//! Addresses are word aligned; `data` carries the accessed bytes in their
//! byte lanes, and `strobe` has one bit per written lane.

use std::fmt;
use std::str::FromStr;

use crate::common::error::{SimError, parse_u64};

/// A single data bus transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusTransaction {
    /// Data read channel transaction.
    Read {
        /// Word-aligned address.
        addr: u32,
        /// Read data in its byte lanes.
        data: u32,
    },
    /// Data write channel transaction.
    Write {
        /// Word-aligned address.
        addr: u32,
        /// Write data in its byte lanes.
        data: u32,
        /// Byte-lane write enables.
        strobe: u8,
        /// Response code (0 is OK).
        response: u8,
    },
}

impl BusTransaction {
    /// Builds the read transaction for a `size`-byte load of `value` at `addr`.
    pub const fn read(addr: u32, size: u32, value: u32) -> Self {
        let (lane_addr, data, _) = lanes(addr, size, value);
        Self::Read {
            addr: lane_addr,
            data,
        }
    }

    /// Builds the write transaction for a `size`-byte store of `value` at `addr`.
    pub const fn write(addr: u32, size: u32, value: u32) -> Self {
        let (lane_addr, data, strobe) = lanes(addr, size, value);
        Self::Write {
            addr: lane_addr,
            data,
            strobe,
            response: 0,
        }
    }

    /// Returns the word-aligned address of the transaction.
    pub const fn addr(&self) -> u32 {
        match self {
            Self::Read { addr, .. } | Self::Write { addr, .. } => *addr,
        }
    }
}

const fn lanes(addr: u32, size: u32, value: u32) -> (u32, u32, u8) {
    let shift = (addr & 3) * 8;
    let (mask, strobe) = match size {
        1 => (0xFF, 0b0001u8),
        2 => (0xFFFF, 0b0011u8),
        _ => (0xFFFF_FFFF, 0b1111u8),
    };
    (
        addr & !3,
        (value & mask) << shift,
        strobe << (addr & 3),
    )
}

impl fmt::Display for BusTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { addr, data } => write!(f, "{addr:#010x} {data:#010x}"),
            Self::Write {
                addr,
                data,
                strobe,
                response,
            } => write!(f, "{addr:#010x} {data:#010x} {strobe:#06b} {response}"),
        }
    }
}

impl FromStr for BusTransaction {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SimError::InvalidExpectation(s.to_string());
        let fields = s
            .split_whitespace()
            .map(|f| parse_u64(f).ok_or_else(bad))
            .collect::<Result<Vec<_>, _>>()?;
        let word = |v: u64| u32::try_from(v).map_err(|_| bad());
        let byte = |v: u64| u8::try_from(v).map_err(|_| bad());
        match fields.as_slice() {
            [addr, data] => Ok(Self::Read {
                addr: word(*addr)?,
                data: word(*data)?,
            }),
            [addr, data, strobe] => Ok(Self::Write {
                addr: word(*addr)?,
                data: word(*data)?,
                strobe: byte(*strobe)?,
                response: 0,
            }),
            [addr, data, strobe, response] => Ok(Self::Write {
                addr: word(*addr)?,
                data: word(*data)?,
                strobe: byte(*strobe)?,
                response: byte(*response)?,
            }),
            _ => Err(bad()),
        }
    }
}
