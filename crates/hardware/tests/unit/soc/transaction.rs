//! # Bus Transaction Tests

use copperv_core::soc::BusTransaction;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(0x100, 1, 0xAB, 0x100, 0x0000_00AB, 0b0001)]
#[case(0x101, 1, 0xAB, 0x100, 0x0000_AB00, 0b0010)]
#[case(0x103, 1, 0xFFAB, 0x100, 0xAB00_0000, 0b1000)]
#[case(0x102, 2, 0x1234, 0x100, 0x1234_0000, 0b1100)]
#[case(0x104, 4, 0xDEAD_BEEF, 0x104, 0xDEAD_BEEF, 0b1111)]
fn writes_use_byte_lanes(
    #[case] addr: u32,
    #[case] size: u32,
    #[case] value: u32,
    #[case] lane_addr: u32,
    #[case] data: u32,
    #[case] strobe: u8,
) {
    assert_eq!(
        BusTransaction::write(addr, size, value),
        BusTransaction::Write {
            addr: lane_addr,
            data,
            strobe,
            response: 0
        }
    );
}

#[test]
fn text_form() {
    let read = BusTransaction::Read { addr: 0x8, data: 0x1 };
    assert_eq!(read.to_string(), "0x00000008 0x00000001");
    let write = BusTransaction::write(0x8000_0000, 4, 0x0100_0001);
    assert_eq!(write.to_string(), "0x80000000 0x01000001 0b1111 0");
    assert_eq!(write.addr(), 0x8000_0000);
}

#[rstest]
#[case("0x10 0x20", BusTransaction::Read { addr: 0x10, data: 0x20 })]
#[case("16 32 3", BusTransaction::Write { addr: 16, data: 32, strobe: 3, response: 0 })]
#[case("0x10 0x20 0b0011 1", BusTransaction::Write { addr: 0x10, data: 0x20, strobe: 3, response: 1 })]
fn parses_text_form(#[case] text: &str, #[case] expected: BusTransaction) {
    assert_eq!(text.parse::<BusTransaction>().unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("0x10")]
#[case("1 2 3 4 5")]
#[case("0x1_0000_0000 0")]
#[case("0 0 0x100")]
#[case("zz 0")]
fn rejects_malformed_text(#[case] text: &str) {
    assert!(text.parse::<BusTransaction>().is_err());
}

#[test]
fn display_parses_back() {
    let t = BusTransaction::write(0x2002, 2, 0xBEEF);
    assert_eq!(t.to_string().parse::<BusTransaction>().unwrap(), t);
}
