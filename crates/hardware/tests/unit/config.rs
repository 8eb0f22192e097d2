//! # Configuration Tests
//!
//! JSON loading, defaults for missing entries, and plusarg overrides.

use std::io::Write;

use copperv_core::common::SimError;
use copperv_core::common::constants::{T_FAIL, T_PASS, TEST_RESULT_ADDR};
use copperv_core::config::Config;
use copperv_core::sim::context::SimContext;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

fn context(args: &[&str]) -> SimContext {
    let mut ctx = SimContext::new();
    ctx.command_args(args.iter().copied());
    ctx
}

#[test]
fn defaults_describe_the_copperv_harness() {
    let config = Config::default();
    assert_eq!(config.general.start_pc, 0);
    assert_eq!(config.general.initial_sp, None);
    assert_eq!(config.general.max_cycles, 1_000_000);
    assert_eq!(config.general.reset_cycles, 2);
    assert!(config.general.echo_output);
    assert!(config.general.print_stats);
    assert!(!config.general.record_transactions);
    assert_eq!(config.system.ram_base, 0);
    assert_eq!(config.system.ram_end(), 0x1_0000);
    assert_eq!(config.system.test_result_addr, TEST_RESULT_ADDR);
    assert_eq!(config.harness.pass_value, T_PASS);
    assert_eq!(config.harness.fail_value, T_FAIL);
}

#[rstest]
#[case("{}")]
#[case(r#"{ "general": {} }"#)]
#[case(r#"{ "system": {}, "harness": {} }"#)]
fn empty_sections_are_defaults(#[case] json: &str) {
    assert_eq!(Config::from_json_str(json).unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(
        r#"{ "general": { "reset_cycles": 5, "initial_sp": 4096 }, "system": { "bus_latency": 3 } }"#,
    )
    .unwrap();
    assert_eq!(config.general.reset_cycles, 5);
    assert_eq!(config.general.initial_sp, Some(4096));
    assert_eq!(config.general.max_cycles, 1_000_000);
    assert_eq!(config.system.bus_latency, 3);
    assert_eq!(config.system.bus_width, 4);
}

#[rstest]
#[case("not json")]
#[case(r#"{ "general": { "max_cycles": "many" } }"#)]
#[case(r#"{ "system": { "ram_fill": 256 } }"#)]
fn malformed_json_is_a_config_error(#[case] json: &str) {
    assert!(matches!(Config::from_json_str(json), Err(SimError::Config(_))));
}

#[test]
fn from_json_file_reads_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "harness": {{ "pass_value": 1 }} }}"#).unwrap();
    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.harness.pass_value, 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::from_json_file("/nonexistent/copperv.json").unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/copperv.json"));
}

#[rstest]
#[case(&["+max_cycles=500"], 500)]
#[case(&["+max_cycles=0x100"], 256)]
#[case(&["+max_cycles=1_000"], 1000)]
#[case(&["+verilator+quiet"], 1_000_000)]
fn max_cycles_plusarg(#[case] args: &[&str], #[case] expected: u64) {
    let config = Config::from_context(&context(args)).unwrap();
    assert_eq!(config.general.max_cycles, expected);
}

#[test]
fn ram_fill_and_trace_plusargs() {
    let config = Config::from_context(&context(&["+ram_fill=0xA5", "+trace"])).unwrap();
    assert_eq!(config.system.ram_fill, 0xA5);
    assert!(config.general.trace_instructions);
}

#[test]
fn trace_needs_the_exact_switch() {
    let config = Config::from_context(&context(&["+trace_all", "+tracer=1"])).unwrap();
    assert!(!config.general.trace_instructions);

    let config = Config::from_context(&context(&["+trace=1"])).unwrap();
    assert!(config.general.trace_instructions);
}

#[rstest]
#[case("+ram_fill=0x1FF")]
#[case("+ram_fill=abc")]
#[case("+max_cycles=-1")]
fn bad_plusarg_values(#[case] arg: &str) {
    let err = Config::from_context(&context(&[arg])).unwrap_err();
    assert!(matches!(err, SimError::InvalidPlusarg { .. }));
}

#[test]
fn plusargs_override_the_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "max_cycles": 10, "reset_cycles": 1 }} }}"#).unwrap();
    let arg = format!("+config={}", file.path().display());
    let config = Config::from_context(&context(&[arg.as_str(), "+max_cycles=20"])).unwrap();
    assert_eq!(config.general.max_cycles, 20);
    assert_eq!(config.general.reset_cycles, 1);
}

#[test]
fn missing_config_plusarg_file_fails() {
    let err = Config::from_context(&context(&["+config=/nonexistent/c.json"])).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}
