//! # Simulation Context Tests
//!
//! Argument recording, plusarg lookup, runtime options, completion and time.

use copperv_core::SimContext;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn context(args: &[&str]) -> SimContext {
    let mut ctx = SimContext::new();
    ctx.command_args(args.iter().copied());
    ctx
}

#[test]
fn new_context_is_empty() {
    let ctx = SimContext::new();
    assert!(ctx.args().is_empty());
    assert!(!ctx.got_finish());
    assert_eq!(ctx.time(), 0);
    assert_eq!(ctx.seed(), None);
}

#[test]
fn records_every_argument_in_order() {
    let ctx = context(&["-v", "+program=a.bin", "+verilator+quiet", "plain"]);
    assert_eq!(ctx.args(), ["-v", "+program=a.bin", "+verilator+quiet", "plain"]);
}

#[test]
fn command_args_appends() {
    let mut ctx = context(&["+a=1"]);
    ctx.command_args(["+b=2"]);
    assert_eq!(ctx.args().len(), 2);
    assert_eq!(ctx.plusarg_value("a"), Some("1"));
    assert_eq!(ctx.plusarg_value("b"), Some("2"));
}

#[rstest]
#[case(&["+program=test.bin"], "program", Some("test.bin"))]
#[case(&["+program=a", "+program=b"], "program", Some("b"))]
#[case(&["+program"], "program", None)]
#[case(&["+programs=x"], "program", None)]
#[case(&["program=x"], "program", None)]
#[case(&["+max_cycles="], "max_cycles", Some(""))]
fn plusarg_value_lookup(#[case] args: &[&str], #[case] name: &str, #[case] expected: Option<&str>) {
    assert_eq!(context(args).plusarg_value(name), expected);
}

#[test]
fn has_plusarg_matches_prefixes() {
    let ctx = context(&["+trace", "+ram_fill=0xaa"]);
    assert!(ctx.has_plusarg("trace"));
    assert!(ctx.has_plusarg("ram_fill"));
    assert!(!ctx.has_plusarg("program"));
}

#[rstest]
#[case(&["+trace"], true)]
#[case(&["+trace=1"], true)]
#[case(&["+trace_all"], false)]
#[case(&["+tracer"], false)]
#[case(&["trace"], false)]
#[case(&["+verilator+trace"], false)]
fn has_flag_matches_the_whole_name(#[case] args: &[&str], #[case] expected: bool) {
    assert_eq!(context(args).has_flag("trace"), expected);
}

#[test]
fn runtime_options_are_not_plusargs() {
    let ctx = context(&["+verilator+seed+42", "+verilator+debug"]);
    assert_eq!(ctx.seed(), Some(42));
    assert!(ctx.debug());
    assert!(!ctx.quiet());
    assert!(!ctx.has_plusarg("verilator"));
}

#[test]
fn bad_and_unknown_runtime_options_are_ignored() {
    let ctx = context(&["+verilator+seed+banana", "+verilator+frobnicate"]);
    assert_eq!(ctx.seed(), None);
    assert!(!ctx.got_finish());
}

#[test]
fn finish_is_idempotent() {
    let mut ctx = SimContext::new();
    ctx.finish();
    ctx.finish();
    assert!(ctx.got_finish());
}

#[test]
fn time_saturates() {
    let mut ctx = SimContext::new();
    ctx.time_inc(5);
    assert_eq!(ctx.time(), 5);
    ctx.time_inc(u64::MAX);
    assert_eq!(ctx.time(), u64::MAX);
}
