use settrigger::error::TriggerError;
use settrigger::run;
use std::process::Command;
use trigger_hal::{CardLayout, HalError, PortWrite, SimBackend};

fn run_sim(args: &[&str]) -> (Result<(u8, u8), TriggerError>, SimBackend) {
    let mut sim = SimBackend::new();
    let result = run(args.iter().copied(), &mut sim, &CardLayout::default())
        .map(|w| (w.port_a, w.port_b));
    (result, sim)
}

#[test]
fn sets_pin_one_and_nine_at_0x300() {
    let (result, sim) = run_sim(&["300", "1", "9"]);
    assert_eq!(result.unwrap(), (0x01, 0x01));
    assert_eq!(
        sim.writes(),
        &[
            PortWrite { port: 0x303, value: 0x80 },
            PortWrite { port: 0x300, value: 0x01 },
            PortWrite { port: 0x301, value: 0x01 },
        ]
    );
    assert_eq!(sim.acquire_count(), 1);
    assert_eq!(sim.release_count(), 1);
    assert!(!sim.is_privileged());
}

#[test]
fn base_without_pins_clears_all_lines() {
    let (result, sim) = run_sim(&["300"]);
    assert_eq!(result.unwrap(), (0x00, 0x00));
    assert_eq!(sim.last_value(0x300), Some(0x00));
    assert_eq!(sim.last_value(0x301), Some(0x00));
    assert_eq!(sim.last_value(0x303), Some(0x80));
}

#[test]
fn repeated_invocation_writes_same_bytes() {
    let (first, first_sim) = run_sim(&["dc00", "16", "4", "8"]);
    let (second, second_sim) = run_sim(&["dc00", "16", "4", "8"]);
    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(first_sim.writes(), second_sim.writes());
}

#[test]
fn all_sixteen_pins_set_every_line() {
    let pins: Vec<String> = (1..=16).rev().map(|n| n.to_string()).collect();
    let mut args = vec!["300".to_string()];
    args.extend(pins);
    let mut sim = SimBackend::new();
    let word = run(&args, &mut sim, &CardLayout::default()).unwrap();
    assert_eq!(word.as_u16(), 0xffff);
}

#[test]
fn missing_base_touches_no_hardware() {
    let (result, sim) = run_sim(&[]);
    assert!(matches!(result, Err(TriggerError::Usage)));
    assert_eq!(sim.acquire_count(), 0);
    assert!(sim.writes().is_empty());
}

#[test]
fn bad_pin_is_rejected_before_privilege() {
    let (result, sim) = run_sim(&["300", "3", "banana"]);
    assert!(matches!(result, Err(TriggerError::InvalidPin(_))));
    assert_eq!(sim.acquire_count(), 0);
    assert!(sim.writes().is_empty());
}

#[test]
fn write_failure_still_releases_privilege() {
    let mut sim = SimBackend::new();
    sim.fail_writes_to(0x300);
    let err = run(["300", "5"], &mut sim, &CardLayout::default()).unwrap_err();
    assert!(matches!(err, TriggerError::Hal(HalError::PortWrite { port: 0x300, .. })));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(sim.release_count(), 1);
    assert!(!sim.is_privileged());
}

#[test]
fn denied_privilege_is_a_hardware_error() {
    let mut sim = SimBackend::new();
    sim.deny_privilege();
    let err = run(["300", "5"], &mut sim, &CardLayout::default()).unwrap_err();
    assert!(matches!(err, TriggerError::Hal(HalError::PermissionDenied(_))));
    assert!(sim.writes().is_empty());
}

#[test]
fn binary_without_arguments_exits_with_status_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_settrigger"))
        .output()
        .expect("failed to spawn settrigger");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "stderr was: {stderr}");
}

#[test]
fn binary_rejects_bad_pin_with_status_two() {
    let output = Command::new(env!("CARGO_BIN_EXE_settrigger"))
        .args(["300", "42"])
        .output()
        .expect("failed to spawn settrigger");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn binary_rejects_non_utf8_pin_with_status_two() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let output = Command::new(env!("CARGO_BIN_EXE_settrigger"))
        .arg("300")
        .arg(OsString::from_vec(vec![0xff]))
        .output()
        .expect("failed to spawn settrigger");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid pin"), "stderr was: {stderr}");
}

#[cfg(unix)]
#[test]
fn binary_rejects_non_utf8_base_with_status_two() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let output = Command::new(env!("CARGO_BIN_EXE_settrigger"))
        .arg(OsString::from_vec(vec![b'3', 0xfe]))
        .output()
        .expect("failed to spawn settrigger");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn base_too_close_to_port_space_end_reports_typed_token() {
    let (result, sim) = run_sim(&["0xFFFE", "1"]);
    match result {
        Err(TriggerError::InvalidBaseAddress { token, .. }) => assert_eq!(token, "0xFFFE"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(sim.acquire_count(), 0);
}
