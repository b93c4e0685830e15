use motionkit_interpreter::{Interpreter, InterpreterDefaults, MotionTrace, StatusCode};
use motionkit_settings::{Config, MachineSettings, SettingsManager};
use tempfile::tempdir;

#[test]
fn test_dollar_lines_persist_through_interpreter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("machine.json");
    let manager = SettingsManager::open(&path, MachineSettings::default(), Vec::new()).unwrap();
    let trace = MotionTrace::new();
    let mut interp = Interpreter::new(
        &InterpreterDefaults::default(),
        trace.clone(),
        trace.clone(),
        manager,
    );

    assert_eq!(interp.execute_line("$6=0.05"), StatusCode::Ok);
    assert_eq!(interp.execute_line("$7=3"), StatusCode::Ok);
    assert_eq!(interp.execute_line("$"), StatusCode::Ok);
    assert!(trace.is_empty());

    let listing = String::from_utf8(interp.settings().writer().clone()).unwrap();
    assert!(listing.contains("$6 = 0.050 (mm/arc segment)"));
    assert!(listing.contains("binary = 00000011"));

    let reopened = SettingsManager::open(&path, MachineSettings::default(), Vec::new()).unwrap();
    assert_eq!(reopened.settings().mm_per_arc_segment, 0.05);
    assert_eq!(reopened.settings().invert_mask, 3);
}

#[test]
fn test_rejected_dollar_lines() {
    let (state_before, mut interp) = {
        let interp = Interpreter::new(
            &InterpreterDefaults::default(),
            MotionTrace::new(),
            MotionTrace::new(),
            SettingsManager::with_writer(MachineSettings::default(), Vec::new()),
        );
        (interp.state().clone(), interp)
    };

    assert_eq!(interp.execute_line("$8=1"), StatusCode::UnsupportedStatement);
    assert_eq!(interp.execute_line("$1=-400"), StatusCode::UnsupportedStatement);
    assert_eq!(interp.execute_line("$1=X"), StatusCode::BadNumberFormat);
    assert_eq!(interp.execute_line("$1=4=5"), StatusCode::UnsupportedStatement);
    assert_eq!(interp.settings().settings(), &MachineSettings::default());

    // Only the status code moves on a `$` line.
    let mut state = interp.state().clone();
    state.status_code = state_before.status_code;
    assert_eq!(state, state_before);
}

#[test]
fn test_defaults_from_config() {
    let mut config = Config::default();
    config.machine.default_feed_rate = 600.0;
    config.machine.default_seek_rate = 1800.0;

    let interp = Interpreter::new(
        &InterpreterDefaults::from_config(&config),
        MotionTrace::new(),
        MotionTrace::new(),
        SettingsManager::with_writer(config.machine.clone(), Vec::new()),
    );
    assert_eq!(interp.state().feed_rate, 10.0);
    assert_eq!(interp.state().seek_rate, 30.0);
}
