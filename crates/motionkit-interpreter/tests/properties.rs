use motionkit_interpreter::{
    theta, Interpreter, InterpreterDefaults, MotionRequest, MotionTrace, StatusCode, Vector3,
};
use motionkit_settings::{MachineSettings, SettingsManager};
use proptest::prelude::*;
use std::f64::consts::PI;

fn setup() -> (
    Interpreter<MotionTrace, MotionTrace, SettingsManager<Vec<u8>>>,
    MotionTrace,
) {
    let trace = MotionTrace::new();
    let interp = Interpreter::new(
        &InterpreterDefaults::default(),
        trace.clone(),
        trace.clone(),
        SettingsManager::with_writer(MachineSettings::default(), Vec::new()),
    );
    (interp, trace)
}

fn coordinate() -> impl Strategy<Value = f64> {
    (-100_000i32..100_000).prop_map(|v| v as f64 / 1000.0)
}

proptest! {
    #[test]
    fn absolute_moves_land_on_target(x in coordinate(), y in coordinate(), z in coordinate()) {
        let (mut interp, trace) = setup();
        let line = format!("G90G1X{}Y{}Z{}", x, y, z);
        prop_assert_eq!(interp.execute_line(&line), StatusCode::Ok);
        prop_assert_eq!(interp.state().position, Vector3::new(x, y, z));
        let last_line_target = trace.requests().into_iter().rev().find_map(|r| match r {
            MotionRequest::Line { target, .. } => Some(target),
            _ => None,
        });
        prop_assert_eq!(last_line_target, Some(Vector3::new(x, y, z)));
    }

    #[test]
    fn relative_moves_accumulate(steps in prop::collection::vec(coordinate(), 1..20)) {
        let (mut interp, _) = setup();
        prop_assert_eq!(interp.execute_line("G91"), StatusCode::Ok);
        let mut expected = 0.0;
        for step in &steps {
            prop_assert_eq!(interp.execute_line(&format!("G1X{}", step)), StatusCode::Ok);
            expected += step;
        }
        prop_assert!((interp.state().position.x() - expected).abs() < 1e-6);
    }

    #[test]
    fn failed_lines_never_move(x in coordinate(), code in 200u32..1000) {
        let (mut interp, _) = setup();
        interp.execute_line(&format!("G0X{}", x));
        let before = interp.state().position;
        prop_assert_eq!(
            interp.execute_line(&format!("G{}X1", code)),
            StatusCode::UnsupportedStatement
        );
        prop_assert_eq!(interp.state().position, before);
    }

    #[test]
    fn theta_stays_in_range(x in -1e3f64..1e3, y in -1e3f64..1e3) {
        prop_assume!(x != 0.0 || y != 0.0);
        let t = theta(x, y);
        prop_assert!((-PI..=PI).contains(&t), "theta({}, {}) = {}", x, y, t);
    }

    #[test]
    fn radius_arcs_end_on_circle(half_chord in 0.5f64..50.0, extra in 0.0f64..50.0) {
        let (mut interp, trace) = setup();
        let r = half_chord + extra;
        let line = format!("G2X{}Y0R{}", 2.0 * half_chord, r);
        prop_assert_eq!(interp.execute_line(&line), StatusCode::Ok);
        let arc = trace.requests().into_iter().find_map(|r| match r {
            MotionRequest::Arc { arc } => Some(arc),
            _ => None,
        });
        let arc = arc.expect("arc request");
        prop_assert!((arc.radius - r).abs() < 1e-6 * r.max(1.0));
        let end = arc.trace(Vector3::ZERO, 0.5).last().expect("segments");
        prop_assert!((end.x() - 2.0 * half_chord).abs() < 1e-6);
        prop_assert!(end.y().abs() < 1e-6);
    }
}
