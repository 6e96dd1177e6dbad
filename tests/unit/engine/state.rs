use super::*;

#[test]
fn happy_path() {
    let mut state = EngineState::default();
    for next in [
        EngineState::Loading,
        EngineState::Loading,
        EngineState::Ready,
        EngineState::Running,
        EngineState::Paused,
        EngineState::Running,
        EngineState::ShutDown,
    ] {
        state.transition(next).unwrap();
    }
    assert_eq!(state, EngineState::ShutDown);
}

#[test]
fn illegal_moves_are_config_errors() {
    let mut state = EngineState::Uninitialized;
    assert!(matches!(
        state.transition(EngineState::Running),
        Err(MarqueeError::Config(_))
    ));
    assert_eq!(state, EngineState::Uninitialized);

    let mut done = EngineState::ShutDown;
    assert!(done.transition(EngineState::ShutDown).is_err());
    assert!(done.transition(EngineState::Loading).is_err());
}

#[test]
fn only_running_is_active() {
    assert!(EngineState::Running.is_active());
    assert!(!EngineState::Paused.is_active());
    assert!(!EngineState::Ready.is_active());
}
