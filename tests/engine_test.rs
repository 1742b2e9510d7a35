use ducky::hid::{Hid, HidEvent, Keyboard, MouseButton, Recorder};
use ducky::{Engine, EngineOptions, Error, ExecutionState, Keycode, Outcome};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

/// Write `files` into a fresh directory and build an engine rooted there.
fn setup(files: &[(&str, &str)]) -> (TempDir, Engine, Recorder) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("Failed to write test script");
    }
    let recorder = Recorder::new();
    let engine = Engine::new(recorder.hid()).with_options(EngineOptions {
        script_root: dir.path().to_path_buf(),
        ..Default::default()
    });
    (dir, engine, recorder)
}

fn writes(recorder: &Recorder) -> Vec<(u128, String)> {
    recorder
        .timeline()
        .into_iter()
        .filter_map(|(at, event)| match event {
            HidEvent::Write(text) => Some((at.as_millis(), text)),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_key_combos_press_in_order_then_release() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "CTRL ALT DELETE\nGUI r\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        recorder.events(),
        vec![
            HidEvent::Press(Keycode::LeftControl),
            HidEvent::Press(Keycode::LeftAlt),
            HidEvent::Press(Keycode::Delete),
            HidEvent::ReleaseAll,
            HidEvent::Press(Keycode::LeftGui),
            HidEvent::Press(Keycode::R),
            HidEvent::ReleaseAll,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_token_is_dropped() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "FOO A\nBAR BAZ\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        recorder.events(),
        vec![HidEvent::Press(Keycode::A), HidEvent::ReleaseAll]
    );
}

#[tokio::test(start_paused = true)]
async fn test_default_delay_survives_import() {
    let (_dir, mut engine, recorder) = setup(&[
        ("main.dd", "DEFAULT_DELAY 5\nIMPORT inner.dd\nSTRING a\nSTRING b\n"),
        ("inner.dd", "STRING x\n"),
    ]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        writes(&recorder),
        vec![(50, "x".into()), (150, "a".into()), (200, "b".into())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_default_delay_set_in_import_is_inherited() {
    let (_dir, mut engine, recorder) = setup(&[
        ("main.dd", "IMPORT inner.dd\nSTRING a\nSTRING b\n"),
        ("inner.dd", "DEFAULTDELAY 3\n"),
    ]);

    let mut state = ExecutionState::new();
    assert!(engine.run_with_state("main.dd", &mut state).await.is_completed());
    assert_eq!(writes(&recorder), vec![(60, "a".into()), (90, "b".into())]);
    assert_eq!(state.default_delay_ms, 30);
}

#[tokio::test(start_paused = true)]
async fn test_repeat_replays_previous_line() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "STRING hi\nREPEAT 3\nREPEAT 1\n")]);

    let mut state = ExecutionState::new();
    assert!(engine.run_with_state("main.dd", &mut state).await.is_completed());
    assert_eq!(recorder.events(), vec![HidEvent::Write("hi".into()); 5]);
    assert_eq!(state.previous_line, "STRING hi");
}

#[tokio::test(start_paused = true)]
async fn test_repeat_applies_default_delay_per_repetition() {
    let (_dir, mut engine, recorder) =
        setup(&[("main.dd", "DEFAULT_DELAY 1\nSTRING hi\nREPEAT 3\nSTRING end\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        writes(&recorder),
        vec![
            (10, "hi".into()),
            (20, "hi".into()),
            (30, "hi".into()),
            (40, "hi".into()),
            (60, "end".into()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_repeat_of_import_reruns_it() {
    let (_dir, mut engine, recorder) = setup(&[
        ("main.dd", "IMPORT inner.dd\nREPEAT 2\n"),
        ("inner.dd", "STRING x\n"),
    ]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(recorder.events(), vec![HidEvent::Write("x".into()); 3]);
}

#[tokio::test(start_paused = true)]
async fn test_repeat_without_previous_line_is_noop() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "REPEAT 4\nSTRING a\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(recorder.events(), vec![HidEvent::Write("a".into())]);
}

#[tokio::test(start_paused = true)]
async fn test_tap_has_no_intervening_delay() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "DEFAULT_DELAY 10\nTAP 10 20\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    let timeline = recorder.timeline();
    assert_eq!(
        timeline.iter().map(|(_, e)| e.clone()).collect::<Vec<_>>(),
        vec![
            HidEvent::MoveTo(10, 20),
            HidEvent::ButtonPress(MouseButton::Left),
            HidEvent::ButtonRelease(MouseButton::Left),
        ]
    );
    assert!(timeline.iter().all(|(at, _)| *at == timeline[0].0));
}

#[tokio::test(start_paused = true)]
async fn test_swipe_moves_in_equal_steps() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "SWIPE 0 0 100 0 10\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    let timeline = recorder.timeline();
    let events: Vec<HidEvent> = timeline.iter().map(|(_, e)| e.clone()).collect();
    assert_eq!(events.len(), 13);
    assert_eq!(events[0], HidEvent::MoveTo(0, 0));
    assert_eq!(events[1], HidEvent::ButtonPress(MouseButton::Left));
    assert!(events[2..12].iter().all(|e| *e == HidEvent::MoveBy(10, 0)));
    assert_eq!(events[12], HidEvent::ButtonRelease(MouseButton::Left));

    let gaps: Vec<Duration> = timeline[2..12].windows(2).map(|w| w[1].0 - w[0].0).collect();
    assert!(gaps.iter().all(|gap| *gap >= Duration::from_millis(10)));
}

#[tokio::test(start_paused = true)]
async fn test_missing_script_is_skipped_and_state_untouched() {
    let (_dir, mut engine, recorder) = setup(&[]);

    let mut state = ExecutionState::new();
    state.default_delay_ms = 30;
    state.previous_line = "STRING x".into();
    let before = state.clone();
    let outcome = engine.run_with_state("missing.dd", &mut state).await;

    assert!(matches!(outcome, Outcome::Skipped(Error::Open { .. })));
    assert_eq!(state, before);
    assert!(recorder.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_missing_import_resumes_outer_script() {
    let (_dir, mut engine, recorder) =
        setup(&[("main.dd", "STRING a\nIMPORT missing.dd\nSTRING b\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        recorder.events(),
        vec![HidEvent::Write("a".into()), HidEvent::Write("b".into())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failing_import_resumes_outer_script() {
    let (_dir, mut engine, recorder) = setup(&[
        ("main.dd", "IMPORT inner.dd\nSTRING after\n"),
        ("inner.dd", "DELAY soon\nSTRING never\n"),
    ]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        recorder.events(),
        vec![
            HidEvent::ReleaseAll,
            HidEvent::ButtonRelease(MouseButton::Left),
            HidEvent::ButtonRelease(MouseButton::Right),
            HidEvent::ButtonRelease(MouseButton::Middle),
            HidEvent::Write("after".into()),
        ]
    );
}

/// A keyboard that, like a boot-protocol report, holds at most six keys.
struct SixKeyKeyboard {
    recorder: Recorder,
    held: usize,
}

impl Keyboard for SixKeyKeyboard {
    fn press(&mut self, key: Keycode) -> ducky::Result<()> {
        if self.held == 6 {
            return Err(Error::TooManyKeys);
        }
        self.held += 1;
        Keyboard::press(&mut self.recorder, key)
    }

    fn release_all(&mut self) -> ducky::Result<()> {
        self.held = 0;
        Keyboard::release_all(&mut self.recorder)
    }

    fn write(&mut self, text: &str) -> ducky::Result<()> {
        self.recorder.write(text)
    }
}

#[tokio::test(start_paused = true)]
async fn test_keys_released_when_import_fails_mid_combo() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("main.dd"),
        "IMPORT inner.dd\nDELAY 1000\nSTRING after\n",
    )
    .unwrap();
    fs::write(dir.path().join("inner.dd"), "A B C D E F G\n").unwrap();

    let recorder = Recorder::new();
    let keyboard = SixKeyKeyboard {
        recorder: recorder.clone(),
        held: 0,
    };
    let hid = Hid::new(keyboard, recorder.clone(), recorder.clone());
    let mut engine = Engine::new(hid).with_options(EngineOptions {
        script_root: dir.path().to_path_buf(),
        ..Default::default()
    });

    assert!(engine.run("main.dd").await.is_completed());
    let held = [Keycode::A, Keycode::B, Keycode::C, Keycode::D, Keycode::E, Keycode::F];
    let mut expected: Vec<HidEvent> = held.into_iter().map(HidEvent::Press).collect();
    expected.extend([
        HidEvent::ReleaseAll,
        HidEvent::ButtonRelease(MouseButton::Left),
        HidEvent::ButtonRelease(MouseButton::Right),
        HidEvent::ButtonRelease(MouseButton::Middle),
        HidEvent::Write("after".into()),
    ]);
    assert_eq!(recorder.events(), expected);

    let timeline = recorder.timeline();
    assert_eq!(timeline[6], (Duration::ZERO, HidEvent::ReleaseAll));
    assert_eq!(writes(&recorder), vec![(1000, "after".into())]);
}

#[tokio::test(start_paused = true)]
async fn test_previous_line_flows_into_import() {
    let (_dir, mut engine, recorder) = setup(&[
        ("main.dd", "STRING hi\nIMPORT inner.dd\n"),
        ("inner.dd", "REPEAT 2\n"),
    ]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(recorder.events(), vec![HidEvent::Write("hi".into()); 3]);
}

#[tokio::test(start_paused = true)]
async fn test_self_import_is_rejected() {
    let (_dir, mut engine, recorder) =
        setup(&[("loop.dd", "STRING a\nIMPORT loop.dd\nSTRING done\n")]);

    assert!(engine.run("loop.dd").await.is_completed());
    assert_eq!(
        recorder.events(),
        vec![HidEvent::Write("a".into()), HidEvent::Write("done".into())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_import_depth_is_bounded() {
    let (dir, engine, recorder) = setup(&[
        ("0.dd", "STRING 0\nIMPORT 1.dd\n"),
        ("1.dd", "STRING 1\nIMPORT 2.dd\n"),
        ("2.dd", "STRING 2\nIMPORT 3.dd\n"),
        ("3.dd", "STRING 3\n"),
    ]);
    let mut engine = engine.with_options(EngineOptions {
        script_root: dir.path().to_path_buf(),
        max_import_depth: 2,
        ..Default::default()
    });

    let mut state = ExecutionState::new();
    assert!(engine.run_with_state("0.dd", &mut state).await.is_completed());
    let typed: Vec<String> = writes(&recorder).into_iter().map(|(_, t)| t).collect();
    assert_eq!(typed, vec!["0", "1", "2"]);
    assert_eq!(state.import_depth, 0);
    assert!(state.open_scripts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_arguments_are_noops() {
    let (_dir, mut engine, recorder) =
        setup(&[("main.dd", "TAP 10\nSWIPE 1 2\nTAP x y\nREPEAT many\nSTRING ok\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(recorder.events(), vec![HidEvent::Write("ok".into())]);
}

#[tokio::test(start_paused = true)]
async fn test_bad_delay_aborts_run() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "STRING a\nDELAY soon\nSTRING b\n")]);

    let outcome = engine.run("main.dd").await;
    assert!(matches!(
        outcome,
        Outcome::Aborted(Error::InvalidDelay { command: "DELAY", .. })
    ));
    assert_eq!(
        recorder.events(),
        vec![
            HidEvent::Write("a".into()),
            HidEvent::ReleaseAll,
            HidEvent::ButtonRelease(MouseButton::Left),
            HidEvent::ButtonRelease(MouseButton::Right),
            HidEvent::ButtonRelease(MouseButton::Middle),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_text_and_comments() {
    let (_dir, mut engine, recorder) = setup(&[(
        "main.dd",
        "REM setup\r\nSTRING  two spaces\r\n\r\nPRINT hello\r\nENTER\r\n",
    )]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        recorder.events(),
        vec![
            HidEvent::Write(" two spaces".into()),
            HidEvent::Press(Keycode::Enter),
            HidEvent::ReleaseAll,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_blank_lines_skip_default_delay() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "DEFAULT_DELAY 1\n\n   \nSTRING a\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(writes(&recorder), vec![(10, "a".into())]);
}

#[tokio::test(start_paused = true)]
async fn test_led_toggles() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "LED\nLED\nLED\n")]);

    assert!(engine.run("main.dd").await.is_completed());
    assert_eq!(
        recorder.events(),
        vec![
            HidEvent::LedToggle(true),
            HidEvent::LedToggle(false),
            HidEvent::LedToggle(true),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_run_payload_fades_and_shutdown_releases() {
    let (_dir, mut engine, recorder) = setup(&[("main.dd", "STRING a\n")]);

    assert!(engine.run_payload("main.dd").await.is_completed());
    let events = recorder.events();
    let write_at = events
        .iter()
        .position(|e| *e == HidEvent::Write("a".into()))
        .unwrap();
    assert!(events[..write_at].iter().all(|e| matches!(e, HidEvent::LedDuty(_))));
    assert!(events[write_at + 1..].iter().all(|e| matches!(e, HidEvent::LedDuty(_))));
    assert!(!recorder.led_on());

    recorder.clear();
    engine.shutdown().unwrap();
    assert_eq!(recorder.events().first(), Some(&HidEvent::ReleaseAll));
}
