mod support;

use easel::prelude::*;
use easel::runtime::events::{InputEvent, MouseButton, MouseButtons};
use easel::runtime::keys::{KeyMod, code};
use support::*;

#[test]
fn setup_runs_once_before_first_frame() {
    let mut runner = runner();
    runner.iterate().expect("iterate");
    runner.iterate().expect("iterate");

    assert_eq!(runner.sketch().count("setup"), 1);
    assert_eq!(runner.sketch().calls[0], "setup");
    assert_eq!(runner.backend().frames_presented(), 2);
}

#[test]
fn ticks_fire_within_tolerance_of_the_period() {
    // The first iteration ticks at once. At 30 steps per second the 33 ms
    // period then fires from 24 ms on.
    let mut runner = runner();
    runner.iterate().expect("iterate");

    assert_eq!(runner.backend().ticks_ms(), 0);
    assert_eq!(runner.clock().tick_count(), 1);
    assert_eq!(runner.sketch().count("step"), 1);

    runner.iterate().expect("iterate");
    assert_eq!(runner.backend().ticks_ms(), 24);
    assert_eq!(runner.sketch().count("step"), 2);
}

#[test]
fn events_before_the_tick_wake_the_loop_early() {
    let mut runner = runner();
    runner.backend_mut().push_at(5, mouse_down(1.0, 2.0));
    runner.iterate().expect("iterate");
    assert_eq!(runner.sketch().count("step"), 1);

    // The next tick is due at 24 ms, the press arrives at 5 ms.
    runner.iterate().expect("iterate");
    assert_eq!(runner.backend().ticks_ms(), 5);
    assert_eq!(runner.sketch().input_calls(), vec!["mouse press 1 2"]);
    assert_eq!(runner.sketch().count("step"), 1);
}

#[test]
fn ctrl_sets_flag_without_being_held() {
    let mut runner = runner();
    runner.backend_mut().push(key_down(code::LEFT_CTRL, KeyMod::CTRL));
    runner.iterate().expect("iterate");

    assert!(runner.app().is_ctrl_down());
    assert!(runner.app().held_keys().is_empty());
    assert!(runner.app().should_draw_inspector());
    assert!(runner.sketch().input_calls().is_empty());

    runner.backend_mut().push(key_up(code::LEFT_CTRL, KeyMod::empty()));
    runner.iterate().expect("iterate");
    assert!(!runner.app().is_ctrl_down());
    assert!(runner.sketch().input_calls().is_empty());
}

#[test]
fn shift_space_toggles_pause_and_is_consumed() {
    let mut runner = runner();
    runner.backend_mut().push(key_down(code::SPACE, KeyMod::SHIFT));
    runner.iterate().expect("iterate");

    assert!(runner.app().paused());
    assert!(runner.app().held_keys().is_empty());
    assert!(runner.sketch().input_calls().is_empty());

    runner.backend_mut().push(key_down(code::SPACE, KeyMod::SHIFT));
    runner.iterate().expect("iterate");
    assert!(!runner.app().paused());
}

#[test]
fn held_keys_repeat_after_each_step() {
    let mut runner = runner();
    runner
        .backend_mut()
        .push(key_down(letter('a'), KeyMod::empty()));
    // The press and the first tick share 0 ms, the next tick is at 24 ms.
    for _ in 0..2 {
        runner.iterate().expect("iterate");
    }

    assert_eq!(
        runner.sketch().calls,
        vec!["setup", "press a", "step", "hold a", "step", "hold a"]
    );

    runner.backend_mut().push(key_up(letter('a'), KeyMod::empty()));
    runner.iterate().expect("iterate");
    assert_eq!(runner.sketch().count("release a"), 1);
    assert_eq!(runner.sketch().count("hold a"), 2);
}

#[test]
fn releasing_shift_first_does_not_leave_a_letter_stuck() {
    let mut runner = runner();
    runner.backend_mut().push(key_down(letter('a'), KeyMod::SHIFT));
    runner.backend_mut().push(key_up(letter('a'), KeyMod::empty()));
    runner.iterate().expect("iterate");

    assert!(runner.app().held_keys().is_empty());
    assert_eq!(runner.sketch().input_calls(), vec!["press A", "release a"]);
}

#[test]
fn focus_loss_releases_every_key() {
    let mut runner = runner();
    runner.backend_mut().push(key_down(letter('w'), KeyMod::empty()));
    runner.backend_mut().push(key_down(code::LEFT_CTRL, KeyMod::CTRL));
    runner.iterate().expect("iterate");
    assert!(runner.app().is_key_held("w"));

    runner.backend_mut().push(InputEvent::FocusLost);
    runner.iterate().expect("iterate");
    assert!(runner.app().held_keys().is_empty());
    assert!(!runner.app().is_ctrl_down());
}

#[test]
fn mouse_motion_routes_by_buttons() {
    let mut runner = runner();
    runner.backend_mut().push(motion(3.0, 4.0, MouseButtons::NONE));
    runner.backend_mut().push(mouse_down(3.0, 4.0));
    runner.backend_mut().push(motion(5.0, 6.0, MouseButtons::PRIMARY));
    runner.backend_mut().push(motion(
        7.0,
        8.0,
        MouseButtons {
            secondary: true,
            ..MouseButtons::NONE
        },
    ));
    runner.backend_mut().push(mouse_up(5.0, 6.0));
    runner.backend_mut().push(InputEvent::MouseDown {
        x: 1.0,
        y: 1.0,
        button: MouseButton::Secondary,
    });
    runner.iterate().expect("iterate");

    assert_eq!(
        runner.sketch().input_calls(),
        vec![
            "mouse move 3 4",
            "mouse press 3 4",
            "mouse drag 5 6",
            "mouse release 5 6",
        ]
    );
    assert_eq!(runner.app().inspector().pointer(), Some((7.0, 8.0)));
}

#[test]
fn paused_skips_steps_but_keeps_input() {
    let mut runner = runner();
    runner.app_mut().set_paused(true);
    runner.backend_mut().push(mouse_down(1.0, 1.0));
    runner.iterate().expect("iterate");
    runner.iterate().expect("iterate");

    assert_eq!(runner.sketch().count("step"), 0);
    assert_eq!(runner.sketch().input_calls(), vec!["mouse press 1 1"]);
    assert!(runner.app().should_draw_inspector());
}

#[test]
fn paused_keeps_key_callbacks_but_not_hold() {
    let mut runner = runner();
    runner.app_mut().set_paused(true);
    runner
        .backend_mut()
        .push(key_down(letter('a'), KeyMod::empty()));
    runner.iterate().expect("iterate");
    runner.iterate().expect("iterate");
    assert!(runner.app().is_key_held("a"));
    assert!(runner.clock().tick_count() >= 2);

    runner.backend_mut().push(key_up(letter('a'), KeyMod::empty()));
    runner.iterate().expect("iterate");

    assert_eq!(runner.sketch().calls, vec!["setup", "press a", "release a"]);
    assert!(runner.app().held_keys().is_empty());
}

#[test]
fn stopped_ignores_input_but_still_quits() {
    let mut runner = runner();
    runner.app_mut().stop();
    runner.backend_mut().push(key_down(letter('a'), KeyMod::empty()));
    runner.backend_mut().push(mouse_down(1.0, 1.0));
    runner.backend_mut().push(motion(2.0, 3.0, MouseButtons::NONE));
    runner.backend_mut().push_at(100, InputEvent::Quit);

    runner.iterate().expect("iterate");
    assert!(runner.sketch().input_calls().is_empty());
    assert_eq!(runner.sketch().count("step"), 0);
    assert!(runner.app().held_keys().is_empty());
    assert_eq!(runner.app().inspector().pointer(), Some((2.0, 3.0)));

    while !runner.app().quitting() {
        runner.iterate().expect("iterate");
    }
    assert!(runner.backend().ticks_ms() >= 100);
}

#[test]
fn quit_after_frames_ends_run() {
    let app = App::new(&test_config()).expect("app");
    let backend = HeadlessBackend::new().quit_after_frames(3);
    let runner = Runner::new(app, backend, RecordingSketch::default());
    runner.run().expect("run");
}

#[test]
fn caption_follows_title() {
    let mut runner = runner();
    runner.iterate().expect("iterate");
    assert_eq!(runner.backend().caption(), "Test");

    runner.app_mut().set_title("Renamed");
    runner.iterate().expect("iterate");
    assert_eq!(runner.backend().caption(), "Renamed");
}

#[test]
fn frames_show_background_and_shapes() {
    let mut runner = runner();
    runner.iterate().expect("iterate");
    assert!(runner.backend().last_frame().iter().all(|px| *px == 0x00FFFFFF));

    let rect = Shape::rect(0.0, 0.0, 10.0, 10.0)
        .with("fill", Color::rgb(255, 0, 0))
        .expect("fill");
    runner.app().add(&rect).expect("add");
    runner.iterate().expect("iterate");

    let frame = runner.backend().last_frame();
    assert_eq!(frame[5 * 40 + 5], 0x00FF0000);
    assert_eq!(frame[20 * 40 + 30], 0x00FFFFFF);
}

#[test]
fn screenshot_from_a_callback_does_not_deadlock() {
    let path = std::env::temp_dir()
        .join(format!("easel-callback-shot-{}.png", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let sketch = RecordingSketch {
        screenshot_on_step: Some(path.clone()),
        ..RecordingSketch::default()
    };
    let mut runner = runner_with(&test_config(), sketch);
    runner.iterate().expect("iterate");

    assert!(path.is_file());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn group_reads_as_a_shape_and_stopped_does_not_read() {
    let mut runner = runner();
    let rect = Shape::rect(0.0, 0.0, 1.0, 1.0);
    runner.app().add(&rect).expect("add");

    let group = runner.app().get("group").expect("group");
    let group = group.as_shape("App.group").expect("shape");
    assert!(group.ptr_eq(runner.app().group()));
    assert_eq!(group.children(), vec![rect]);

    runner.app_mut().stop();
    runner.app_mut().stop();
    assert!(runner.app().stopped());
    assert!(runner.app().get("stopped").expect_err("stopped").is_usage());
}

#[test]
fn max_shape_count_limits_the_top_level_group() {
    let config = AppConfig {
        max_shape_count: 2,
        ..test_config()
    };
    let mut runner = runner_with(&config, RecordingSketch::default());
    let app = runner.app_mut();

    app.add(&Shape::rect(0.0, 0.0, 1.0, 1.0)).expect("first");
    app.add(&Shape::label("hi", 10.0, 10.0)).expect("second");
    let err = app
        .add(&Shape::circle(0.0, 0.0, 1.0))
        .expect_err("third");
    assert!(err.is_usage());

    app.set("maxShapeCount", 3).expect("raise");
    app.add(&Shape::circle(0.0, 0.0, 1.0)).expect("third");
    assert_eq!(app.shape_count(), 3);
}

#[test]
fn read_only_properties_are_usage_errors() {
    let mut runner = runner();
    let app = runner.app_mut();

    for name in ["group", "stopped", "width", "height", "isCtrlKeyDown"] {
        let err = app.set(name, 1.0).expect_err(name);
        assert!(err.is_usage());
        assert_eq!(err.to_string(), format!("App.{} is readonly", name));
    }
}

#[test]
fn steps_per_second_must_be_positive() {
    let mut runner = runner();
    let app = runner.app_mut();

    assert!(app.set("stepsPerSecond", 0.0).is_err());
    assert!(app.set("stepsPerSecond", -5.0).is_err());
    app.set("stepsPerSecond", 60.0).expect("set");
    assert_eq!(app.steps_per_second(), 60.0);
}

#[test]
fn queued_text_inputs_answer_in_order() {
    let mut runner = runner();
    let app = runner.app_mut();
    app.set_text_inputs(["a", "b"]);

    assert_eq!(app.get_text_input("first").expect("first"), "a");
    assert_eq!(app.get_text_input("second").expect("second"), "b");
    assert!(app.text_inputs().is_empty());
}

#[test]
fn text_inputs_property_requires_strings() {
    let mut runner = runner();
    let app = runner.app_mut();

    let err = app
        .set("textInputs", vec![Value::from("a"), Value::from(2.0)])
        .expect_err("number in list");
    assert!(err.to_string().starts_with("Arguments to setTextInputs"));

    app.set("textInputs", vec![Value::from("x")]).expect("set");
    assert_eq!(app.text_inputs(), vec!["x".to_string()]);
}
