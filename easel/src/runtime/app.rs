use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use indexmap::IndexSet;

use super::modal::{ModalCommand, ModalPool, ModalRequest};
use super::state::{self, RunState};
use crate::core::config::{self, AppConfig};
use crate::core::error::{Error, Result};
use crate::core::logging::{debug, info};
use crate::render::canvas::{Canvas, DrawingLock};
use crate::render::inspector::{Inspector, InspectorStatus};
use crate::shapes::{Color, Shape, Value};

pub const DEFAULT_PROMPT: &str = "Enter some text";

/// The running program's context, handed to every callback.
///
/// Owns the top-level group, the run flags, held keys, the text-input
/// override queue and the pool of text-input helpers.
pub struct App {
    title: String,
    width: u32,
    height: u32,
    background: Option<Color>,
    steps_per_second: f64,
    refresh_delay: Duration,
    state: RunState,
    held_keys: IndexSet<String>,
    ctrl_down: bool,
    text_inputs: VecDeque<String>,
    modal_pool: ModalPool,
    inspector: Inspector,
    pub inspector_enabled: bool,
    pub always_show_inspector: bool,
    max_shape_count: usize,
    group: Shape,
    lock: DrawingLock,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let command = ModalCommand::resolve(config.modal_command.as_deref());

        Ok(Self {
            title: config.resolved_title(),
            width: config.width,
            height: config.height,
            background: Some(Color::WHITE),
            steps_per_second: config.steps_per_second,
            refresh_delay: Duration::from_millis(config.refresh_delay_ms),
            state: RunState::default(),
            held_keys: IndexSet::new(),
            ctrl_down: false,
            text_inputs: VecDeque::new(),
            modal_pool: ModalPool::new(command, config.modal_pool_size),
            inspector: Inspector::new(),
            inspector_enabled: config.inspector_enabled,
            always_show_inspector: config.always_show_inspector,
            max_shape_count: config.max_shape_count,
            group: Shape::group([]),
            lock: DrawingLock::new(Canvas::new(config.width, config.height)?),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn left(&self) -> f64 {
        0.0
    }

    pub fn top(&self) -> f64 {
        0.0
    }

    pub fn right(&self) -> f64 {
        self.width as f64
    }

    pub fn bottom(&self) -> f64 {
        self.height as f64
    }

    pub fn center_x(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height as f64 / 2.0
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
    }

    pub fn steps_per_second(&self) -> f64 {
        self.steps_per_second
    }

    /// Takes effect from the next tick check.
    pub fn set_steps_per_second(&mut self, value: f64) -> Result<()> {
        config::validate_steps_per_second(value)?;
        self.steps_per_second = value;
        Ok(())
    }

    pub fn refresh_delay(&self) -> Duration {
        self.refresh_delay
    }

    pub fn paused(&self) -> bool {
        self.state.paused()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state.set_paused(paused);
    }

    pub(crate) fn toggle_pause(&mut self) -> bool {
        let paused = self.state.toggle_pause();
        debug!("{}", if paused { "Paused" } else { "Resumed" });
        paused
    }

    pub fn stopped(&self) -> bool {
        self.state.stopped()
    }

    /// Permanently disables user callbacks. The window stays open.
    pub fn stop(&mut self) {
        if !self.state.stopped() {
            info!("Stopped");
        }
        self.state.stop();
    }

    /// Ends the run loop after the current iteration.
    pub fn quit(&mut self) {
        self.state.quit();
    }

    pub fn quitting(&self) -> bool {
        self.state.quitting()
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Keys currently held, in press order.
    pub fn held_keys(&self) -> Vec<String> {
        self.held_keys.iter().cloned().collect()
    }

    pub fn is_key_held(&self, key: &str) -> bool {
        self.held_keys.contains(key)
    }

    pub(crate) fn press_key(&mut self, key: &str) {
        self.held_keys.insert(key.to_string());
    }

    /// Drops both case forms, so releasing shift before a letter cannot
    /// leave the letter stuck.
    pub(crate) fn release_key(&mut self, key: &str) {
        self.held_keys.shift_remove(&key.to_lowercase());
        self.held_keys.shift_remove(&key.to_uppercase());
    }

    pub(crate) fn release_all_keys(&mut self) {
        self.held_keys.clear();
        self.ctrl_down = false;
    }

    pub fn is_ctrl_down(&self) -> bool {
        self.ctrl_down
    }

    pub(crate) fn set_ctrl_down(&mut self, down: bool) {
        self.ctrl_down = down;
    }

    pub fn text_inputs(&self) -> Vec<String> {
        self.text_inputs.iter().cloned().collect()
    }

    /// Replaces the override queue. While it is non-empty,
    /// [`App::get_text_input`] answers from it instead of prompting.
    pub fn set_text_inputs<I, S>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_inputs = inputs.into_iter().map(Into::into).collect();
    }

    /// Asks the user for a line of text, blocking until they answer.
    pub fn get_text_input(&mut self, prompt: &str) -> Result<String> {
        if let Some(queued) = self.text_inputs.pop_front() {
            return Ok(queued);
        }
        let request = ModalRequest::new(self.title.clone(), prompt);
        self.modal_pool.request(&request)
    }

    pub fn modal_pool(&self) -> &ModalPool {
        &self.modal_pool
    }

    pub(crate) fn modal_pool_mut(&mut self) -> &mut ModalPool {
        &mut self.modal_pool
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub(crate) fn inspector_mut(&mut self) -> &mut Inspector {
        &mut self.inspector
    }

    pub fn should_draw_inspector(&self) -> bool {
        state::inspector_visible(
            self.inspector_enabled,
            self.state.paused(),
            self.state.stopped(),
            self.always_show_inspector,
            self.ctrl_down,
        )
    }

    pub(crate) fn inspector_status(&self) -> InspectorStatus {
        InspectorStatus {
            paused: self.state.paused(),
            stopped: self.state.stopped(),
        }
    }

    /// The top-level group. Draw order is insertion order.
    pub fn group(&self) -> &Shape {
        &self.group
    }

    /// Adds `shape` on top. Fails once the top-level group, nested shapes
    /// included, would hold more than `maxShapeCount` shapes.
    pub fn add(&self, shape: &Shape) -> Result<()> {
        let incoming = if shape.has_ancestor(&self.group) {
            0
        } else {
            1 + shape.descendant_count()
        };
        let total = self.shape_count() + incoming;
        if total > self.max_shape_count {
            return Err(Error::usage(format!(
                "Too many shapes: adding {} would make {}, over maxShapeCount {}",
                shape.kind(),
                total,
                self.max_shape_count
            )));
        }
        self.group.add(shape)
    }

    /// Shapes under the top-level group, nested ones included.
    pub fn shape_count(&self) -> usize {
        self.group.descendant_count()
    }

    pub fn max_shape_count(&self) -> usize {
        self.max_shape_count
    }

    /// Shapes already added stay when the limit drops below the count.
    pub fn set_max_shape_count(&mut self, value: usize) -> Result<()> {
        config::validate_max_shape_count(value)?;
        self.max_shape_count = value;
        Ok(())
    }

    pub fn remove(&self, shape: &Shape) -> bool {
        self.group.remove(shape)
    }

    pub fn drawing_lock(&self) -> &DrawingLock {
        &self.lock
    }

    /// Saves the most recently rendered frame as a PNG.
    pub fn get_screenshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.lock.screenshot(path.as_ref())
    }

    /// Reads a property by its user-facing name.
    pub fn get(&self, name: &str) -> Result<Value> {
        Ok(match name {
            "title" => Value::Text(self.title.clone()),
            "width" => Value::from(self.width),
            "height" => Value::from(self.height),
            "left" => Value::Number(self.left()),
            "top" => Value::Number(self.top()),
            "right" => Value::Number(self.right()),
            "bottom" => Value::Number(self.bottom()),
            "centerX" => Value::Number(self.center_x()),
            "centerY" => Value::Number(self.center_y()),
            "background" => Value::from(self.background),
            "stepsPerSecond" => Value::Number(self.steps_per_second),
            "paused" => Value::Bool(self.paused()),
            "maxShapeCount" => Value::Number(self.max_shape_count as f64),
            "inspectorEnabled" => Value::Bool(self.inspector_enabled),
            "alwaysShowInspector" => Value::Bool(self.always_show_inspector),
            "isCtrlKeyDown" => Value::Bool(self.ctrl_down),
            "textInputs" => Value::List(
                self.text_inputs.iter().cloned().map(Value::Text).collect(),
            ),
            "group" => Value::Shape(self.group.clone()),
            "stopped" => {
                return Err(Error::usage(
                    "App.stopped is not a property; use App::stopped()",
                ));
            }
            _ => return Err(unknown(name)),
        })
    }

    /// Writes a property by its user-facing name. `group`, `stopped` and the
    /// window geometry are read-only.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let label = format!("App.{}", name);
        match name {
            "group" | "stopped" | "width" | "height" | "left" | "top"
            | "right" | "bottom" | "centerX" | "centerY" | "isCtrlKeyDown" => {
                return Err(Error::read_only("App", name));
            }
            "title" => self.title = value.as_text(&label)?,
            "background" => self.background = value.as_fill(&label)?,
            "stepsPerSecond" => {
                self.set_steps_per_second(value.as_number(&label)?)?
            }
            "paused" => self.set_paused(value.as_bool(&label)?),
            "maxShapeCount" => {
                let count = value.as_number(&label)?;
                if count.fract() != 0.0 || count < 1.0 {
                    return Err(Error::usage(format!(
                        "{} must be a whole number of at least 1, got {}",
                        label, count
                    )));
                }
                self.set_max_shape_count(count as usize)?;
            }
            "inspectorEnabled" => self.inspector_enabled = value.as_bool(&label)?,
            "alwaysShowInspector" => {
                self.always_show_inspector = value.as_bool(&label)?
            }
            "textInputs" => {
                let Value::List(items) = value else {
                    return Err(Error::usage(format!(
                        "{} must be a list of strings",
                        label
                    )));
                };
                let inputs = items
                    .into_iter()
                    .map(|item| match item {
                        Value::Text(text) => Ok(text),
                        other => Err(Error::usage(format!(
                            "Arguments to setTextInputs must be strings. \
                             {:?} is not a string.",
                            other
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.set_text_inputs(inputs);
            }
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.modal_pool.shutdown();
    }
}

fn unknown(name: &str) -> Error {
    Error::usage(format!("App has no property named '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let config = AppConfig {
            title: Some("Test".to_string()),
            width: 200,
            height: 100,
            modal_pool_size: 0,
            ..AppConfig::default()
        };
        App::new(&config).unwrap()
    }

    #[test]
    fn derived_edges_follow_size() {
        let app = app();
        assert_eq!(app.right(), 200.0);
        assert_eq!(app.bottom(), 100.0);
        assert_eq!(app.center_x(), 100.0);
        assert_eq!(app.center_y(), 50.0);
        assert_eq!(app.get("centerY").unwrap(), Value::Number(50.0));
    }

    #[test]
    fn group_and_stopped_are_read_only() {
        let mut app = app();
        let err = app.set("group", Value::None).unwrap_err();
        assert_eq!(err.to_string(), "App.group is readonly");

        let err = app.set("stopped", false).unwrap_err();
        assert_eq!(err.to_string(), "App.stopped is readonly");
        assert!(!app.stopped());

        app.stop();
        app.stop();
        assert!(app.stopped());
        let err = app.get("stopped").unwrap_err();
        assert!(err.is_usage());

        assert_eq!(app.get("group").unwrap(), Value::Shape(app.group().clone()));
    }

    #[test]
    fn max_shape_count_caps_add() {
        let mut app = app();
        app.set("maxShapeCount", 3).unwrap();
        assert_eq!(app.get("maxShapeCount").unwrap(), Value::Number(3.0));

        let pair = Shape::group([
            Shape::rect(0.0, 0.0, 1.0, 1.0),
            Shape::rect(1.0, 1.0, 1.0, 1.0),
        ]);
        app.add(&pair).unwrap();
        assert_eq!(app.shape_count(), 3);

        let extra = Shape::circle(0.0, 0.0, 1.0);
        let err = app.add(&extra).unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("maxShapeCount 3"));
        assert!(extra.parent().is_none());

        // Re-adding a member only reorders it.
        app.add(&pair.children()[0]).unwrap();
        assert_eq!(app.shape_count(), 3);

        assert!(app.set("maxShapeCount", 0).is_err());
        assert!(app.set("maxShapeCount", 2.5).is_err());
    }

    #[test]
    fn text_inputs_are_served_in_order() {
        let mut app = app();
        app.set_text_inputs(["a", "b"]);
        assert_eq!(app.get_text_input("?").unwrap(), "a");
        assert_eq!(app.get_text_input("?").unwrap(), "b");
        assert!(app.text_inputs().is_empty());
    }

    #[test]
    fn text_inputs_property_rejects_non_strings() {
        let mut app = app();
        let err = app
            .set(
                "textInputs",
                Value::List(vec![Value::from("ok"), Value::from(3)]),
            )
            .unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("must be strings"));
        assert!(app.text_inputs().is_empty());

        app.set("textInputs", Value::List(vec!["x".into()])).unwrap();
        assert_eq!(app.text_inputs(), vec!["x"]);
    }

    #[test]
    fn steps_per_second_must_be_positive() {
        let mut app = app();
        assert!(app.set_steps_per_second(0.0).unwrap_err().is_usage());
        assert!(app.set("stepsPerSecond", -5).is_err());
        app.set("stepsPerSecond", 60).unwrap();
        assert_eq!(app.steps_per_second(), 60.0);
    }

    #[test]
    fn release_drops_both_cases() {
        let mut app = app();
        app.press_key("A");
        app.press_key("b");
        app.release_key("a");
        assert_eq!(app.held_keys(), vec!["b"]);
    }

    #[test]
    fn added_shapes_join_the_top_level_group() {
        let app = app();
        let rect = Shape::rect(0.0, 0.0, 5.0, 5.0);
        app.add(&rect).unwrap();
        assert!(rect.parent().unwrap().ptr_eq(app.group()));
        assert!(app.remove(&rect));
    }

    #[test]
    fn unknown_property() {
        let app = app();
        assert_eq!(
            app.get("nope").unwrap_err().to_string(),
            "App has no property named 'nope'"
        );
    }
}
