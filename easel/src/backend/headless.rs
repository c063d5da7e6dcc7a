use std::collections::VecDeque;
use std::time::Duration;

use super::{Backend, Frame};
use crate::core::error::Result;
use crate::runtime::events::InputEvent;

/// A window-less backend with a manual clock. Events are scripted up front
/// and become visible once the clock reaches their timestamp.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    now_ms: u64,
    scheduled: VecDeque<(u64, InputEvent)>,
    caption: String,
    frames_presented: u64,
    last_frame: Vec<u32>,
    quit_after_frames: Option<u64>,
    quit_sent: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered on the next poll.
    pub fn push(&mut self, event: InputEvent) {
        let now = self.now_ms;
        self.push_at(now, event);
    }

    /// Delivered on the first poll at or after `at_ms`. Events with equal
    /// timestamps keep their push order.
    pub fn push_at(&mut self, at_ms: u64, event: InputEvent) {
        let index = self.scheduled.partition_point(|(at, _)| *at <= at_ms);
        self.scheduled.insert(index, (at_ms, event));
    }

    /// Emits a quit event after `frames` presents.
    pub fn quit_after_frames(mut self, frames: u64) -> Self {
        self.quit_after_frames = Some(frames);
        self
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_frame(&self) -> &[u32] {
        &self.last_frame
    }

    pub fn pending(&self) -> usize {
        self.scheduled.len()
    }
}

impl Backend for HeadlessBackend {
    /// Advances the clock by the full timeout, or only up to the next
    /// scheduled event when one comes sooner.
    fn wait(&mut self, timeout: Duration) -> Result<()> {
        let timeout = timeout.as_millis() as u64;
        let step = match self.scheduled.front() {
            Some((at, _)) => at.saturating_sub(self.now_ms).min(timeout),
            None => timeout,
        };
        self.now_ms += step;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some((at, _)) = self.scheduled.front() {
            if *at > self.now_ms {
                break;
            }
            if let Some((_, event)) = self.scheduled.pop_front() {
                events.push(event);
            }
        }

        if !self.quit_sent
            && self
                .quit_after_frames
                .is_some_and(|n| self.frames_presented >= n)
        {
            self.quit_sent = true;
            events.push(InputEvent::Quit);
        }

        events
    }

    fn ticks_ms(&self) -> u64 {
        self.now_ms
    }

    fn set_caption(&mut self, title: &str) {
        self.caption = title.to_string();
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.frames_presented += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(frame.pixels);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_events_wait_for_the_clock() {
        let mut backend = HeadlessBackend::new();
        backend.push_at(50, InputEvent::FocusLost);
        backend.push(InputEvent::Quit);

        assert_eq!(backend.poll_events(), vec![InputEvent::Quit]);

        backend.wait(Duration::from_millis(100)).unwrap();
        assert_eq!(backend.ticks_ms(), 50);
        assert_eq!(backend.poll_events(), vec![InputEvent::FocusLost]);
    }

    #[test]
    fn quits_after_frame_budget() {
        let mut backend = HeadlessBackend::new().quit_after_frames(1);
        assert!(backend.poll_events().is_empty());

        let pixels = [0u32; 4];
        backend
            .present(&Frame {
                pixels: &pixels,
                width: 2,
                height: 2,
            })
            .unwrap();

        assert_eq!(backend.poll_events(), vec![InputEvent::Quit]);
        assert!(backend.poll_events().is_empty());
    }
}
