/// Run/pause/stop/quit flags gating callback dispatch.
///
/// `stopped` and `quitting` are latches: once set they stay set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunState {
    paused: bool,
    stopped: bool,
    quitting: bool,
}

impl RunState {
    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn quitting(&self) -> bool {
        self.quitting
    }

    pub fn quit(&mut self) {
        self.quitting = true;
    }

    /// Step and key-hold callbacks run only while neither paused nor stopped.
    pub fn steps_enabled(&self) -> bool {
        !self.paused && !self.stopped
    }

    /// Mouse and key callbacks keep running while paused.
    pub fn input_enabled(&self) -> bool {
        !self.stopped
    }
}

pub fn inspector_visible(
    enabled: bool,
    paused: bool,
    stopped: bool,
    always_show: bool,
    ctrl_down: bool,
) -> bool {
    enabled && (paused || stopped || always_show || ctrl_down)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent_and_one_way() {
        let mut state = RunState::default();
        state.stop();
        state.stop();
        state.set_paused(false);
        assert!(state.stopped());
        assert!(!state.input_enabled());
        assert!(!state.steps_enabled());
    }

    #[test]
    fn pause_blocks_steps_but_not_input() {
        let mut state = RunState::default();
        assert!(state.toggle_pause());
        assert!(!state.steps_enabled());
        assert!(state.input_enabled());
        assert!(!state.toggle_pause());
        assert!(state.steps_enabled());
    }

    #[test]
    fn inspector_truth_table() {
        for bits in 0..16u8 {
            let paused = bits & 1 != 0;
            let stopped = bits & 2 != 0;
            let always = bits & 4 != 0;
            let ctrl = bits & 8 != 0;
            let any = bits != 0;

            assert_eq!(
                inspector_visible(true, paused, stopped, always, ctrl),
                any,
                "enabled, bits {:04b}",
                bits
            );
            assert!(!inspector_visible(false, paused, stopped, always, ctrl));
        }
    }
}
