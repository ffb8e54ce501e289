use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
enum StopwatchState {
    Idle,
    Running(Instant),
    Stopped(Duration),
}

/// Load-time readout next to the sample list. `start_time` restarts from
/// zero; `stop_time` freezes the reading until the next start.
pub struct Stopwatch {
    pos_x: f32,
    state: StopwatchState,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self { pos_x: 0.0, state: StopwatchState::Idle }
    }

    pub fn set_pos_x(&mut self, pos_x: f32) {
        self.pos_x = pos_x;
    }

    pub fn pos_x(&self) -> f32 {
        self.pos_x
    }

    pub fn start_time(&mut self) {
        self.state = StopwatchState::Running(Instant::now());
    }

    pub fn stop_time(&mut self) {
        if let StopwatchState::Running(started) = self.state {
            self.state = StopwatchState::Stopped(started.elapsed());
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, StopwatchState::Running(_))
    }

    pub fn current(&self) -> Option<Duration> {
        match self.state {
            StopwatchState::Idle => None,
            StopwatchState::Running(started) => Some(started.elapsed()),
            StopwatchState::Stopped(elapsed) => Some(elapsed),
        }
    }

    pub fn ui(&self, ctx: &egui::Context) {
        let Some(elapsed) = self.current() else {
            return;
        };
        egui::Area::new(egui::Id::new("load_stopwatch"))
            .fixed_pos(egui::pos2(self.pos_x + 8.0, 4.0))
            .show(ctx, |ui| {
                ui.label(format!("{:.3} s", elapsed.as_secs_f64()));
            });
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
