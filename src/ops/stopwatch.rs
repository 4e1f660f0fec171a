use std::time::Duration;

/// Elapsed-time counter with a run/stop flag.
///
/// The counter only moves when the owner feeds it elapsed time; it has no
/// clock of its own and never touches the task list. Readouts are whole
/// seconds whatever the feeding granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: Duration,
    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Start if stopped, stop if running. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Zero the counter and stop
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
    }

    /// Add `by` to the elapsed time. Ignored while stopped.
    pub fn advance(&mut self, by: Duration) {
        if self.running {
            self.elapsed = self.elapsed.saturating_add(by);
        }
    }

    pub fn display(&self) -> String {
        format_time(self.elapsed_secs())
    }
}

/// `MM:SS`, zero-padded below 10. Minutes are not wrapped into hours.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn format_pads_and_does_not_wrap() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(599), "09:59");
        assert_eq!(format_time(600), "10:00");
        assert_eq!(format_time(6000), "100:00");
    }

    #[test]
    fn advance_only_while_running() {
        let mut sw = Stopwatch::new();
        sw.advance(SEC * 5);
        assert_eq!(sw.elapsed_secs(), 0);

        sw.start();
        sw.advance(SEC * 3);
        assert_eq!(sw.elapsed_secs(), 3);

        sw.stop();
        sw.advance(SEC * 3);
        assert_eq!(sw.elapsed_secs(), 3);
    }

    #[test]
    fn toggle_flips_running() {
        let mut sw = Stopwatch::new();
        assert!(sw.toggle());
        assert!(sw.is_running());
        assert!(!sw.toggle());
        assert!(!sw.is_running());
    }

    #[test]
    fn sub_second_steps_add_up_to_whole_seconds() {
        let mut sw = Stopwatch::new();
        sw.start();
        for _ in 0..5 {
            sw.advance(Duration::from_millis(250));
        }
        assert_eq!(sw.elapsed_secs(), 1);
        assert_eq!(sw.display(), "00:01");
    }

    #[test]
    fn reset_zeroes_and_stops() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.advance(SEC * 42);
        sw.reset();
        assert_eq!(sw.elapsed_secs(), 0);
        assert!(!sw.is_running());
        assert_eq!(sw.display(), "00:00");
    }
}
