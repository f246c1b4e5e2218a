// Time slots - Equal-width subdivision of the clip duration
// Windows are half-open [start, end) so adjacent slots never overlap

use serde::{Deserialize, Serialize};

/// A half-open time interval [start, end) within a clip, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_s: f64,
    pub end_s: f64,
}

impl TimeWindow {
    pub fn new(start_s: f64, end_s: f64) -> Self {
        debug_assert!(start_s < end_s);
        TimeWindow { start_s, end_s }
    }

    pub fn width_s(&self) -> f64 {
        self.end_s - self.start_s
    }

    /// Whether `t` falls inside the half-open interval
    pub fn contains(&self, t: f64) -> bool {
        self.start_s <= t && t < self.end_s
    }
}

/// Split `duration_s` into `n_slots` contiguous equal-width windows
///
/// Boundaries are computed as fractions of the total, so the last window
/// ends exactly at `duration_s`. Callers validate that the duration is
/// positive and `n_slots >= 1`.
pub fn partition(duration_s: f64, n_slots: usize) -> Vec<TimeWindow> {
    let mut windows = Vec::with_capacity(n_slots);
    for i in 0..n_slots {
        let start = duration_s * i as f64 / n_slots as f64;
        let end = duration_s * (i + 1) as f64 / n_slots as f64;
        windows.push(TimeWindow {
            start_s: start,
            end_s: end,
        });
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_boundaries() {
        let windows = partition(60.0, 4);

        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0], TimeWindow::new(0.0, 15.0));
        assert_eq!(windows[1], TimeWindow::new(15.0, 30.0));
        assert_eq!(windows[2], TimeWindow::new(30.0, 45.0));
        assert_eq!(windows[3], TimeWindow::new(45.0, 60.0));
    }

    #[test]
    fn test_partition_single_slot_covers_clip() {
        let windows = partition(12.5, 1);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start_s, 0.0);
        assert_eq!(windows[0].end_s, 12.5);
    }

    #[test]
    fn test_partition_is_contiguous() {
        let windows = partition(60.0, 7);

        for pair in windows.windows(2) {
            assert_eq!(pair[0].end_s, pair[1].start_s);
        }
        assert_eq!(windows.last().unwrap().end_s, 60.0);
    }

    #[test]
    fn test_window_contains_is_half_open() {
        let window = TimeWindow::new(15.0, 30.0);

        assert!(window.contains(15.0));
        assert!(window.contains(29.999));
        assert!(!window.contains(30.0));
        assert!(!window.contains(14.999));
    }

    #[test]
    fn test_window_width() {
        let window = TimeWindow::new(45.0, 60.0);
        assert_eq!(window.width_s(), 15.0);
    }
}
