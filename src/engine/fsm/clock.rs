// Animation clock: looping frame index from elapsed time

/// Frame index reached after `elapsed` seconds at `fps`, looping over `len` frames
///
/// Computed as `floor(elapsed * fps) mod len`. The index is never clamped to
/// the last frame, so playback always wraps around. Returns `None` for an
/// empty sequence. Negative or non-finite elapsed times read as frame 0.
pub fn frame_index(elapsed: f32, fps: f32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let frames = (elapsed * fps).floor();
    if !frames.is_finite() || frames < 0.0 {
        return Some(0);
    }
    Some(frames as usize % len)
}

/// Start time and frame rate of one animation activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    start_time: f32,
    fps: f32,
}

impl AnimationClock {
    /// Create a clock running at `fps`, started at time 0
    pub fn new(fps: f32) -> Self {
        Self {
            start_time: 0.0,
            fps,
        }
    }

    /// Restart the clock at `now`
    pub fn start(&mut self, now: f32) {
        self.start_time = now;
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Seconds since the clock was started
    pub fn elapsed(&self, now: f32) -> f32 {
        now - self.start_time
    }

    /// Frame index at `now` for a sequence of `len` frames
    pub fn frame_index(&self, now: f32, len: usize) -> Option<usize> {
        frame_index(self.elapsed(now), self.fps, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_frame_at_half_second() {
        // 4 frames at 6 fps: 0.5s is 3 whole frames in
        assert_eq!(frame_index(0.5, 6.0, 4), Some(3));
    }

    #[test]
    fn test_index_wraps_instead_of_clamping() {
        assert_eq!(frame_index(0.75, 6.0, 4), Some(0));
        assert_eq!(frame_index(1.0, 6.0, 4), Some(2));
    }

    #[test]
    fn test_empty_sequence_has_no_index() {
        assert_eq!(frame_index(10.0, 6.0, 0), None);
    }

    #[test]
    fn test_negative_elapsed_reads_first_frame() {
        assert_eq!(frame_index(-1.0, 6.0, 4), Some(0));
        assert_eq!(frame_index(f32::NAN, 6.0, 4), Some(0));
    }

    #[test]
    fn test_clock_uses_start_time() {
        let mut clock = AnimationClock::new(10.0);
        clock.start(5.0);
        assert_eq!(clock.start_time(), 5.0);
        assert_eq!(clock.frame_index(5.0, 3), Some(0));
        assert_eq!(clock.frame_index(5.15, 3), Some(1));
        assert_eq!(clock.frame_index(5.35, 3), Some(0));
    }

    #[test]
    fn test_sampling_every_half_frame_never_skips() {
        let fps = 6.0;
        let len = 4;
        let step = 1.0 / (2.0 * fps);
        let mut previous = frame_index(0.0, fps, len).unwrap();
        let mut seen = vec![false; len];
        seen[previous] = true;

        for k in 1..100 {
            let t = k as f32 * step + 0.25 / fps;
            let index = frame_index(t, fps, len).unwrap();
            let advance = (index + len - previous) % len;
            assert!(advance <= 1, "skipped from {} to {} at t={}", previous, index, t);
            seen[index] = true;
            previous = index;
        }

        assert!(seen.iter().all(|s| *s), "every frame should be shown");
    }

    #[test]
    fn test_index_matches_formula() {
        for k in 0..50 {
            let t = k as f32 * 0.037;
            let expected = (t * 10.0).floor() as usize % 7;
            assert_eq!(frame_index(t, 10.0, 7), Some(expected));
        }
    }
}
