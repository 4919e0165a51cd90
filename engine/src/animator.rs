use shared::Sector;

/// Cubic ease-out: fast start, smooth deceleration into the target.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    InFlight { angle: f64, progress: f64 },
    Finished { angle: f64 },
}

/// One running spin. Holds its own snapshot of the active sectors so the
/// result is resolved against the wheel as it was when the spin started.
#[derive(Debug, Clone)]
pub struct SpinAnimation {
    sectors: Vec<Sector>,
    sampled_index: usize,
    target_angle: f64,
    duration_ms: f64,
    started_at_ms: f64,
}

impl SpinAnimation {
    pub fn new(sectors: Vec<Sector>, sampled_index: usize, target_angle: f64, duration_ms: f64, started_at_ms: f64) -> Self {
        Self {
            sectors,
            sampled_index,
            target_angle,
            duration_ms,
            started_at_ms,
        }
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sampled_index(&self) -> usize {
        self.sampled_index
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    /// Elapsed fraction of the duration in `[0, 1]`, from wall-clock time
    /// rather than frame count so dropped frames don't stretch the spin.
    pub fn progress(&self, now_ms: f64) -> f64 {
        // A duration that can never elapse would keep requesting frames forever
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return 1.0;
        }
        let progress = (now_ms - self.started_at_ms) / self.duration_ms;
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0)
    }

    pub fn tick(&self, now_ms: f64) -> Frame {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            Frame::Finished {
                angle: self.target_angle,
            }
        } else {
            Frame::InFlight {
                angle: ease_out_cubic(progress) * self.target_angle,
                progress,
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Spinning(SpinAnimation),
}
