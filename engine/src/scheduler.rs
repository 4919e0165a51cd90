//! Frame scheduling seam.
//!
//! The engine never owns a render loop. A front end implements
//! [`FrameScheduler`] on top of its own frame callback (e.g. a browser's
//! animation frame) and hands each delivered token back to
//! [`SpinSession::on_frame`](crate::session::SpinSession::on_frame).

use std::collections::VecDeque;

/// Identifies the spin a scheduled frame belongs to. Frames carrying an
/// outdated token are dropped by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken {
    generation: u64,
}

impl FrameToken {
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub trait FrameScheduler {
    /// Wall-clock time in milliseconds. Must not go backwards within a spin.
    fn now_ms(&self) -> f64;
    /// Asks for `token` to be delivered on the next frame.
    fn request_frame(&mut self, token: FrameToken);
    /// Withdraws a pending request, if the backend supports it.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Deterministic scheduler driven by hand. Time only moves when told to.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now_ms: f64,
    pending: VecDeque<FrameToken>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            pending: VecDeque::new(),
        }
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms > 0.0 {
            self.now_ms += elapsed_ms;
        }
    }

    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Advances the clock by `step_ms` and hands out the oldest pending frame.
    pub fn next_frame(&mut self, step_ms: f64) -> Option<FrameToken> {
        let token = self.pending.pop_front()?;
        self.advance(step_ms);
        Some(token)
    }
}

impl FrameScheduler for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.pending.push_back(token);
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|pending| *pending != token);
    }
}
