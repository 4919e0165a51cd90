use rand::Rng;
use shared::{active_sectors, ProbabilityDistribution, Sector, SpinResult, SpinStatus};
use tracing::{debug, info, warn};

use crate::animator::{AnimationState, Frame, SpinAnimation};
use crate::config::{ConfigError, EngineConfig};
use crate::distribution;
use crate::error::SpinError;
use crate::resolver;
use crate::sampler::{self, uniform};
use crate::scheduler::{FrameScheduler, FrameToken};

/// Drives one wheel: accepts spin commands, advances the animation on each
/// delivered frame, and keeps the last result.
///
/// Everything runs on the caller's thread. A frame token is only honoured if
/// it belongs to the spin currently in flight, so frames that were already
/// queued when a spin got cancelled or reset can never touch the state.
pub struct SpinSession<S: FrameScheduler, R: Rng> {
    config: EngineConfig,
    scheduler: S,
    rng: R,
    state: AnimationState,
    generation: u64,
    current_angle: f64,
    last_result: Option<SpinResult>,
    sampled_sector_id: Option<String>,
}

impl<S: FrameScheduler, R: Rng> SpinSession<S, R> {
    pub fn new(scheduler: S, rng: R) -> Self {
        Self::build(EngineConfig::default(), scheduler, rng)
    }

    /// Like `new`, with custom animation bounds. Rejects bounds that are not
    /// finite, negative, or inverted, since a spin drawn from them could never
    /// finish.
    pub fn with_config(config: EngineConfig, scheduler: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, scheduler, rng))
    }

    fn build(config: EngineConfig, scheduler: S, rng: R) -> Self {
        Self {
            config,
            scheduler,
            rng,
            state: AnimationState::Idle,
            generation: 0,
            current_angle: 0.0,
            last_result: None,
            sampled_sector_id: None,
        }
    }

    /// Starts a weighted spin. Rejected without any state change while a
    /// spin is running or when no sector is active.
    pub fn spin(&mut self, sectors: &[Sector]) -> Result<(), SpinError> {
        self.ensure_idle()?;
        let active = Self::non_empty_active(sectors)?;
        let sample = sampler::sample(&active, &self.config, &mut self.rng)?;
        self.start(active, sample.index, sample.target_angle);
        Ok(())
    }

    /// Starts a spin that lands on a sector chosen by the caller, e.g. a
    /// prize already decided by an authoritative backend.
    pub fn spin_to_sector(&mut self, sectors: &[Sector], sector_id: &str) -> Result<(), SpinError> {
        self.ensure_idle()?;
        let active = Self::non_empty_active(sectors)?;
        let index = active
            .iter()
            .position(|s| s.id == sector_id)
            .ok_or_else(|| SpinError::UnknownSector(sector_id.to_string()))?;
        let target_angle = sampler::landing_angle(index, active.len(), &self.config, &mut self.rng);
        self.start(active, index, target_angle);
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SpinError> {
        if self.is_spinning() {
            debug!("spin ignored, wheel already spinning");
            return Err(SpinError::ReentrantSpin);
        }
        Ok(())
    }

    fn non_empty_active(sectors: &[Sector]) -> Result<Vec<Sector>, SpinError> {
        let active = active_sectors(sectors);
        if active.is_empty() {
            debug!("spin ignored, no active sectors");
            return Err(SpinError::EmptySectorSet);
        }
        Ok(active)
    }

    fn start(&mut self, active: Vec<Sector>, index: usize, target_angle: f64) {
        let duration_ms = uniform(&mut self.rng, self.config.min_duration_ms, self.config.max_duration_ms);
        let started_at_ms = self.scheduler.now_ms();

        self.generation += 1;
        self.current_angle = 0.0;
        self.state = AnimationState::Spinning(SpinAnimation::new(active, index, target_angle, duration_ms, started_at_ms));
        self.scheduler.request_frame(self.current_token());

        debug!("spin {} started: target {:.2} over {:.0} ms", self.generation, target_angle, duration_ms);
    }

    fn current_token(&self) -> FrameToken {
        FrameToken::new(self.generation)
    }

    /// Handles one delivered frame. Frames from a cancelled, reset or already
    /// finished spin are dropped with `StaleCallback`.
    pub fn on_frame(&mut self, token: FrameToken) -> Result<(), SpinError> {
        if token != self.current_token() {
            debug!("dropping stale frame from spin {}", token.generation());
            return Err(SpinError::StaleCallback);
        }
        let frame = match &self.state {
            AnimationState::Spinning(animation) => animation.tick(self.scheduler.now_ms()),
            AnimationState::Idle => {
                debug!("dropping frame for finished spin {}", token.generation());
                return Err(SpinError::StaleCallback);
            }
        };

        match frame {
            Frame::InFlight { angle, .. } => {
                self.current_angle = angle;
                self.scheduler.request_frame(token);
            }
            Frame::Finished { angle } => {
                self.current_angle = angle;
                if let AnimationState::Spinning(animation) = std::mem::take(&mut self.state) {
                    self.finish(animation);
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, animation: SpinAnimation) {
        let target_angle = animation.target_angle();
        let winner = match resolver::resolve_active(target_angle, animation.sectors()) {
            Ok(winner) => winner.clone(),
            Err(e) => {
                warn!("could not resolve finished spin: {}", e);
                return;
            }
        };
        let sampled_id = animation.sectors().get(animation.sampled_index()).map(|s| s.id.clone());
        if sampled_id.as_deref() != Some(winner.id.as_str()) {
            warn!(sampled = ?sampled_id, landed = %winner.id, "wheel stopped outside the sampled sector");
        }

        let result = SpinResult::new(winner, target_angle);
        info!(
            sector = %result.winner_sector.display_name,
            angle = target_angle,
            prize = result.is_winner,
            "spin landed"
        );
        self.sampled_sector_id = sampled_id;
        self.last_result = Some(result);
    }

    /// Stops a running spin without producing a result. Returns whether a
    /// spin was actually cancelled.
    pub fn cancel(&mut self) -> bool {
        if !self.is_spinning() {
            return false;
        }
        self.scheduler.cancel_frame(self.current_token());
        // Anything still queued under the old token is now stale
        self.generation += 1;
        self.state = AnimationState::Idle;
        self.current_angle = 0.0;
        debug!("spin cancelled");
        true
    }

    /// Cancels any running spin and forgets the last result.
    pub fn reset(&mut self) {
        self.cancel();
        self.last_result = None;
        self.sampled_sector_id = None;
        self.current_angle = 0.0;
    }

    pub fn resolve_winner(&self, angle: f64, sectors: &[Sector]) -> Result<Sector, SpinError> {
        resolver::resolve(angle, sectors)
    }

    pub fn distribution(&self, sectors: &[Sector]) -> ProbabilityDistribution {
        distribution::distribute(sectors)
    }

    pub fn auto_distribute(&self, sectors: &[Sector]) -> Vec<Sector> {
        distribution::auto_distribute(sectors)
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, AnimationState::Spinning(_))
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn progress(&self) -> f64 {
        match &self.state {
            AnimationState::Spinning(animation) => animation.progress(self.scheduler.now_ms()),
            AnimationState::Idle if self.last_result.is_some() => 1.0,
            AnimationState::Idle => 0.0,
        }
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    /// Id of the sector the sampler picked for the last finished spin. It
    /// matches `last_result().winner_sector.id` unless the landing angle
    /// resolved somewhere else.
    pub fn sampled_sector_id(&self) -> Option<&str> {
        self.sampled_sector_id.as_deref()
    }

    pub fn status(&self) -> SpinStatus {
        SpinStatus {
            is_spinning: self.is_spinning(),
            current_angle: self.current_angle,
            progress: self.progress(),
            last_result: self.last_result.clone(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
