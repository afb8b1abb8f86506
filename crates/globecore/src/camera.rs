use crate::easing::cubic_in_out;
use crate::geo::framing_position;
use glam::Vec3;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionJob {
    pub start_position: Vec3,
    pub target_position: Vec3,
    /// Fixed for the whole job
    pub look_at: Vec3,
    pub start_time: Duration,
    pub duration: Duration,
}

impl TransitionJob {
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// Camera pose produced by one tick of an active transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub camera: CameraState,
    pub progress: f32,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Active(TransitionJob),
}

/// Flies the camera toward a framing position above a point on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    state: TransitionState,
    duration: Duration,
    framing_multiplier: f32,
}

impl CameraTransition {
    pub fn new(duration: Duration, framing_multiplier: f32) -> Self {
        Self {
            state: TransitionState::Idle,
            duration,
            framing_multiplier,
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TransitionState::Active(_))
    }

    /// Starts a new job from `from.position`, replacing any job in flight.
    pub fn begin(&mut self, target: Vec3, from: CameraState, now: Duration) -> TransitionJob {
        let job = TransitionJob {
            start_position: from.position,
            target_position: framing_position(target, self.framing_multiplier),
            look_at: target,
            start_time: now,
            duration: self.duration,
        };
        self.state = TransitionState::Active(job);
        job
    }

    pub fn cancel(&mut self) {
        self.state = TransitionState::Idle;
    }

    pub fn tick(&mut self, now: Duration) -> Option<TransitionFrame> {
        let TransitionState::Active(job) = self.state else {
            return None;
        };

        let progress = job.progress(now);
        let t = cubic_in_out(progress);
        let finished = progress >= 1.0;
        let position = if finished {
            job.target_position
        } else {
            job.start_position.lerp(job.target_position, t)
        };

        if finished {
            self.state = TransitionState::Idle;
        }

        Some(TransitionFrame {
            camera: CameraState {
                position,
                look_at: job.look_at,
            },
            progress,
            finished,
        })
    }
}
