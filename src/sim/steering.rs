//! Actor steering
//!
//! Both policies work in the XZ plane; the caller places the result on the
//! terrain afterwards. Smoothing is exponential (a fixed fraction of the
//! remaining distance per tick), so speeds are tuned through look-ahead
//! rather than velocity caps.

use glam::{DVec2, DVec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Whether a pursuing actor closes in on or runs from its opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pursuit {
    Chase,
    Flee,
}

/// Steering parameters for both policies
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringController {
    pub goal_smoothing: f64,
    pub goal_bound: f64,
    pub pursuit_smoothing: f64,
    pub pursuit_bound: f64,
    pub flee_scale: f64,
    pub home_radius: f64,
    pub home_bias: f64,
}

impl SteeringController {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            goal_smoothing: tuning.player_smoothing,
            goal_bound: tuning.player_bound,
            pursuit_smoothing: tuning.monster_smoothing,
            pursuit_bound: tuning.monster_bound,
            flee_scale: tuning.flee_scale,
            home_radius: tuning.home_radius,
            home_bias: tuning.home_bias,
        }
    }

    /// Goal-follow: ease toward `goal` and clamp to the player bounds
    pub fn seek(&self, current: DVec3, goal: DVec2) -> DVec2 {
        let goal = sanitize(goal, current.xz());
        let next = current.xz().lerp(goal, self.goal_smoothing);
        clamp_square(next, self.goal_bound)
    }

    /// Look-ahead distance that makes the eased pursuer cover `speed` per
    /// tick
    #[inline]
    pub fn look_ahead(&self, speed: f64) -> f64 {
        speed / self.pursuit_smoothing
    }

    /// Pursuit/evasion: project a look-ahead point toward (or away from)
    /// `other` and ease toward it. `speed` is the desired distance per tick.
    ///
    /// The home pull applies once the pursuer is more than `home_radius`
    /// from the origin in the XZ plane.
    pub fn pursue(&self, current: DVec3, other: DVec3, mode: Pursuit, speed: f64) -> DVec2 {
        let here = current.xz();
        let there = sanitize(other.xz(), here);
        let look_ahead = self.look_ahead(speed);

        let (away, scale) = match mode {
            Pursuit::Chase => (there - here, 1.0),
            Pursuit::Flee => (here - there, self.flee_scale),
        };

        // Coincident actors have no direction; hold position this tick
        let mut target = match away.try_normalize() {
            Some(dir) => here + dir * look_ahead * scale,
            None => here,
        };

        if mode == Pursuit::Flee && here.length() > self.home_radius {
            target = target.lerp(DVec2::ZERO, self.home_bias);
        }

        let next = here.lerp(target, self.pursuit_smoothing);
        clamp_square(next, self.pursuit_bound)
    }
}

/// Clamp X and Z independently to `[-bound, bound]`
#[inline]
pub fn clamp_square(p: DVec2, bound: f64) -> DVec2 {
    p.clamp(DVec2::splat(-bound), DVec2::splat(bound))
}

/// Replace a non-finite point with a fallback
#[inline]
fn sanitize(p: DVec2, fallback: DVec2) -> DVec2 {
    if p.is_finite() { p } else { fallback }
}
