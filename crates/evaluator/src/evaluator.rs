use chrono::{DateTime, Duration, Utc};
use model::{
    check_in::CheckInRecord, decision::CheckInDecision, location::Coordinate,
    place::Place,
};

use crate::{compute_distance_km, policy::CheckInPolicy};

/// Decides whether a user may check in to a place. Stateless, so one
/// instance can be shared between any number of callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckInEvaluator {
    policy: CheckInPolicy,
}

impl CheckInEvaluator {
    pub fn new(policy: CheckInPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CheckInPolicy {
        &self.policy
    }

    pub fn evaluate(
        &self,
        user_location: Coordinate,
        place: &Place,
        prior_check_ins: &[CheckInRecord],
        now: DateTime<Utc>,
    ) -> CheckInDecision {
        let distance_km = compute_distance_km(user_location, place.location);
        self.decide(distance_km, prior_check_ins, now)
    }

    /// Same as [`evaluate`](Self::evaluate) for an already known distance.
    pub fn decide(
        &self,
        distance_km: f64,
        prior_check_ins: &[CheckInRecord],
        now: DateTime<Utc>,
    ) -> CheckInDecision {
        let within_radius = distance_km <= self.policy.radius_km;
        let current_level = level_of(prior_check_ins);
        let cooldown_remaining = self.cooldown_remaining(prior_check_ins, now);
        let on_cooldown = cooldown_remaining > Duration::zero();

        let eligible = within_radius && !on_cooldown;
        let (points_awarded, projected_level) = if eligible {
            (self.policy.points, current_level.saturating_add(1))
        } else {
            (0, current_level)
        };

        CheckInDecision {
            eligible,
            distance_km,
            within_radius,
            on_cooldown,
            cooldown_remaining,
            next_eligible_at: last_check_in(prior_check_ins)
                .filter(|_| on_cooldown)
                .map(|last| last + self.policy.cooldown),
            current_level,
            projected_level,
            points_awarded,
        }
    }

    /// Time until the cooldown following the most recent record has passed,
    /// zero for an empty history. Records dated after `now` count as having
    /// just happened.
    pub fn cooldown_remaining(
        &self,
        check_ins: &[CheckInRecord],
        now: DateTime<Utc>,
    ) -> Duration {
        match last_check_in(check_ins) {
            Some(last) => {
                let elapsed = now - last;
                (self.policy.cooldown - elapsed)
                    .clamp(Duration::zero(), self.policy.cooldown)
            }
            None => Duration::zero(),
        }
    }
}

pub(crate) fn last_check_in(check_ins: &[CheckInRecord]) -> Option<DateTime<Utc>> {
    check_ins.iter().map(|record| record.timestamp).max()
}

pub(crate) fn level_of(check_ins: &[CheckInRecord]) -> u32 {
    u32::try_from(check_ins.len()).unwrap_or(u32::MAX)
}
