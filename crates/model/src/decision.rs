use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::serde::duration;

/// Outcome of evaluating a check-in attempt. Being too far away or on
/// cooldown are regular outcomes, not errors.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDecision {
    pub eligible: bool,
    pub distance_km: f64,
    pub within_radius: bool,
    pub on_cooldown: bool,
    #[serde(
        serialize_with = "duration::serialize",
        deserialize_with = "duration::deserialize"
    )]
    #[schemars(schema_with = "duration::schema")]
    pub cooldown_remaining: Duration,
    /// Earliest instant the cooldown allows the next check-in.
    pub next_eligible_at: Option<DateTime<Utc>>,
    pub current_level: u32,
    /// Level after acting on this decision.
    pub projected_level: u32,
    pub points_awarded: u32,
}

impl CheckInDecision {
    pub fn distance_m(&self) -> f64 {
        self.distance_km * 1000.0
    }

    /// Short explanation suitable for showing to the user.
    pub fn reason(&self, radius_km: f64) -> String {
        if self.eligible {
            format!("Check-in possible, worth {} points.", self.points_awarded)
        } else if !self.within_radius {
            format!(
                "Too far away: you must be within {:.0}m, you are {:.0}m away.",
                radius_km * 1000.0,
                self.distance_m()
            )
        } else {
            format!(
                "Already checked in here recently, try again in {}.",
                duration::format(&self.cooldown_remaining)
            )
        }
    }
}
