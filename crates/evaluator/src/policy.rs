use std::{env, str::FromStr};

use chrono::Duration;

use crate::{CHECK_IN_POINTS, CHECK_IN_RADIUS_KM, COOLDOWN_HOURS};

/// The tunable rules of a check-in. `Default` holds the production values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckInPolicy {
    pub radius_km: f64,
    pub cooldown: Duration,
    pub points: u32,
}

impl Default for CheckInPolicy {
    fn default() -> Self {
        Self {
            radius_km: CHECK_IN_RADIUS_KM,
            cooldown: Duration::hours(COOLDOWN_HOURS),
            points: CHECK_IN_POINTS,
        }
    }
}

impl CheckInPolicy {
    /// Reads overrides from `CHECK_IN_RADIUS_KM`, `CHECK_IN_COOLDOWN_HOURS` and
    /// `CHECK_IN_POINTS`. Missing or invalid values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let radius_km = parse_var::<f64, _>(&lookup, "CHECK_IN_RADIUS_KM")
            .filter(|radius| radius.is_finite() && *radius >= 0.0)
            .unwrap_or(defaults.radius_km);
        let cooldown = parse_var::<i64, _>(&lookup, "CHECK_IN_COOLDOWN_HOURS")
            .and_then(|hours| {
                let cooldown = Duration::try_hours(hours).filter(|_| hours >= 0);
                if cooldown.is_none() {
                    log::warn!("ignoring out of range CHECK_IN_COOLDOWN_HOURS {}", hours);
                }
                cooldown
            })
            .unwrap_or(defaults.cooldown);
        let points =
            parse_var::<u32, _>(&lookup, "CHECK_IN_POINTS").unwrap_or(defaults.points);
        Self {
            radius_km,
            cooldown,
            points,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring invalid value '{}' for {}", raw, key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_constants() {
        let policy = CheckInPolicy::default();
        assert_eq!(policy.radius_km, 0.5);
        assert_eq!(policy.cooldown, Duration::hours(4));
        assert_eq!(policy.points, 50);
        assert_eq!(CheckInPolicy::from_lookup(lookup(&[])), policy);
    }

    #[test]
    fn overrides_and_invalid_values() {
        let policy = CheckInPolicy::from_lookup(lookup(&[
            ("CHECK_IN_RADIUS_KM", "0.25"),
            ("CHECK_IN_COOLDOWN_HOURS", "-1"),
            ("CHECK_IN_POINTS", "lots"),
        ]));
        assert_eq!(policy.radius_km, 0.25);
        assert_eq!(policy.cooldown, Duration::hours(4));
        assert_eq!(policy.points, 50);
    }

    #[test]
    fn cooldown_beyond_duration_range_keeps_default() {
        let policy = CheckInPolicy::from_lookup(lookup(&[(
            "CHECK_IN_COOLDOWN_HOURS",
            "3000000000000",
        )]));
        assert_eq!(policy.cooldown, Duration::hours(4));

        let policy = CheckInPolicy::from_lookup(lookup(&[("CHECK_IN_COOLDOWN_HOURS", "24")]));
        assert_eq!(policy.cooldown, Duration::hours(24));
    }
}
