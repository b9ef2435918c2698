use std::collections::HashMap;

use chrono::{DateTime, Utc};
use evaluator::{deck_progress, most_visited_place, CheckInEvaluator};
use futures::future::join_all;
use itertools::Itertools;
use model::{
    check_in::{CheckInRecord, NewCheckIn},
    deck::{Deck, DeckProgress},
    decision::CheckInDecision,
    location::Coordinate,
    place::Place,
    user::User,
    visit::{PlaceVisitSummary, TopPlace},
};
use serde::Serialize;
use utility::{id::Id, let_also::LetAlso};

use crate::{
    not_found_to_none,
    provider::{Backend, LocationProvider},
    CheckInResult,
};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub place: Place,
    pub decision: CheckInDecision,
    /// Present once the check-in has been persisted.
    pub record: Option<CheckInRecord>,
    /// New total of the user, absent if no points were awarded.
    pub points_total: Option<u32>,
}

impl CheckInOutcome {
    pub fn accepted(&self) -> bool {
        self.record.is_some()
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitedPlace {
    #[serde(flatten)]
    pub check_in: CheckInRecord,
    pub place: Option<Place>,
}

/// Runs check-ins against a backend: fetches what the evaluator needs,
/// evaluates, and writes back accepted check-ins.
pub struct CheckInService<B, L>
where
    B: Backend,
    L: LocationProvider,
{
    backend: B,
    location: L,
    evaluator: CheckInEvaluator,
}

impl<B, L> CheckInService<B, L>
where
    B: Backend,
    L: LocationProvider,
{
    pub fn new(backend: B, location: L, evaluator: CheckInEvaluator) -> Self {
        Self {
            backend,
            location,
            evaluator,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn evaluator(&self) -> &CheckInEvaluator {
        &self.evaluator
    }

    async fn current_location(&self) -> CheckInResult<Coordinate> {
        Ok(self.location.current_location().await?)
    }

    async fn check_ins_at(
        &self,
        user_id: &Id<User>,
        place_id: &Id<Place>,
    ) -> CheckInResult<Vec<CheckInRecord>> {
        self.backend
            .check_ins_of_user(user_id)
            .await?
            .into_iter()
            .filter(|record| record.is_at(place_id))
            .collect::<Vec<_>>()
            .let_owned(Ok)
    }

    async fn evaluate(
        &self,
        user_id: &Id<User>,
        place_id: &Id<Place>,
        now: DateTime<Utc>,
    ) -> CheckInResult<(Place, Coordinate, CheckInDecision)> {
        let (place, location, history) = futures::try_join!(
            self.backend.place(place_id),
            self.current_location(),
            self.check_ins_at(user_id, place_id),
        )?;
        let decision = self.evaluator.evaluate(location, &place, &history, now);
        Ok((place, location, decision))
    }

    /// Evaluates a check-in without acting on it.
    pub async fn preview(
        &self,
        user_id: &Id<User>,
        place_id: &Id<Place>,
        now: DateTime<Utc>,
    ) -> CheckInResult<CheckInDecision> {
        let (_, _, decision) = self.evaluate(user_id, place_id, now).await?;
        Ok(decision)
    }

    /// Evaluates a check-in and persists it if it is eligible. A rejected
    /// check-in is not an error; see `CheckInOutcome::accepted`. If the points
    /// can not be awarded after the record was stored, the outcome carries
    /// the record and no points total.
    pub async fn check_in(
        &self,
        user_id: &Id<User>,
        place_id: &Id<Place>,
        photo_uri: Option<String>,
        now: DateTime<Utc>,
    ) -> CheckInResult<CheckInOutcome> {
        let (place, location, decision) = self.evaluate(user_id, place_id, now).await?;

        if !decision.eligible {
            log::info!(
                "check-in of {} at {} rejected: {}",
                user_id,
                place_id,
                decision.reason(self.evaluator.policy().radius_km)
            );
            return Ok(CheckInOutcome {
                place,
                decision,
                record: None,
                points_total: None,
            });
        }

        let record = self
            .backend
            .record_check_in(NewCheckIn {
                place_id: place.id.clone(),
                user_id: user_id.clone(),
                place_name: place.name.clone(),
                latitude: location.latitude,
                longitude: location.longitude,
                timestamp: now,
                photo_uri,
            })
            .await?;
        // the record is stored by now, a failed award only drops the total
        let points_total = match self
            .backend
            .award_points(user_id, decision.points_awarded)
            .await
        {
            Ok(points_total) => {
                log::info!(
                    "{} checked in at {} (level {}, {} points total)",
                    user_id,
                    place.name,
                    decision.projected_level,
                    points_total
                );
                Some(points_total)
            }
            Err(why) => {
                log::error!(
                    "{} checked in at {} but {} points were not awarded: {}",
                    user_id,
                    place.name,
                    decision.points_awarded,
                    why
                );
                None
            }
        };

        Ok(CheckInOutcome {
            place,
            decision,
            record: Some(record),
            points_total,
        })
    }

    /// The user's history joined with place details. Places that fail to load
    /// are left out instead of failing the whole list.
    pub async fn visited_places(
        &self,
        user_id: &Id<User>,
    ) -> CheckInResult<Vec<VisitedPlace>> {
        let check_ins = self.backend.check_ins_of_user(user_id).await?;
        let place_ids = check_ins
            .iter()
            .map(|record| &record.place_id)
            .unique()
            .collect::<Vec<_>>();

        let fetched = join_all(place_ids.iter().map(|id| self.backend.place(id))).await;
        let places = place_ids
            .into_iter()
            .zip(fetched)
            .filter_map(|(id, result)| match result {
                Ok(place) => Some((id.clone(), place)),
                Err(why) => {
                    log::error!("could not fetch place {}: {}", id, why);
                    None
                }
            })
            .collect::<HashMap<_, _>>();

        check_ins
            .into_iter()
            .map(|check_in| VisitedPlace {
                place: places.get(&check_in.place_id).cloned(),
                check_in,
            })
            .collect::<Vec<_>>()
            .let_owned(Ok)
    }

    /// The user's most visited place with its level, if any.
    pub async fn top_place(&self, user_id: &Id<User>) -> CheckInResult<Option<TopPlace>> {
        let check_ins = self.backend.check_ins_of_user(user_id).await?;
        let Some((place_id, level)) = most_visited_place(&check_ins) else {
            return Ok(None);
        };
        not_found_to_none(self.backend.place(&place_id).await)
            .map(|place| place.map(|place| TopPlace { place, level }))
    }

    pub async fn visit_summaries(
        &self,
        user_id: &Id<User>,
        now: DateTime<Utc>,
    ) -> CheckInResult<Vec<PlaceVisitSummary>> {
        let check_ins = self.backend.check_ins_of_user(user_id).await?;
        Ok(self.evaluator.summarize_all_visits(&check_ins, now))
    }

    /// Deck places with visited flags. Sorted by distance when a location fix
    /// is available, in deck order otherwise.
    pub async fn deck_progress(
        &self,
        user_id: &Id<User>,
        deck: &Deck,
    ) -> CheckInResult<DeckProgress> {
        let (check_ins, location) = futures::join!(
            self.backend.check_ins_of_user(user_id),
            self.location.current_location(),
        );
        let location = location
            .map_err(|why| log::warn!("deck {} without distances: {}", deck.id, why))
            .ok();
        Ok(deck_progress(deck, &check_ins?, location))
    }
}
