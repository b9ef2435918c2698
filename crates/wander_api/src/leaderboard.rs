use model::user::{Leaderboard, LeaderboardScope, User};
use utility::id::Id;

use crate::{ApiError, WanderApiClient};

/// The server answers ranks as plain numbers, with values below one for
/// users that are not ranked.
fn rank_from(raw: i64) -> Option<u32> {
    u32::try_from(raw).ok().filter(|rank| *rank > 0)
}

impl WanderApiClient {
    pub async fn global_leaderboard(&self, limit: u32) -> Result<Vec<User>, ApiError> {
        self.get("users/leaderboard/global", &[("limit", limit)])
            .await
    }

    pub async fn friends_leaderboard(
        &self,
        user_id: &Id<User>,
        limit: u32,
    ) -> Result<Vec<User>, ApiError> {
        self.get(
            &format!("users/leaderboard/friends/{}", user_id),
            &[("limit", limit)],
        )
        .await
    }

    pub async fn global_rank(&self, user_id: &Id<User>) -> Result<Option<u32>, ApiError> {
        let raw: i64 = self
            .get(
                &format!("users/leaderboard/global/rank/{}", user_id),
                &[] as &[(&str, &str)],
            )
            .await?;
        Ok(rank_from(raw))
    }

    pub async fn friends_rank(&self, user_id: &Id<User>) -> Result<Option<u32>, ApiError> {
        let raw: i64 = self
            .get(
                &format!("users/leaderboard/friends/rank/{}", user_id),
                &[] as &[(&str, &str)],
            )
            .await?;
        Ok(rank_from(raw))
    }

    /// Top `limit` users of the scope together with the user's own rank.
    pub async fn leaderboard(
        &self,
        scope: LeaderboardScope,
        user_id: &Id<User>,
        limit: u32,
    ) -> Result<Leaderboard, ApiError> {
        let (users, rank) = match scope {
            LeaderboardScope::Global => futures::try_join!(
                self.global_leaderboard(limit),
                self.global_rank(user_id),
            )?,
            LeaderboardScope::Friends => futures::try_join!(
                self.friends_leaderboard(user_id, limit),
                self.friends_rank(user_id),
            )?,
        };
        Ok(Leaderboard { scope, users, rank })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unranked_users_have_no_rank() {
        assert_eq!(rank_from(1), Some(1));
        assert_eq!(rank_from(42), Some(42));
        assert_eq!(rank_from(0), None);
        assert_eq!(rank_from(-1), None);
        assert_eq!(rank_from(i64::MAX), None);
    }
}
