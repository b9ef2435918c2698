use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id<User>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub points: u32,
}

impl HasId for User {
    type IdType = String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum LeaderboardScope {
    Global,
    /// Only the user and their friends.
    Friends,
}

/// Users with the most points in a scope, and where the requesting user
/// stands in it.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub scope: LeaderboardScope,
    pub users: Vec<User>,
    /// 1-based, absent when the user is not ranked.
    pub rank: Option<u32>,
}

impl Leaderboard {
    pub fn includes(&self, user_id: &Id<User>) -> bool {
        self.users.iter().any(|user| &user.id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaderboard_membership() {
        let users: Vec<User> = serde_json::from_str(
            r#"[
                {"id": "1", "username": "ana", "points": 300},
                {"id": "2", "username": "ben", "points": 250}
            ]"#,
        )
        .unwrap();
        let leaderboard = Leaderboard {
            scope: LeaderboardScope::Global,
            users,
            rank: Some(7),
        };
        assert!(leaderboard.includes(&Id::from("2")));
        assert!(!leaderboard.includes(&Id::from("3")));

        let json = serde_json::to_value(&leaderboard).unwrap();
        assert_eq!(json["scope"], "global");
        assert_eq!(json["users"][0]["points"], 300);
    }
}
