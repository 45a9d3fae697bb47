use reqwest::header::{HeaderMap, HeaderValue};
use tracing::instrument;

use crate::client::{AccountClient, CLIENT_PLATFORM};
use crate::errors::Result;
use crate::models::PlayerMmrResponse;

const COMPETITIVE_QUEUE: &str = "competitive";

/// Tier names indexed by `CompetitiveTier`. 1 and 2 are unused.
const TIER_NAMES: [&str; 28] = [
    "Unranked",
    "Unused",
    "Unused",
    "Iron 1",
    "Iron 2",
    "Iron 3",
    "Bronze 1",
    "Bronze 2",
    "Bronze 3",
    "Silver 1",
    "Silver 2",
    "Silver 3",
    "Gold 1",
    "Gold 2",
    "Gold 3",
    "Platinum 1",
    "Platinum 2",
    "Platinum 3",
    "Diamond 1",
    "Diamond 2",
    "Diamond 3",
    "Ascendant 1",
    "Ascendant 2",
    "Ascendant 3",
    "Immortal 1",
    "Immortal 2",
    "Immortal 3",
    "Radiant",
];

pub fn tier_name(tier: u32) -> &'static str {
    TIER_NAMES.get(tier as usize).copied().unwrap_or("Unknown")
}

/// Competitive standing for the current act
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitiveSummary {
    pub tier: u32,
    pub tier_name: &'static str,
    pub ranked_rating: u32,
    pub last_rating_change: Option<i32>,
    pub wins: u32,
    pub games: u32,
    pub leaderboard_rank: Option<u32>,
}

impl CompetitiveSummary {
    pub fn from_response(response: &PlayerMmrResponse) -> Self {
        let latest = response.latest_competitive_update.as_ref();
        let season_id = latest.map(|update| update.season_id.as_str()).unwrap_or("");

        let season = response
            .queue_skills
            .get(COMPETITIVE_QUEUE)
            .and_then(|queue| queue.seasonal_info_by_season_id.as_ref())
            .and_then(|seasons| seasons.get(season_id));

        let tier = latest
            .map(|update| update.tier_after_update)
            .or_else(|| season.map(|s| s.competitive_tier))
            .unwrap_or(0);
        let ranked_rating = latest
            .map(|update| update.ranked_rating_after_update)
            .or_else(|| season.map(|s| s.ranked_rating))
            .unwrap_or(0);

        Self {
            tier,
            tier_name: tier_name(tier),
            ranked_rating,
            last_rating_change: latest
                .filter(|update| !update.match_id.is_empty())
                .map(|update| update.ranked_rating_earned),
            wins: season.map(|s| s.number_of_wins).unwrap_or(0),
            games: season.map(|s| s.number_of_games).unwrap_or(0),
            leaderboard_rank: season
                .map(|s| s.leaderboard_rank)
                .filter(|rank| *rank > 0),
        }
    }
}

impl AccountClient {
    /// Raw MMR document. Needs the live client version, fetched first.
    #[instrument(skip(self))]
    pub async fn player_mmr(&self) -> Result<PlayerMmrResponse> {
        let version = self.client_version().await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Riot-ClientPlatform",
            HeaderValue::from_static(CLIENT_PLATFORM),
        );
        headers.insert("X-Riot-ClientVersion", HeaderValue::from_str(&version)?);

        let path = format!("/mmr/v1/players/{}", self.user_id());
        self.get_player_data(&path, headers).await
    }

    pub async fn competitive_summary(&self) -> Result<CompetitiveSummary> {
        let response = self.player_mmr().await?;
        Ok(CompetitiveSummary::from_response(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_names() {
        assert_eq!(tier_name(0), "Unranked");
        assert_eq!(tier_name(3), "Iron 1");
        assert_eq!(tier_name(27), "Radiant");
        assert_eq!(tier_name(99), "Unknown");
    }

    #[test]
    fn test_summary_uses_latest_update() {
        let response: PlayerMmrResponse = serde_json::from_str(
            r#"{
                "Subject": "puuid-1",
                "QueueSkills": {
                    "competitive": {
                        "TotalGamesNeededForRating": 0,
                        "SeasonalInfoBySeasonID": {
                            "act-1": {
                                "SeasonID": "act-1",
                                "NumberOfWins": 12,
                                "NumberOfGames": 20,
                                "CompetitiveTier": 14,
                                "RankedRating": 40,
                                "LeaderboardRank": 0
                            }
                        }
                    }
                },
                "LatestCompetitiveUpdate": {
                    "MatchID": "match-1",
                    "SeasonID": "act-1",
                    "TierAfterUpdate": 15,
                    "RankedRatingAfterUpdate": 8,
                    "RankedRatingEarned": 18
                }
            }"#,
        )
        .unwrap();

        let summary = CompetitiveSummary::from_response(&response);
        assert_eq!(summary.tier_name, "Platinum 1");
        assert_eq!(summary.ranked_rating, 8);
        assert_eq!(summary.last_rating_change, Some(18));
        assert_eq!(summary.wins, 12);
        assert_eq!(summary.games, 20);
        assert_eq!(summary.leaderboard_rank, None);
    }

    #[test]
    fn test_summary_for_new_account() {
        let response: PlayerMmrResponse =
            serde_json::from_str(r#"{"Subject": "puuid-1"}"#).unwrap();

        let summary = CompetitiveSummary::from_response(&response);
        assert_eq!(summary.tier_name, "Unranked");
        assert_eq!(summary.last_rating_change, None);
        assert_eq!(summary.games, 0);
    }
}
