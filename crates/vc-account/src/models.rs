use std::collections::HashMap;

use serde::Deserialize;

/// `valorant-api.com/v1/version`
#[derive(Debug, Clone, Deserialize)]
pub struct ClientVersionResponse {
    pub data: ClientVersionData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientVersionData {
    pub riot_client_version: String,
    #[serde(default)]
    pub branch: Option<String>,
}

/// Any single-item lookup on the content catalogue
#[derive(Debug, Clone, Deserialize)]
pub struct ContentResponse {
    pub data: ContentItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub display_name: String,
    #[serde(default)]
    pub display_icon: Option<String>,
}

/// `/store/v1/wallet/{puuid}`
#[derive(Debug, Clone, Deserialize)]
pub struct WalletResponse {
    #[serde(rename = "Balances", default)]
    pub balances: HashMap<String, u64>,
}

/// `/mmr/v1/players/{puuid}`, reduced to the fields shown to the player
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerMmrResponse {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "QueueSkills", default)]
    pub queue_skills: HashMap<String, QueueSkill>,
    #[serde(rename = "LatestCompetitiveUpdate", default)]
    pub latest_competitive_update: Option<CompetitiveUpdate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueSkill {
    #[serde(rename = "TotalGamesNeededForRating", default)]
    pub total_games_needed_for_rating: u32,
    #[serde(rename = "SeasonalInfoBySeasonID", default)]
    pub seasonal_info_by_season_id: Option<HashMap<String, SeasonalInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonalInfo {
    #[serde(rename = "SeasonID")]
    pub season_id: String,
    #[serde(rename = "NumberOfWins", default)]
    pub number_of_wins: u32,
    #[serde(rename = "NumberOfGames", default)]
    pub number_of_games: u32,
    #[serde(rename = "CompetitiveTier", default)]
    pub competitive_tier: u32,
    #[serde(rename = "RankedRating", default)]
    pub ranked_rating: u32,
    #[serde(rename = "LeaderboardRank", default)]
    pub leaderboard_rank: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitiveUpdate {
    #[serde(rename = "MatchID", default)]
    pub match_id: String,
    #[serde(rename = "SeasonID", default)]
    pub season_id: String,
    #[serde(rename = "TierAfterUpdate", default)]
    pub tier_after_update: u32,
    #[serde(rename = "RankedRatingAfterUpdate", default)]
    pub ranked_rating_after_update: u32,
    #[serde(rename = "RankedRatingEarned", default)]
    pub ranked_rating_earned: i32,
}

/// `/store/v2/storefront/{puuid}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorefrontResponse {
    #[serde(rename = "FeaturedBundle", default)]
    pub featured_bundle: FeaturedBundle,
    #[serde(rename = "SkinsPanelLayout", default)]
    pub skins_panel_layout: SkinsPanelLayout,
    #[serde(rename = "BonusStore", default)]
    pub bonus_store: Option<BonusStore>,
    #[serde(rename = "AccessoryStore", default)]
    pub accessory_store: AccessoryStore,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedBundle {
    #[serde(rename = "Bundles", default)]
    pub bundles: Vec<Bundle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bundle {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "DataAssetID")]
    pub data_asset_id: String,
    #[serde(rename = "Items", default)]
    pub items: Vec<BundleItem>,
    #[serde(rename = "TotalDiscountedCost", default)]
    pub total_discounted_cost: Option<HashMap<String, u64>>,
    #[serde(rename = "DurationRemainingInSeconds", default)]
    pub duration_remaining_in_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleItem {
    #[serde(rename = "Item")]
    pub item: Reward,
    #[serde(rename = "BasePrice", default)]
    pub base_price: u64,
    #[serde(rename = "DiscountedPrice", default)]
    pub discounted_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reward {
    #[serde(rename = "ItemTypeID")]
    pub item_type_id: String,
    #[serde(rename = "ItemID")]
    pub item_id: String,
    #[serde(rename = "Quantity", default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Offer {
    #[serde(rename = "OfferID")]
    pub offer_id: String,
    #[serde(rename = "Cost", default)]
    pub cost: HashMap<String, u64>,
    #[serde(rename = "Rewards", default)]
    pub rewards: Vec<Reward>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkinsPanelLayout {
    #[serde(rename = "SingleItemStoreOffers", default)]
    pub single_item_store_offers: Vec<Offer>,
    #[serde(rename = "SingleItemOffersRemainingDurationInSeconds", default)]
    pub remaining_duration_in_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BonusStore {
    #[serde(rename = "BonusStoreOffers", default)]
    pub bonus_store_offers: Vec<BonusStoreOffer>,
    #[serde(rename = "BonusStoreRemainingDurationInSeconds", default)]
    pub remaining_duration_in_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BonusStoreOffer {
    #[serde(rename = "BonusOfferID")]
    pub bonus_offer_id: String,
    #[serde(rename = "Offer")]
    pub offer: Offer,
    #[serde(rename = "DiscountPercent", default)]
    pub discount_percent: f64,
    #[serde(rename = "DiscountCosts", default)]
    pub discount_costs: HashMap<String, u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessoryStore {
    #[serde(rename = "AccessoryStoreOffers", default)]
    pub accessory_store_offers: Vec<AccessoryStoreOffer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessoryStoreOffer {
    #[serde(rename = "Offer")]
    pub offer: Offer,
}
