use reqwest::header::HeaderMap;
use tracing::instrument;

use crate::client::AccountClient;
use crate::errors::Result;
use crate::models::WalletResponse;

/// Currency ids used as keys in wallet balances and offer costs
pub mod currency {
    pub const VALORANT_POINTS: &str = "85ad13f7-3d1b-5128-9eb2-7cd8ee0b5741";
    pub const RADIANITE_POINTS: &str = "e59aa87c-4cbf-517a-5983-6e81511be9b7";
    pub const KINGDOM_CREDITS: &str = "85ca954a-41f2-ce94-9b45-8ca3dd39a00d";
    pub const FREE_AGENTS: &str = "f08d4ae3-939c-4576-ab26-09ce1f23bb37";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    pub valorant_points: u64,
    pub radianite_points: u64,
    pub kingdom_credits: u64,
    pub free_agents: u64,
}

impl From<WalletResponse> for Wallet {
    fn from(response: WalletResponse) -> Self {
        let balance = |id: &str| response.balances.get(id).copied().unwrap_or(0);
        Self {
            valorant_points: balance(currency::VALORANT_POINTS),
            radianite_points: balance(currency::RADIANITE_POINTS),
            kingdom_credits: balance(currency::KINGDOM_CREDITS),
            free_agents: balance(currency::FREE_AGENTS),
        }
    }
}

impl AccountClient {
    /// Currency balances for the logged in player
    #[instrument(skip(self))]
    pub async fn wallet(&self) -> Result<Wallet> {
        let path = format!("/store/v1/wallet/{}", self.user_id());
        let response: WalletResponse = self.get_player_data(&path, HeaderMap::new()).await?;
        Ok(response.into())
    }
}
