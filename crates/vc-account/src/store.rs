use reqwest::header::HeaderMap;
use tracing::{info, instrument, warn};

use crate::client::AccountClient;
use crate::errors::{AccountError, Result};
use crate::models::{ContentItem, Offer, Reward, StorefrontResponse};
use crate::wallet::currency;

/// Item type ids found in `Reward::item_type_id`
pub mod item_type {
    pub const AGENTS: &str = "01bb38e1-da47-4e6a-9b3d-945fe4655707";
    pub const CONTRACTS: &str = "f85cb6f7-33e5-4dc8-b609-ec7212301948";
    pub const SPRAYS: &str = "d5f120f8-ff8c-4aac-92ea-f2b5acbe9475";
    pub const BUDDIES: &str = "dd3bf334-87f3-40bd-b043-682a57a8dc3a";
    pub const CARDS: &str = "3f296c07-64c3-494c-923b-fe692a4fa1bd";
    pub const SKINS: &str = "e7c63390-eda7-46e0-bb7a-a6abdacd2433";
    pub const SKIN_CHROMAS: &str = "3ad1b2b2-acdb-4524-852f-954a76ddae0a";
    pub const TITLES: &str = "de7caa6b-adf7-4588-bbd1-143831e786c6";
}

/// Catalogue path prefix for an item type, `None` for types the catalogue doesn't index
pub fn content_path(item_type_id: &str) -> Option<&'static str> {
    match item_type_id {
        item_type::SKINS => Some("/v1/weapons/skinlevels/"),
        item_type::SKIN_CHROMAS => Some("/v1/weapons/skinchromas/"),
        item_type::AGENTS => Some("/v1/agents/"),
        item_type::CONTRACTS => Some("/v1/contracts/"),
        item_type::SPRAYS => Some("/v1/sprays/"),
        item_type::BUDDIES => Some("/v1/buddies/levels/"),
        item_type::CARDS => Some("/v1/playercards/"),
        item_type::TITLES => Some("/v1/playertitles/"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreItem {
    pub name: String,
    pub cost: u64,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightMarketItem {
    pub name: String,
    pub base_cost: u64,
    pub discount_cost: u64,
    pub discount_percent: u32,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleView {
    pub name: String,
    pub price: u64,
    pub items: Vec<StoreItem>,
    pub remaining_seconds: u64,
}

/// Storefront with every item resolved to a display name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreView {
    pub featured: Vec<BundleView>,
    pub daily: Vec<StoreItem>,
    pub daily_remaining_seconds: u64,
    /// Empty outside night market periods
    pub night_market: Vec<NightMarketItem>,
    /// Priced in kingdom credits
    pub accessories: Vec<StoreItem>,
}

impl AccountClient {
    #[instrument(skip(self))]
    pub async fn storefront(&self) -> Result<StorefrontResponse> {
        let path = format!("/store/v2/storefront/{}", self.user_id());
        self.get_player_data(&path, HeaderMap::new()).await
    }

    pub async fn store(&self) -> Result<StoreView> {
        let storefront = self.storefront().await?;
        self.resolve_store(&storefront).await
    }

    /// Resolve every offer in a storefront through the content catalogue
    #[instrument(skip(self, storefront))]
    pub async fn resolve_store(&self, storefront: &StorefrontResponse) -> Result<StoreView> {
        let mut view = StoreView {
            daily_remaining_seconds: storefront.skins_panel_layout.remaining_duration_in_seconds,
            ..StoreView::default()
        };

        info!("Resolving daily store");
        for offer in &storefront.skins_panel_layout.single_item_store_offers {
            let content = self.resolve_reward(first_reward(offer)?).await?;
            view.daily.push(StoreItem {
                name: content.display_name,
                cost: cost_in(offer, currency::VALORANT_POINTS),
                icon: content.display_icon,
            });
        }

        info!("Resolving featured bundles");
        for bundle in &storefront.featured_bundle.bundles {
            let content = self
                .content_item(&format!("/v1/bundles/{}", bundle.data_asset_id))
                .await?;

            let mut items = Vec::with_capacity(bundle.items.len());
            for entry in &bundle.items {
                let item = self.resolve_reward(&entry.item).await?;
                items.push(StoreItem {
                    name: item.display_name,
                    cost: entry.base_price,
                    icon: item.display_icon,
                });
            }

            view.featured.push(BundleView {
                name: content.display_name,
                price: bundle
                    .total_discounted_cost
                    .as_ref()
                    .and_then(|cost| cost.get(currency::VALORANT_POINTS).copied())
                    .unwrap_or(0),
                items,
                remaining_seconds: bundle.duration_remaining_in_seconds,
            });
        }

        if let Some(bonus) = &storefront.bonus_store {
            info!("Resolving night market");
            for entry in &bonus.bonus_store_offers {
                let content = self.resolve_reward(first_reward(&entry.offer)?).await?;
                view.night_market.push(NightMarketItem {
                    name: content.display_name,
                    base_cost: cost_in(&entry.offer, currency::VALORANT_POINTS),
                    discount_cost: entry
                        .discount_costs
                        .get(currency::VALORANT_POINTS)
                        .copied()
                        .unwrap_or(0),
                    discount_percent: entry.discount_percent.round() as u32,
                    icon: content.display_icon,
                });
            }
        }

        info!("Resolving accessory store");
        for entry in &storefront.accessory_store.accessory_store_offers {
            let content = self.resolve_reward(first_reward(&entry.offer)?).await?;
            view.accessories.push(StoreItem {
                name: content.display_name,
                cost: cost_in(&entry.offer, currency::KINGDOM_CREDITS),
                icon: content.display_icon,
            });
        }

        Ok(view)
    }

    async fn resolve_reward(&self, reward: &Reward) -> Result<ContentItem> {
        match content_path(&reward.item_type_id) {
            Some(prefix) => {
                self.content_item(&format!("{prefix}{}", reward.item_id))
                    .await
            }
            None => {
                warn!("Unknown item type {}, showing raw id", reward.item_type_id);
                Ok(ContentItem {
                    display_name: reward.item_id.clone(),
                    display_icon: None,
                })
            }
        }
    }
}

fn first_reward(offer: &Offer) -> Result<&Reward> {
    offer.rewards.first().ok_or_else(|| AccountError::EmptyOffer {
        offer_id: offer.offer_id.clone(),
    })
}

fn cost_in(offer: &Offer, currency_id: &str) -> u64 {
    offer.cost.get(currency_id).copied().unwrap_or(0)
}
