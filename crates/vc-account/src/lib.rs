//! Read-only VALORANT account queries (wallet, storefront, competitive rank)
//! made with a [`vc_auth::Session`].

mod client;
mod errors;
pub mod models;
mod mmr;
mod store;
mod wallet;

pub use client::{AccountClient, AccountEndpoints, CLIENT_PLATFORM, CONTENT_API};
pub use errors::{AccountError, Result};
pub use mmr::{CompetitiveSummary, tier_name};
pub use store::{BundleView, NightMarketItem, StoreItem, StoreView, content_path, item_type};
pub use wallet::{Wallet, currency};
