//! TikTok web API adapter: request signing, endpoint table, client.

pub mod bogus;
pub mod client;
pub mod urls;

pub use bogus::XBogusSigner;
pub use client::{AuthContext, TikTokClient};
pub use urls::{BASE_URL, DEFAULT_USER_AGENT, Endpoint};
