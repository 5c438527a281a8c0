//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;
pub mod transport;

pub use inbound::InputPort;
pub use outbound::{ActivityLogPort, DecisionPort, FeedArchivePort, TikTokApi};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
