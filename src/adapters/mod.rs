//! Infrastructure adapters. Implement outbound ports.
//!
//! TikTok client, HTTP transport, filesystem, decision agents, terminal UI.
//! Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod persistence;
pub mod tiktok;
pub mod ui;
