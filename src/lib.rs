//! tiktok-pilot: signed TikTok web API client, trending collector and
//! engagement bot, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;
