//! Cross-cutting pieces shared by the binary and the use cases.

pub mod config;
