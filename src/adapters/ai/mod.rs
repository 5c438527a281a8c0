//! Decision agent adapters. Implement DecisionPort.
//!
//! OpenAI-compatible decider and a mock decider for offline runs.

pub mod mock_adapter;
pub mod openai_adapter;

pub use mock_adapter::MockDecider;
pub use openai_adapter::OpenAiDecider;
