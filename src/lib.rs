pub mod clients;
pub mod config;
pub mod deserializers;
pub mod error;
pub mod http;
pub mod prompts;
pub mod recommend;
pub mod routine;
pub mod scoring;

pub use recommend::{FALLBACK_RECOMMENDATION, Recommendation, Recommender};
pub use routine::{RiskLevel, Role, RoutineSnapshot, SimulationResult};
