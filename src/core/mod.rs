pub mod client;
pub mod engine;
pub mod filter;
pub mod forces;
pub mod pipeline;
pub mod predicate;
pub mod report;

pub use crate::domain::model::{EngagementMethod, PoliceForce, SearchOutcome};
pub use crate::domain::ports::{ConfigProvider, ForceSource, Pipeline};
pub use crate::utils::error::Result;
