pub mod client;
pub mod endpoints;
pub mod executor;
pub mod region;
pub mod types;

pub use client::{ReqwestTransport, RiotClient};
pub use executor::{ApiResponse, ApiTransport, Outcome, RequestExecutor, RetryPolicy};
pub use region::{PlatformShard, RegionCode, RoutingCluster};
pub use types::*;
