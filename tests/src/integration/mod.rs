//! Integration flows.

pub mod provider_flows;
pub mod sdk_flows;
