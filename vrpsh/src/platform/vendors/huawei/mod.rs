//! Huawei VRP platform support.

mod interface;
mod platform;
mod route;
mod vlan;

pub use interface::parse_interfaces;
pub use platform::{HuaweiBehavior, platform};
pub use route::parse_routes;
pub use vlan::parse_vlans;
