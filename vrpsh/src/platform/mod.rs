//! Platform definitions for the supported CLI dialects.
//!
//! A platform bundles the prompt patterns, mode levels, save dialog and
//! per-category command catalog of one device family, plus the
//! [`VendorBehavior`] that turns its screen output into records.

mod catalog;
mod definition;
mod mode;
mod registry;
pub mod vendors;

pub use catalog::{Category, CommandCatalog, CommandSpec};
pub use definition::{CommitDialog, PlatformDefinition};
pub use mode::{Mode, ModeLevel};
pub use registry::PlatformRegistry;

use crate::records::{InterfaceRecord, RouteRecord, VlanRecord};

/// Vendor-specific parsing of tabular command output.
///
/// `line_terminator` is the platform's configured output terminator; parsers
/// split on it rather than on a fixed sequence.
pub trait VendorBehavior: Send + Sync {
    /// Parse the VLAN table.
    fn parse_vlans(&self, output: &str, line_terminator: &str) -> Vec<VlanRecord>;

    /// Parse the routing table.
    fn parse_routes(&self, output: &str, line_terminator: &str) -> Vec<RouteRecord>;

    /// Parse the interface listing.
    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceRecord>;
}

/// Behavior for platforms without table parsers; every table is empty.
pub struct DefaultBehavior;

impl VendorBehavior for DefaultBehavior {
    fn parse_vlans(&self, _output: &str, _line_terminator: &str) -> Vec<VlanRecord> {
        Vec::new()
    }

    fn parse_routes(&self, _output: &str, _line_terminator: &str) -> Vec<RouteRecord> {
        Vec::new()
    }

    fn parse_interfaces(&self, _output: &str) -> Vec<InterfaceRecord> {
        Vec::new()
    }
}
