//! Structured records extracted from device output.
//!
//! Optional fields are `None` when the device did not report them, so "not
//! reported" stays distinguishable from a reported zero.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// One VLAN from the VLAN table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRecord {
    /// VLAN id.
    pub id: u16,

    /// VLAN type column (e.g. `common`, `super`).
    pub vlan_type: String,

    /// Description, filled from the status section.
    pub description: Option<String>,

    /// Status (e.g. `enable`), filled from the status section.
    pub status: Option<String>,

    /// Member interfaces in the order listed, without duplicates.
    pub members: Vec<String>,
}

impl VlanRecord {
    /// Create a record from the name section, before status is known.
    pub fn new(id: u16, vlan_type: impl Into<String>) -> Self {
        Self {
            id,
            vlan_type: vlan_type.into(),
            description: None,
            status: None,
            members: Vec::new(),
        }
    }

    /// Append a member interface unless it is already listed.
    pub fn add_member(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.members.contains(&name) {
            self.members.push(name);
        }
    }
}

/// One next hop of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextHop {
    /// Protocol that installed the route (`Static`, `OSPF`, `Direct`, ...).
    pub route_type: String,

    /// Route preference, when the column was present.
    pub preference: Option<u32>,

    /// Route cost, when the column was present.
    pub cost: Option<u32>,

    /// Next-hop address.
    pub address: Ipv4Addr,

    /// Egress interface.
    pub interface: String,
}

/// One destination from the routing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Destination network.
    pub network: Ipv4Addr,

    /// Prefix length.
    pub mask_len: u8,

    /// Next hops; more than one for equal-cost routes.
    pub next_hops: Vec<NextHop>,
}

/// One interface from the interface table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    pub admin_state: String,
    pub line_state: Option<String>,
    pub description: Option<String>,
    pub mtu: Option<u32>,
    /// Speed as reported by the device (Mbit/s).
    pub speed: Option<u64>,
    pub duplex: Option<String>,
    pub ip_address: Option<Ipv4Addr>,
    pub prefix_len: Option<u8>,
    pub mac_address: Option<String>,
    pub physical_type: Option<String>,
    pub last_down: Option<String>,
    pub last_up: Option<String>,
    /// Last 300 seconds input rate, verbatim.
    pub input_rate: Option<String>,
    /// Last 300 seconds output rate, verbatim.
    pub output_rate: Option<String>,
    pub crc_errors: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_member_keeps_order_and_skips_duplicates() {
        let mut vlan = VlanRecord::new(10, "common");
        vlan.add_member("GE0/0/2(U)");
        vlan.add_member("GE0/0/1(D)");
        vlan.add_member("GE0/0/2(U)");
        assert_eq!(vlan.members, ["GE0/0/2(U)", "GE0/0/1(D)"]);
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let record = InterfaceRecord {
            name: "GigabitEthernet0/0/1".to_string(),
            admin_state: "UP".to_string(),
            crc_errors: Some(0),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["crc_errors"], 0);
        assert!(json["speed"].is_null());
        assert!(json["mtu"].is_null());
    }
}
