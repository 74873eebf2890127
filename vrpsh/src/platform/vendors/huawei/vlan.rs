//! `display vlan` parser.
//!
//! The output has two tables. The first lists each VLAN with its type and
//! member ports, wrapping long port lists onto indented continuation lines:
//!
//! ```text
//! VID  Type    Ports
//! --------------------------------------------------------------------------------
//! 1    common  UT:GE0/0/1(U)      GE0/0/2(D)      GE0/0/3(D)
//!                 GE0/0/4(D)
//! 10   common  TG:GE0/0/1(U)
//! ```
//!
//! The second, introduced by the `VID  Status` header, carries status and
//! description per VLAN id:
//!
//! ```text
//! VID  Status  Property      MAC-LRN Statistics Description
//! --------------------------------------------------------------------------------
//! 1    enable  default       enable  disable    VLAN 0001
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use log::trace;
use regex::Regex;

use crate::records::VlanRecord;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-{4,}").unwrap());
static STATUS_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*VID\s+Status").unwrap());
static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*VID\s+").unwrap());
static NAME_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\S+)(?:\s+(.*))?$").unwrap());
static STATUS_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s+([a-z]+)(?:\s+\S+\s+\S+\s+\S+(?:\s+(.*?))?)?\s*$").unwrap()
});
static PORT_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]+:").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    CollectingNames,
    CollectingStatus,
}

/// Parse `display vlan` output into records, in the order listed.
///
/// Status rows for ids missing from the first table are ignored.
pub fn parse_vlans(output: &str, line_terminator: &str) -> Vec<VlanRecord> {
    let mut vlans: IndexMap<u16, VlanRecord> = IndexMap::new();
    let mut section = Section::CollectingNames;
    // id of the record that continuation lines extend
    let mut open: Option<u16> = None;

    for line in output.split(line_terminator) {
        let line = line.trim_end();

        if SEPARATOR.is_match(line) {
            continue;
        }
        if STATUS_HEADER.is_match(line) {
            section = Section::CollectingStatus;
            open = None;
            continue;
        }

        match section {
            Section::CollectingNames => {
                if line.is_empty() || HEADER.is_match(line) {
                    open = None;
                    continue;
                }
                if let Some(caps) = NAME_ROW.captures(line) {
                    let Ok(id) = caps[1].parse::<u16>() else {
                        open = None;
                        continue;
                    };
                    let mut vlan = VlanRecord::new(id, &caps[2]);
                    if let Some(ports) = caps.get(3) {
                        add_ports(&mut vlan, ports.as_str());
                    }
                    vlans.insert(id, vlan);
                    open = Some(id);
                } else if let Some(vlan) = open.and_then(|id| vlans.get_mut(&id)) {
                    add_ports(vlan, line);
                }
            }
            Section::CollectingStatus => {
                let Some(caps) = STATUS_ROW.captures(line) else {
                    continue;
                };
                let Ok(id) = caps[1].parse::<u16>() else {
                    continue;
                };
                match vlans.get_mut(&id) {
                    Some(vlan) => {
                        vlan.status = Some(caps[2].to_string());
                        vlan.description = caps
                            .get(3)
                            .map(|m| m.as_str().to_string())
                            .filter(|d| !d.is_empty());
                    }
                    None => trace!("status row for unlisted vlan {}", id),
                }
            }
        }
    }

    vlans.into_values().collect()
}

fn add_ports(vlan: &mut VlanRecord, text: &str) {
    for token in text.split_whitespace() {
        let port = PORT_TAG.replace(token, "");
        if !port.is_empty() {
            vlan.add_member(port);
        }
    }
}
