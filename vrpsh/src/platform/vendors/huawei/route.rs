//! `display ip routing-table` parser.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::records::{NextHop, RouteRecord};

/// `Destination/Mask  Proto  Pre  Cost  [Flags]  NextHop  Interface`
static ROUTE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+\.\d+\.\d+\.\d+)/(\d{1,2})\s+(\S+)\s+(\d+)\s+(\d+)\s+(?:[A-Z]+\s+)?(\d+\.\d+\.\d+\.\d+)\s+(\S+)",
    )
    .unwrap()
});

/// Further equal-cost next hop of the destination above it.
static NEXT_HOP_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s+([A-Za-z][\w-]*)\s+(\d+)\s+(\d+)\s+(?:[A-Z]+\s+)?(\d+\.\d+\.\d+\.\d+)\s+(\S+)\s*$",
    )
    .unwrap()
});

/// Parse the routing table; lines that are not route rows are skipped.
pub fn parse_routes(output: &str, line_terminator: &str) -> Vec<RouteRecord> {
    let mut routes: Vec<RouteRecord> = Vec::new();

    for line in output.split(line_terminator) {
        if let Some(caps) = ROUTE_ROW.captures(line) {
            let (Ok(network), Ok(mask_len)) = (caps[1].parse::<Ipv4Addr>(), caps[2].parse::<u8>())
            else {
                continue;
            };
            let Some(hop) = next_hop(&caps, 3) else {
                continue;
            };
            routes.push(RouteRecord {
                network,
                mask_len,
                next_hops: vec![hop],
            });
        } else if let Some(caps) = NEXT_HOP_ROW.captures(line) {
            if let (Some(route), Some(hop)) = (routes.last_mut(), next_hop(&caps, 1)) {
                route.next_hops.push(hop);
            }
        }
    }

    routes
}

/// Build a next hop from five consecutive groups starting at `first`:
/// proto, preference, cost, address, interface.
fn next_hop(caps: &Captures<'_>, first: usize) -> Option<NextHop> {
    let address = caps[first + 3].parse::<Ipv4Addr>().ok()?;
    Some(NextHop {
        route_type: caps[first].to_string(),
        preference: caps[first + 1].parse().ok(),
        cost: caps[first + 2].parse().ok(),
        address,
        interface: caps[first + 4].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: &[&str] = &[
        "display ip routing-table",
        "Route Flags: R - relay, D - download to fib",
        "------------------------------------------------------------------------------",
        "Routing Tables: Public",
        "         Destinations : 5        Routes : 6",
        "",
        "Destination/Mask    Proto   Pre  Cost      Flags NextHop         Interface",
        "",
        "        0.0.0.0/0   Static  60   0          RD   10.1.1.254      Vlanif10",
        "       10.1.1.0/24  Direct  0    0           D   10.1.1.1        Vlanif10",
        "     172.16.0.0/16  OSPF    10   2           D   10.1.1.2        Vlanif10",
        "                    OSPF    10   2           D   10.1.2.2        Vlanif20",
        "      127.0.0.0/8   Direct  0    0           D   127.0.0.1       InLoopBack0",
        "    192.168.9.0/24  RIP     100  1   10.1.1.9        Vlanif10",
        "<HUAWEI>",
    ];

    fn routes() -> Vec<RouteRecord> {
        parse_routes(&LINES.join("\r\n"), "\r\n")
    }

    #[test]
    fn test_parse_routes() {
        let routes = routes();
        assert_eq!(routes.len(), 5);

        let default = &routes[0];
        assert_eq!(default.network, Ipv4Addr::UNSPECIFIED);
        assert_eq!(default.mask_len, 0);
        assert_eq!(default.next_hops.len(), 1);
        let hop = &default.next_hops[0];
        assert_eq!(hop.route_type, "Static");
        assert_eq!(hop.preference, Some(60));
        assert_eq!(hop.cost, Some(0));
        assert_eq!(hop.address, Ipv4Addr::new(10, 1, 1, 254));
        assert_eq!(hop.interface, "Vlanif10");
    }

    #[test]
    fn test_equal_cost_next_hops() {
        let routes = routes();
        let ospf = &routes[2];
        assert_eq!(ospf.network, Ipv4Addr::new(172, 16, 0, 0));
        assert_eq!(ospf.mask_len, 16);
        let hops: Vec<_> = ospf.next_hops.iter().map(|h| h.interface.as_str()).collect();
        assert_eq!(hops, ["Vlanif10", "Vlanif20"]);
        assert_eq!(ospf.next_hops[1].address, Ipv4Addr::new(10, 1, 2, 2));
    }

    #[test]
    fn test_row_without_flags() {
        let routes = routes();
        let rip = &routes[4];
        assert_eq!(rip.network, Ipv4Addr::new(192, 168, 9, 0));
        assert_eq!(rip.next_hops[0].route_type, "RIP");
        assert_eq!(rip.next_hops[0].address, Ipv4Addr::new(10, 1, 1, 9));
    }

    #[test]
    fn test_headers_are_not_routes() {
        let text = "Destination/Mask    Proto   Pre  Cost      Flags NextHop         Interface";
        assert!(parse_routes(text, "\r\n").is_empty());
    }
}
