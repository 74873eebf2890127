//! `display interface` parser.
//!
//! Each interface is a block starting at `<name> current state : <state>` and
//! ending at the `Output bandwidth utilization :` line. Fields a given
//! interface type does not print stay `None`.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::records::InterfaceRecord;

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".*current state[\s\S]+?Output bandwidth utilization\s*:.*").unwrap()
});
static HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(.*?)[ \t]+current state[ \t]*:[ \t]*(.*)").unwrap());

static LINE_STATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Line protocol current state[ \t]*:[ \t]*(.*)").unwrap());
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Description[ \t]*:(.*)").unwrap());
static MTU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"The Maximum Transmit Unit is (\d+)").unwrap());
static SPEED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Speed[ \t]*:[ \t]*(\d+)").unwrap());
static DUPLEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Duplex[ \t]*:[ \t]*([A-Z]+)").unwrap());
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Internet Address is (\d+\.\d+\.\d+\.\d+)/(\d{1,2})").unwrap()
});
static MAC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Hardware address is[ \t]+([0-9A-Fa-f.:\-]+)").unwrap());
static PHYSICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Physical is[ \t]+(.*)").unwrap());
static LAST_DOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last physical down time[ \t]*:[ \t]*(.*)").unwrap());
static LAST_UP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last physical up time[ \t]*:[ \t]*(.*)").unwrap());
static INPUT_RATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last 300 seconds input rate[ \t]*:?[ \t]*(.*)").unwrap());
static OUTPUT_RATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last 300 seconds output rate[ \t]*:?[ \t]*(.*)").unwrap());
static CRC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"CRC[ \t]*:[ \t]*(\d+)").unwrap());

/// Parse `display interface` output into one record per interface block.
pub fn parse_interfaces(output: &str) -> Vec<InterfaceRecord> {
    BLOCK
        .find_iter(output)
        .filter_map(|block| parse_block(block.as_str()))
        .collect()
}

fn parse_block(block: &str) -> Option<InterfaceRecord> {
    let head = HEAD.captures(block)?;
    let name = head[1].trim().to_string();
    if name.is_empty() {
        return None;
    }

    let (ip_address, prefix_len) = match ADDRESS.captures(block) {
        Some(caps) => (caps[1].parse::<Ipv4Addr>().ok(), caps[2].parse::<u8>().ok()),
        None => (None, None),
    };

    Some(InterfaceRecord {
        name,
        admin_state: head[2].trim().to_string(),
        line_state: text(&LINE_STATE, block),
        description: text(&DESCRIPTION, block),
        mtu: number(&MTU, block),
        speed: number(&SPEED, block),
        duplex: text(&DUPLEX, block),
        ip_address,
        prefix_len,
        mac_address: text(&MAC, block),
        physical_type: text(&PHYSICAL, block),
        last_down: text(&LAST_DOWN, block),
        last_up: text(&LAST_UP, block),
        input_rate: text(&INPUT_RATE, block),
        output_rate: text(&OUTPUT_RATE, block),
        crc_errors: number(&CRC, block),
    })
}

/// First capture, trimmed; an empty value counts as absent.
fn text(pattern: &Regex, block: &str) -> Option<String> {
    let value = pattern.captures(block)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn number<N: std::str::FromStr>(pattern: &Regex, block: &str) -> Option<N> {
    pattern.captures(block)?.get(1)?.as_str().parse().ok()
}
