//! Huawei VRP platform definition.
//!
//! # Prompt Examples
//!
//! ```text
//! <HUAWEI>                           # user view (general)
//! [HUAWEI]                           # system view (privileged)
//! [HUAWEI-GigabitEthernet0/0/1]      # interface view (nested)
//! [~HUAWEI]                          # two-stage commit devices
//! ```
//!
//! # Mode Graph
//!
//! ```text
//! ┌──────────┐  system-view  ┌─────────────┐  interface ...  ┌──────────────┐
//! │ <HUAWEI> ├───────────────► [HUAWEI]    ├─────────────────► [HUAWEI-...] │
//! │ general  │               │ privileged  │                 │ nested       │
//! └──────────┘◄──────────────┴─────────────┘◄────────────────┴──────────────┘
//!                 return (from any view)
//! ```
//!
//! A hostname that itself contains `-` reads as a nested view.

use std::sync::Arc;

use crate::channel::PromptSpec;
use crate::platform::{
    Category, CommandCatalog, CommandSpec, Mode, ModeLevel, PlatformDefinition, VendorBehavior,
};
use crate::records::{InterfaceRecord, RouteRecord, VlanRecord};

/// Any idle prompt, matched against the trimmed final line.
const PROMPT: &str = r"^[<\[][~*]?[\w\-./:@()]+[>\]]\s*$";

/// Idle prompt at the very end of the cumulative output.
const TRAILING_PROMPT: &str = r"[\r\n]+[<\[]\S+[>\]] ?$";

/// Device diagnostic followed by an idle prompt.
const COMMAND_ERROR: &str = r"Error:[\s\S]+[\r\n]+[<\[]\S+[>\]] ?$";

/// Table parsers for VRP screen output.
pub struct HuaweiBehavior;

impl VendorBehavior for HuaweiBehavior {
    fn parse_vlans(&self, output: &str, line_terminator: &str) -> Vec<VlanRecord> {
        super::parse_vlans(output, line_terminator)
    }

    fn parse_routes(&self, output: &str, line_terminator: &str) -> Vec<RouteRecord> {
        super::parse_routes(output, line_terminator)
    }

    fn parse_interfaces(&self, output: &str) -> Vec<InterfaceRecord> {
        super::parse_interfaces(output)
    }
}

/// Create the Huawei VRP platform definition.
pub fn platform() -> PlatformDefinition {
    let general = ModeLevel::new(Mode::GENERAL, "user_view", r"^<[~*]?[\w\-./:@()]+>$")
        .unwrap()
        .with_enter("return", PromptSpec::success_only(r"[\r\n]+\S+> ?$").unwrap());

    // system-view can only be told apart from a nested view by the `-`
    let privileged = ModeLevel::new(Mode::PRIVILEGED, "system_view", r"^\[[~*]?[\w./:@()]+\]$")
        .unwrap()
        .with_enter(
            "system-view",
            PromptSpec::new(r"[\r\n]+\S+\] ?$", Some(r"[\r\n]+\S+> ?$")).unwrap(),
        );

    let nested = ModeLevel::new(Mode::nested(1), "nested_view", r"^\[[~*]?[\w\-./:@()]+\]$")
        .unwrap();

    PlatformDefinition::new("huawei_vrp")
        .with_terminators("\r\n", "\n")
        .with_level(general)
        .with_level(privileged)
        .with_level(nested)
        .with_default_mode(Mode::GENERAL)
        .with_prompt_pattern(PROMPT)
        .unwrap()
        .with_save_commands("return", "save")
        .with_confirmation(r"Are you sure to continue\?\s*\[Y/N\]:?\s*$", "Y")
        .unwrap()
        .with_save_markers(r"(?i)\[OK\]|Copy complete|successfully")
        .unwrap()
        .with_commit_dialog(
            PromptSpec::new(
                r"Are you sure to continue\?\s*\[Y/N\]:? ?$",
                Some(r"Error:\s*Incomplete command[\s\S]+"),
            )
            .unwrap(),
            PromptSpec::success_only(r"successfully[\s\S]+[\r\n]+\S+> ?$").unwrap(),
        )
        .with_on_open_command("screen-length 0 temporary")
        .with_catalog(catalog())
        .with_behavior(Arc::new(HuaweiBehavior))
}

fn catalog() -> CommandCatalog {
    CommandCatalog::new()
        .with(
            Category::Logging,
            include_filter("loghost")
                .with_extract(r"(?i)loghost\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})")
                .unwrap(),
        )
        .with(
            Category::Version,
            table("display version", "[sS]oftware")
                .with_extract(r"(?i)software.*version(.*)")
                .unwrap(),
        )
        .with(
            Category::Ntp,
            include_filter("ntp-service")
                .with_extract(r"ntp-service unicast-server\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})")
                .unwrap(),
        )
        .with(
            Category::Snmp,
            include_filter("snmp-agent")
                .with_extract(r"udp-domain\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})")
                .unwrap(),
        )
        .with(Category::Vlan, table("display vlan", r"VID\s+Status"))
        .with(Category::Route, table("display ip routing-table", "Routing"))
        .with(Category::Interface, table("display interface", "Output"))
}

/// `display current-configuration | include <keyword>`.
///
/// Completes once every line between the echo and the prompt carries the
/// keyword, so a configuration without any matching line still succeeds.
fn include_filter(keyword: &str) -> CommandSpec {
    let escaped = regex::escape(keyword);
    let success = format!(
        r"\A[^\r\n]*(?:[\r\n]+[^\r\n]*{escaped}[^\r\n]*)*[\r\n]+[<\[]\S+[>\]] ?\z"
    );
    CommandSpec::new(
        format!("display current-configuration | include {keyword}"),
        PromptSpec::new(&success, Some(COMMAND_ERROR)).unwrap(),
    )
}

/// A display command whose output contains `marker` before the prompt.
fn table(command: &str, marker: &str) -> CommandSpec {
    let success = format!(r"{marker}[\s\S]+{TRAILING_PROMPT}");
    CommandSpec::new(
        command,
        PromptSpec::new(&success, Some(COMMAND_ERROR)).unwrap(),
    )
}
