//! End-to-end sessions against a scripted VRP shell.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use vrpsh::transport::{StreamConfig, StreamShell};
use vrpsh::{DriverBuilder, FailureKind, GenericDriver, Mode, ReplayShell};

const BANNER: &str = "\r\nInfo: The max number of VTY users is 5.\r\n<HUAWEI>";
const SCREEN_LENGTH: &str = "screen-length 0 temporary";

/// A shell that has already answered the login banner and the paging
/// command sent by `open`.
fn logged_in() -> ReplayShell {
    ReplayShell::new()
        .output(BANNER)
        .input(SCREEN_LENGTH)
        .output(format!(
            "{}\r\nInfo: The configuration takes effect on the current user terminal interface only.\r\n<HUAWEI>",
            SCREEN_LENGTH
        ))
}

async fn open(shell: ReplayShell) -> GenericDriver<ReplayShell> {
    let mut driver = DriverBuilder::new()
        .platform("huawei_vrp")
        .timeout(Duration::from_millis(300))
        .drain_timeout(Duration::from_millis(20))
        .build(shell)
        .unwrap();
    assert_eq!(driver.open().await.payload(), Some(&Mode::GENERAL));
    driver
}

fn sent_after_open(driver: &GenericDriver<ReplayShell>) -> Vec<String> {
    driver.transport().sent()[1..].to_vec()
}

#[tokio::test]
async fn test_transitions_at_target_send_nothing() {
    let shell = logged_in()
        .input("system-view")
        .output("system-view\r\nEnter system view, return user view with Ctrl+Z.\r\n[HUAWEI]");
    let mut driver = open(shell).await;

    assert!(driver.demote_to_general().await.is_success());
    assert!(sent_after_open(&driver).is_empty());

    assert!(driver.promote_to_privileged().await.is_success());
    assert!(driver.promote_to_privileged().await.is_success());
    assert_eq!(sent_after_open(&driver), ["system-view"]);
    assert_eq!(driver.mode(), Mode::PRIVILEGED);
}

#[tokio::test]
async fn test_demotion_never_raises_mode() {
    let shell = logged_in()
        .input("system-view")
        .output("system-view\r\n[HUAWEI]")
        .input("return")
        .output("return\r\n<HUAWEI>");
    let mut driver = open(shell).await;

    assert!(driver.promote_to_privileged().await.is_success());
    let before = driver.mode();
    assert!(driver.demote_to_general().await.is_success());
    assert!(driver.mode() <= before);
    assert_eq!(driver.mode(), Mode::GENERAL);
}

#[tokio::test]
async fn test_save_outside_configuration_sends_nothing() {
    let mut driver = open(logged_in()).await;

    let result = driver.save_configuration().await;
    assert_eq!(result.failure_kind(), Some(FailureKind::Precondition));
    assert!(sent_after_open(&driver).is_empty());
}

#[tokio::test]
async fn test_demotion_ends_configuration_context() {
    let shell = logged_in()
        .input("system-view")
        .output("system-view\r\n[HUAWEI]")
        .input("return")
        .output("return\r\n<HUAWEI>");
    let mut driver = open(shell).await;

    assert!(driver.enter_configuration().await.is_success());
    assert!(driver.demote_to_general().await.is_success());
    assert!(!driver.in_config_context());

    let result = driver.save_configuration().await;
    assert_eq!(result.failure_kind(), Some(FailureKind::Precondition));
    assert_eq!(sent_after_open(&driver), ["system-view", "return"]);
}

#[tokio::test]
async fn test_commit_ends_configuration_context() {
    let shell = logged_in()
        .input("system-view")
        .output("system-view\r\n[HUAWEI]")
        .input("return")
        .output("return\r\n<HUAWEI>")
        .input("save")
        .output("save\r\nAre you sure to continue?[Y/N]")
        .input("Y")
        .output("Y\r\nSave the configuration successfully.\r\n<HUAWEI>");
    let mut driver = open(shell).await;

    assert!(driver.enter_configuration().await.is_success());
    assert!(driver.commit().await.is_success());
    assert!(!driver.in_config_context());
    assert_eq!(
        driver.save_configuration().await.failure_kind(),
        Some(FailureKind::Precondition)
    );
}

#[tokio::test]
async fn test_configure_and_save() {
    let shell = logged_in()
        .input("system-view")
        .output("system-view\r\nEnter system view, return user view with Ctrl+Z.\r\n[HUAWEI]")
        .input("return")
        .output("return\r\n<HUAWEI>")
        .input("save")
        .output("save\r\n")
        .output("The current configuration will be written to the device.\r\n")
        .output("Are you sure to continue?[Y/N]")
        .input("Y")
        .output("Y\r\nNow saving the current configuration to the slot 0.\r\n")
        .output("Save the configuration successfully.\r\n<HUAWEI>");
    let mut driver = open(shell).await;

    assert!(driver.enter_configuration().await.is_success());
    assert!(driver.in_config_context());

    let result = driver.save_configuration().await;
    assert!(result.is_success(), "{:?}", result);
    assert_eq!(sent_after_open(&driver), ["system-view", "return", "save", "Y"]);
    assert_eq!(
        sent_after_open(&driver).iter().filter(|l| *l == "Y").count(),
        1
    );
    assert!(!driver.in_config_context());
    assert_eq!(driver.mode(), Mode::GENERAL);
    assert!(driver.transport().is_exhausted());
}

#[tokio::test]
async fn test_vlan_status_links_to_listed_vlans() {
    let lines = [
        "display vlan",
        "The total number of vlans is : 2",
        "--------------------------------------------------------------------------------",
        "VID  Type    Ports",
        "--------------------------------------------------------------------------------",
        "10   common  UT:GE0/0/1(U)",
        "",
        "VID  Status  Property      MAC-LRN Statistics Description",
        "--------------------------------------------------------------------------------",
        "10   enable  default       enable  disable    users",
        "20   enable  default       enable  disable    VLAN 0020",
        "<HUAWEI>",
    ];
    let shell = logged_in()
        .input("display vlan")
        .output(lines.join("\r\n"));
    let mut driver = open(shell).await;

    let vlans = driver.show_vlans().await.into_payload().unwrap();
    assert_eq!(vlans.len(), 1);
    assert_eq!(vlans[0].id, 10);
    assert_eq!(vlans[0].status.as_deref(), Some("enable"));
    assert_eq!(vlans[0].description.as_deref(), Some("users"));
    assert_eq!(vlans[0].members, ["GE0/0/1(U)"]);
}

#[tokio::test]
async fn test_interfaces_from_two_blocks() {
    let lines = [
        "display interface",
        "GigabitEthernet0/0/1 current state : UP",
        "Line protocol current state : UP",
        "Description:uplink",
        "Speed : 1000,  Loopback: NONE",
        "Duplex: FULL,  Negotiation: ENABLE",
        "Output:  2000 packets, 200000 bytes",
        "    Input bandwidth utilization  :    0.01%",
        "    Output bandwidth utilization :    0.02%",
        "",
        "Vlanif10 current state : UP",
        "Line protocol current state : UP",
        "Route Port,The Maximum Transmit Unit is 1500",
        "Internet Address is 10.1.1.1/24",
        "    Input bandwidth utilization  : --",
        "    Output bandwidth utilization : --",
        "<HUAWEI>",
    ];
    let shell = logged_in()
        .input("display interface")
        .output(lines.join("\r\n"));
    let mut driver = open(shell).await;

    let interfaces = driver.show_interfaces().await.into_payload().unwrap();
    let names: Vec<_> = interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["GigabitEthernet0/0/1", "Vlanif10"]);
    assert_eq!(interfaces[0].speed, Some(1000));
    assert_eq!(interfaces[1].mtu, Some(1500));
}

#[tokio::test]
async fn test_loghosts_in_order() {
    let command = "display current-configuration | include loghost";
    let shell = logged_in().input(command).output(format!(
        "{}\r\n info-center loghost 10.0.0.1\r\n info-center loghost 10.0.0.2 facility local4\r\n info-center loghost 10.0.0.3\r\n<HUAWEI>",
        command
    ));
    let mut driver = open(shell).await;

    let hosts = driver.show_logging().await.into_payload().unwrap();
    assert_eq!(hosts, ["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
}

#[tokio::test]
async fn test_no_loghosts_is_empty_success() {
    let command = "display current-configuration | include loghost";
    let shell = logged_in()
        .input(command)
        .output(format!("{}\r\n<HUAWEI>", command));
    let mut driver = open(shell).await;

    let result = driver.show_logging().await;
    assert!(result.is_success());
    assert_eq!(result.into_payload(), Some(Vec::new()));
}

#[tokio::test]
async fn test_timeout_does_not_poison_next_command() {
    let shell = logged_in()
        .input("display ip routing-table")
        .output("display ip routing-table\r\n")
        .input("display version")
        .output("display version\r\nVRP (R) software, Version 5.170 (S5720 V200R011C10SPC500)\r\n<HUAWEI>");
    let mut driver = open(shell).await;

    let routes = driver.show_routes().await;
    assert_eq!(routes.failure_kind(), Some(FailureKind::Timeout));

    let version = driver.show_version().await.into_payload();
    assert_eq!(
        version,
        Some(Some("5.170 (S5720 V200R011C10SPC500)".to_string()))
    );
}

#[tokio::test]
async fn test_late_save_output_is_drained() {
    let (client, device) = tokio::io::duplex(4096);
    let (reader, mut writer) = tokio::io::split(device);
    let device = tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        writer.write_all(b"<HUAWEI>").await.unwrap();
        let replies = [
            (SCREEN_LENGTH, "screen-length 0 temporary\r\n<HUAWEI>"),
            ("system-view", "system-view\r\n[HUAWEI]"),
            ("return", "return\r\n<HUAWEI>"),
            (
                "save",
                "save\r\nNow saving the current configuration to the slot 0.\r\n",
            ),
        ];
        for (expected, reply) in replies {
            assert_eq!(lines.next_line().await.unwrap().as_deref(), Some(expected));
            writer.write_all(reply.as_bytes()).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(450)).await;
        writer
            .write_all(b"Save the configuration successfully.\r\n<HUAWEI>")
            .await
            .unwrap();

        assert_eq!(
            lines.next_line().await.unwrap().as_deref(),
            Some("display version")
        );
        writer
            .write_all(b"display version\r\nVRP (R) software, Version 5.170\r\n<HUAWEI>")
            .await
            .unwrap();
    });

    let shell = StreamShell::new(
        client,
        StreamConfig::default().with_read_timeout(Duration::from_millis(300)),
    );
    let mut driver = DriverBuilder::new()
        .platform("huawei_vrp")
        .timeout(Duration::from_millis(300))
        .drain_timeout(Duration::from_millis(400))
        .build(shell)
        .unwrap();
    assert!(driver.open().await.is_success());
    assert!(driver.enter_configuration().await.is_success());

    let saved = driver.save_configuration().await;
    assert_eq!(saved.failure_kind(), Some(FailureKind::Timeout));

    let execution = driver.send_command("display version").await.unwrap();
    assert!(execution.is_success());
    assert!(execution.content.starts_with("display version"));
    assert!(!execution.content.contains("successfully"));
    device.await.unwrap();
}
