//! Device inventory report
//!
//! This example connects to one or more Huawei VRP devices through TCP
//! console servers (an already logged-in shell), reads VLANs, routes,
//! interfaces and the logging/NTP/SNMP settings, and prints one JSON
//! document per device. Devices are queried in parallel.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example device_report -- --host 192.0.2.10:2001 --host 192.0.2.10:2002
//! ```
//!
//! Save the configuration afterwards:
//! ```bash
//! cargo run --example device_report -- --host 192.0.2.10:2001 --save
//! ```

use std::env;
use std::time::Duration;

use serde::Serialize;
use tokio::net::TcpStream;
use tokio::task::JoinSet;
use vrpsh::transport::StreamShell;
use vrpsh::{DriverBuilder, InterfaceRecord, OperationResult, RouteRecord, VlanRecord};

#[derive(Debug, Default, Serialize)]
struct Report {
    host: String,
    mode: Option<String>,
    version: Option<String>,
    loghosts: Vec<String>,
    ntp_servers: Vec<String>,
    snmp_targets: Vec<String>,
    vlans: Vec<VlanRecord>,
    routes: Vec<RouteRecord>,
    interfaces: Vec<InterfaceRecord>,
    saved: Option<bool>,
    errors: Vec<String>,
}

impl Report {
    /// Keep the payload, or record why there is none.
    fn take<T: Default>(&mut self, what: &str, result: OperationResult<T>) -> T {
        if let Some(detail) = result.error_detail() {
            self.errors.push(format!("{}: {}", what, detail));
        }
        result.into_payload().unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.hosts.is_empty() {
        eprintln!("Error: at least one --host is required");
        std::process::exit(1);
    }

    let mut tasks = JoinSet::new();
    for host in args.hosts.clone() {
        let timeout = Duration::from_secs(args.timeout);
        let save = args.save;
        tasks.spawn(async move { report(host, timeout, save).await });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
            Err(err) => eprintln!("{}", err),
        }
    }

    Ok(())
}

async fn report(host: String, timeout: Duration, save: bool) -> Result<Report, String> {
    let stream = TcpStream::connect(&host)
        .await
        .map_err(|e| format!("{}: {}", host, e))?;
    let mut driver = DriverBuilder::new()
        .platform("huawei_vrp")
        .timeout(timeout)
        .build(StreamShell::with_defaults(stream))
        .map_err(|e| format!("{}: {}", host, e))?;

    let mut report = Report {
        host: host.clone(),
        ..Default::default()
    };

    match driver.open().await {
        OperationResult::Succeeded(mode) => report.mode = Some(mode.to_string()),
        other => {
            report.take("open", other);
            return Ok(report);
        }
    }

    let version = driver.show_version().await;
    report.version = report.take("version", version);
    let loghosts = driver.show_logging().await;
    report.loghosts = report.take("logging", loghosts);
    let ntp = driver.show_ntp().await;
    report.ntp_servers = report.take("ntp", ntp);
    let snmp = driver.show_snmp().await;
    report.snmp_targets = report.take("snmp", snmp);
    let vlans = driver.show_vlans().await;
    report.vlans = report.take("vlans", vlans);
    let routes = driver.show_routes().await;
    report.routes = report.take("routes", routes);
    let interfaces = driver.show_interfaces().await;
    report.interfaces = report.take("interfaces", interfaces);

    if save {
        let entered = driver.enter_configuration().await;
        report.take("enter configuration", entered);
        let saved = driver.save_configuration().await;
        report.saved = Some(saved.is_success());
        report.take("save", saved);
    }

    if let Err(err) = driver.close().await {
        report.errors.push(format!("close: {}", err));
    }
    Ok(report)
}

/// Simple argument parser
struct Args {
    hosts: Vec<String>,
    timeout: u64,
    save: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut hosts = Vec::new();
        let mut timeout = 30u64;
        let mut save = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    i += 1;
                    if i < args.len() {
                        hosts.push(args[i].clone());
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(30);
                    }
                }
                "--save" => save = true,
                "--help" => {
                    println!("Usage: device_report --host ADDR:PORT [--host ...] [--timeout SECS] [--save]");
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            hosts,
            timeout,
            save,
        }
    }
}
