//! # vrpsh
//!
//! Async automation of a network device's command shell.
//!
//! vrpsh drives a device CLI over an already established session: it moves
//! the shell between general, privileged and nested modes, saves the
//! configuration while answering the device's confirmation question, and
//! turns display output (VLANs, routes, interfaces, logging/NTP/SNMP
//! settings) into typed records.
//!
//! ## Features
//!
//! - Expect-style executor with success/error patterns and deadlines
//! - Mode state machine with idempotent transitions
//! - Save protocol with automatic `[Y/N]` confirmation
//! - Stateful parsers for tabular screen output
//! - Transports over any async stream, a russh channel, or a scripted replay
//! - Huawei VRP dialect built in
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokio::net::TcpStream;
//! use vrpsh::DriverBuilder;
//! use vrpsh::transport::StreamShell;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vrpsh::Error> {
//!     let stream = TcpStream::connect("192.0.2.10:2001")
//!         .await
//!         .map_err(vrpsh::error::TransportError::Io)?;
//!     let mut driver = DriverBuilder::new()
//!         .platform("huawei_vrp")
//!         .build(StreamShell::with_defaults(stream))?;
//!
//!     let _ = driver.open().await;
//!
//!     if let Some(vlans) = driver.show_vlans().await.payload() {
//!         for vlan in vlans {
//!             println!("{} {:?}", vlan.id, vlan.members);
//!         }
//!     }
//!
//!     driver.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod platform;
pub mod records;
pub mod transport;

// Re-export main types for convenience
pub use driver::{
    DriverBuilder, ExecState, Execution, Failure, FailureKind, GenericDriver, OperationResult,
};
pub use error::Error;
pub use platform::{Mode, PlatformDefinition};
pub use records::{InterfaceRecord, NextHop, RouteRecord, VlanRecord};
pub use transport::{ReplayShell, ShellTransport, SshShell, StreamShell};
