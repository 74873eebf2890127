//! Read operations that turn display commands into records.

use log::debug;

use super::generic::GenericDriver;
use super::outcome::{FailureKind, OperationResult};
use super::response::{ExecState, Execution};
use crate::error::{DriverError, Result};
use crate::platform::{Category, CommandSpec};
use crate::records::{InterfaceRecord, RouteRecord, VlanRecord};
use crate::transport::ShellTransport;

impl<T: ShellTransport> GenericDriver<T> {
    /// Configured syslog host addresses, in order.
    pub async fn show_logging(&mut self) -> OperationResult<Vec<String>> {
        self.read(Category::Logging, |spec, out| spec.extract_all(out)).await
    }

    /// Software version string, if the device printed one.
    pub async fn show_version(&mut self) -> OperationResult<Option<String>> {
        self.read(Category::Version, |spec, out| spec.extract_first(out)).await
    }

    /// Configured NTP server addresses, in order.
    pub async fn show_ntp(&mut self) -> OperationResult<Vec<String>> {
        self.read(Category::Ntp, |spec, out| spec.extract_all(out)).await
    }

    /// SNMP trap target addresses, in order.
    pub async fn show_snmp(&mut self) -> OperationResult<Vec<String>> {
        self.read(Category::Snmp, |spec, out| spec.extract_all(out)).await
    }

    pub async fn show_vlans(&mut self) -> OperationResult<Vec<VlanRecord>> {
        let behavior = self.platform.behavior.clone();
        let terminator = self.platform.line_terminator.clone();
        self.read(Category::Vlan, |_, out| behavior.parse_vlans(out, &terminator))
            .await
    }

    pub async fn show_routes(&mut self) -> OperationResult<Vec<RouteRecord>> {
        let behavior = self.platform.behavior.clone();
        let terminator = self.platform.line_terminator.clone();
        self.read(Category::Route, |_, out| behavior.parse_routes(out, &terminator))
            .await
    }

    pub async fn show_interfaces(&mut self) -> OperationResult<Vec<InterfaceRecord>> {
        let behavior = self.platform.behavior.clone();
        self.read(Category::Interface, |_, out| behavior.parse_interfaces(out))
            .await
    }

    /// Run the catalog command for `category` and extract the payload from
    /// a successful exchange. An empty extraction is still a success.
    async fn read<P>(
        &mut self,
        category: Category,
        extract: impl FnOnce(&CommandSpec, &str) -> P,
    ) -> OperationResult<P> {
        let spec = match self.catalog_entry(category) {
            Ok(spec) => spec,
            Err(err) => return err.into(),
        };
        let execution = match self.execute(&spec.command, &spec.prompt).await {
            Ok(execution) => execution,
            Err(err) => return err.into(),
        };
        match execution.state {
            ExecState::Success => {
                let payload = extract(&spec, &execution.content);
                debug!("{} read in {:?}", category, execution.elapsed);
                OperationResult::Succeeded(payload)
            }
            ExecState::Error => rejected(&execution),
            ExecState::Timeout => OperationResult::failed(
                FailureKind::Timeout,
                format!("'{}' did not complete", execution.command),
            ),
        }
    }

    fn catalog_entry(&self, category: Category) -> Result<CommandSpec> {
        match self.platform.catalog.get(category) {
            Some(spec) => Ok(spec.clone()),
            None => Err(DriverError::MissingCommand {
                platform: self.platform.name.clone(),
                category: category.to_string(),
            }
            .into()),
        }
    }
}

fn rejected<P>(execution: &Execution) -> OperationResult<P> {
    OperationResult::failed(FailureKind::CommandRejected, execution.diagnostic())
}
