//! High-level driver for device interaction.
//!
//! [`GenericDriver`] is the session object: it executes commands against
//! success/error patterns, tracks the mode, saves configuration and reads
//! structured inventory. Operations report through [`OperationResult`].

mod builder;
mod commit;
mod generic;
mod inventory;
mod outcome;
mod privilege;
mod response;

pub use builder::DriverBuilder;
pub use generic::GenericDriver;
pub use outcome::{Failure, FailureKind, OperationResult};
pub use response::{ExecState, Execution};
