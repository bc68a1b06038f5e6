//! # Driving Port (Inbound)
//!
//! The interface every contract exposes to [`ContractService`](crate::service::ContractService).

use crate::errors::ContractError;
use crate::host::InvocationHost;

/// A deployable contract.
///
/// `Storage` is the contract's declared record of scalar state. The service
/// hands each invocation a private copy and keeps it only if the invocation
/// succeeds.
pub trait Contract {
    /// Declared storage record.
    type Storage: Clone + Default;

    /// Human-readable contract name, used in logs.
    fn name(&self) -> &'static str;

    /// Runs once at deployment.
    ///
    /// # Errors
    ///
    /// Any error aborts the deployment.
    fn init(&self, host: &mut InvocationHost<'_>, storage: &mut Self::Storage) -> Result<(), ContractError>;

    /// Dispatches entry point `api` with its raw argument string.
    ///
    /// # Errors
    ///
    /// Any error aborts the invocation.
    fn call(
        &self,
        api: &str,
        arg: &str,
        host: &mut InvocationHost<'_>,
        storage: &mut Self::Storage,
    ) -> Result<Option<String>, ContractError>;

    /// Whether `api` only reads state.
    fn is_offline(&self, api: &str) -> bool;
}
