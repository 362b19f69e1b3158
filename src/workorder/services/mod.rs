//! Application services for the work-order context.

pub mod labels;
mod ledger;
mod scheduling;

pub use ledger::{
    OpenServiceOrderRequest, ServiceOrderLedgerService, WorkOrderServiceError,
    WorkOrderServiceResult,
};
pub use scheduling::MaintenanceSchedulingService;
