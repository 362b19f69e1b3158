//! Domain model for service orders and maintenance records.

mod error;
mod ids;
mod maintenance;
mod service_order;

pub use error::{ParseMaintenanceTypeError, WorkOrderDomainError};
pub use ids::{MaintenanceId, ServiceOrderId};
pub use maintenance::{
    Maintenance, MaintenanceType, PersistedMaintenanceData, next_due_date,
};
pub use service_order::{
    NewServiceOrder, PersistedServiceOrderData, ServiceOrder, TicketNumber,
};
