//! Port contracts for the work-order context.

mod localizer;
mod repository;

pub use localizer::{EnglishLocalizer, Localizer, OrderStateToken};
pub use repository::{
    MaintenanceRepository, ServiceOrderRepository, WorkOrderEntity, WorkOrderRepositoryError,
    WorkOrderRepositoryResult,
};
