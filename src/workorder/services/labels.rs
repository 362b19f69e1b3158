//! Display-label composition for work-order records.

use crate::workorder::domain::{Maintenance, ServiceOrder, TicketNumber};
use crate::workorder::ports::{Localizer, OrderStateToken};

/// Offset applied to ticket numbers in the human-facing code.
const TICKET_CODE_OFFSET: u32 = 100;

/// Renders the human-facing order code, e.g. ticket 7 becomes `OS107`.
#[must_use]
pub fn ticket_code(ticket: TicketNumber) -> String {
    format!("OS{}", TICKET_CODE_OFFSET + ticket.value())
}

/// Composes a service-order display label:
/// `<code> | <station label> | <state>`.
#[must_use]
pub fn service_order_label(
    order: &ServiceOrder,
    station_label: &str,
    localizer: &dyn Localizer,
) -> String {
    let token = if order.is_open() {
        OrderStateToken::Open
    } else {
        OrderStateToken::Close
    };
    format!(
        "{} | {station_label} | {}",
        ticket_code(order.ticket()),
        localizer.localize(token)
    )
}

/// Composes a maintenance display label: the order label followed by the
/// maintenance type code.
#[must_use]
pub fn maintenance_label(maintenance: &Maintenance, order_label: &str) -> String {
    format!("{order_label} - {}", maintenance.type_maintenance().code())
}
