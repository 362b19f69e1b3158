//! Diesel schema for work-order persistence.
//!
//! `maintenance.service_order_id` is declared `ON DELETE CASCADE` in the
//! database so removing an order drops its maintenance records. Ticket
//! numbers are drawn from the `service_order_ticket_seq` sequence.

diesel::table! {
    /// Service-order records.
    service_orders (id) {
        /// Order identifier.
        id -> Uuid,
        /// Sequence-assigned ticket number.
        ticket -> Int4,
        /// Station the work is executed at.
        station_id -> Uuid,
        /// Engineer responsible for the work.
        engineer_id -> Uuid,
        /// Name of the person who authored the order.
        #[max_length = 100]
        author -> Varchar,
        /// Date the work is executed.
        execution_date -> Date,
        /// Description of the service performed.
        #[max_length = 300]
        service_description -> Varchar,
        /// Free-form observation.
        #[max_length = 300]
        observation -> Nullable<Varchar>,
        /// Open flag; an active order is open.
        active -> Bool,
        /// Date of first persistence.
        created_at -> Date,
        /// Date of last modification.
        update_at -> Date,
    }
}

diesel::table! {
    /// Maintenance records, one-to-one with service orders.
    maintenance (id) {
        /// Maintenance identifier.
        id -> Uuid,
        /// Owning service order.
        service_order_id -> Uuid,
        /// Maintenance type code.
        #[max_length = 1]
        type_maintenance -> Varchar,
        /// Next due date, if scheduled.
        next_maintenance -> Nullable<Date>,
        /// Soft-delete flag.
        active -> Bool,
        /// Date of first persistence.
        created_at -> Date,
        /// Date of last modification.
        update_at -> Date,
    }
}

diesel::joinable!(maintenance -> service_orders (service_order_id));
diesel::allow_tables_to_appear_in_same_query!(maintenance, service_orders);
