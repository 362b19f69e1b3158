//! Diesel schema for telemetry persistence.
//!
//! `davis_stations.plan_id` and `davis_stations.station_id` are declared
//! `ON DELETE CASCADE` in the database so removing a plan or station drops
//! the device links.

diesel::table! {
    /// Data-plan records.
    data_plans (id) {
        /// Plan identifier.
        id -> Uuid,
        /// Plan code.
        #[max_length = 30]
        code -> Varchar,
        /// Carrier reference.
        #[max_length = 10]
        reference -> Varchar,
        /// Start date of the validity window.
        start_date -> Date,
        /// Expiry date, if computed.
        expire -> Nullable<Date>,
        /// Soft-delete flag.
        active -> Bool,
        /// Date of first persistence.
        created_at -> Date,
        /// Date of last modification.
        update_at -> Date,
    }
}

diesel::table! {
    /// Station-device link records.
    davis_stations (id) {
        /// Link identifier.
        id -> Uuid,
        /// Station the device is installed at.
        station_id -> Uuid,
        /// Data plan the device transmits over.
        plan_id -> Uuid,
        /// Device name.
        #[max_length = 20]
        name -> Varchar,
        /// Device identifier.
        #[max_length = 20]
        did -> Varchar,
        /// Device api key.
        #[max_length = 20]
        key -> Varchar,
        /// Additional firmware field.
        #[max_length = 15]
        af -> Nullable<Varchar>,
        /// Installation observation.
        #[max_length = 300]
        observation -> Varchar,
        /// User who last modified the record.
        modifier_user -> Uuid,
        /// Soft-delete flag.
        active -> Bool,
        /// Date of first persistence.
        created_at -> Date,
        /// Date of last modification.
        update_at -> Date,
    }
}

diesel::joinable!(davis_stations -> data_plans (plan_id));
diesel::allow_tables_to_appear_in_same_query!(davis_stations, data_plans);
