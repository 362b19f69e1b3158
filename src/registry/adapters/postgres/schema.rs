//! Diesel schema for registry persistence.
//!
//! The two join tables carry composite primary keys; their foreign keys are
//! declared `ON DELETE CASCADE` in the database so station removal drops the
//! association rows.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 50]
        name -> Varchar,
        /// Project description.
        #[max_length = 300]
        description -> Varchar,
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

diesel::table! {
    /// Client records.
    clients (id) {
        /// Client identifier.
        id -> Uuid,
        /// Client name.
        #[max_length = 50]
        name -> Varchar,
        /// Landline number.
        #[max_length = 14]
        phone -> Nullable<Varchar>,
        /// Mobile number.
        #[max_length = 10]
        cell_phone -> Nullable<Varchar>,
        /// E-mail address.
        #[max_length = 254]
        email -> Varchar,
        /// Soft-delete flag.
        active -> Bool,
        /// Date of first persistence.
        created_at -> Date,
        /// Date of last modification.
        update_at -> Date,
    }
}

diesel::table! {
    /// Engineer records.
    engineers (id) {
        /// Engineer identifier.
        id -> Uuid,
        /// Identity-provider reference.
        identity -> Uuid,
        /// Identification number.
        #[max_length = 12]
        identification -> Nullable<Varchar>,
        /// Contact phone number.
        #[max_length = 14]
        phone -> Varchar,
        /// Soft-delete flag.
        active -> Bool,
        /// Date of first persistence.
        created_at -> Date,
        /// Date of last modification.
        update_at -> Date,
    }
}

diesel::table! {
    /// Station records.
    stations (id) {
        /// Station identifier.
        id -> Uuid,
        /// Internal identification code.
        #[max_length = 6]
        id_intern -> Varchar,
        /// Station name.
        #[max_length = 12]
        name -> Varchar,
        /// Maintenance frequency in months.
        maintenance_frequency_months -> Int4,
        /// Latitude in decimal degrees.
        latitude -> Nullable<Float8>,
        /// Longitude in decimal degrees.
        longitude -> Nullable<Float8>,
        /// Pipeline system code.
        #[max_length = 3]
        system -> Varchar,
        /// Site owner's phone number.
        #[max_length = 14]
        owner_phone -> Nullable<Varchar>,
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

diesel::table! {
    /// Station-to-project association rows.
    station_projects (station_id, project_id) {
        /// Owning station.
        station_id -> Uuid,
        /// Associated project.
        project_id -> Uuid,
    }
}

diesel::table! {
    /// Station-to-client association rows.
    station_clients (station_id, client_id) {
        /// Owning station.
        station_id -> Uuid,
        /// Associated client.
        client_id -> Uuid,
    }
}
