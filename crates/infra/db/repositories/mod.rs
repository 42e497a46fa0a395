pub mod payment_contacts;
pub mod store_settings;
