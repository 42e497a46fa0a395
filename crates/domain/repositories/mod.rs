pub mod browser_page;
pub mod payment_contacts;
pub mod store_settings;
