pub mod credit_packages;
pub mod payment_contacts;
pub mod store_settings;
pub mod subscription_plans;
