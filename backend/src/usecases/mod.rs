pub mod contact_traffic;
pub mod storefront;
pub mod whatsapp_link;
