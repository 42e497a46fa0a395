pub mod enums;
pub mod purchase_selection;
pub mod storefront;
pub mod browser_locators;
