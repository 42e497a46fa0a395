pub mod browser_page;
