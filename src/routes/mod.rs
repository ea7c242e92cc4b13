pub mod home_route;
pub mod scrape_route;
pub mod table_route;
