pub mod csv_export;
pub mod table_scraper;

pub use csv_export::*;
pub use table_scraper::*;
