/// Everything that can end a scrape attempt. The rendered messages are
/// shown to the user verbatim, so their wording is load-bearing.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Failed to retrieve content. Status code: {0}")]
    Status(u16),
    #[error("Failed to retrieve content. Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("No tables found with the given class name.")]
    NoTablesFound,
}
