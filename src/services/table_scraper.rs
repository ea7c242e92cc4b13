use scraper::{ElementRef, Html, Selector};

use crate::domain::{scrape_error::ScrapeError, table::ExtractedTable};

const DEFAULT_TABLE_LABEL: &str = "Table";

/// Fetch `url` and pull out every `<table>` carrying `table_class`.
///
/// One GET per call, no retries. Anything other than a 200 response, a
/// transport failure, or an empty match set ends the attempt with an error
/// whose message is meant for the user as-is.
pub async fn scrape_tables(
    client: &reqwest::Client,
    url: &str,
    table_class: &str,
) -> Result<Vec<ExtractedTable>, ScrapeError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        log::error!("Fetching {} failed with status {}", url, status);
        return Err(ScrapeError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    let tables = extract_tables(&body, table_class)?;

    log::info!(
        "Scraped {} tables with class {:?} from {}",
        tables.len(),
        table_class,
        url
    );
    Ok(tables)
}

/// Extract every table whose class attribute contains `table_class` as a
/// whole space-separated token, in document order.
///
/// A single pre-order pass over the document tracks the most recent `<h3>`,
/// so each matching table picks up the nearest heading before it, whether
/// or not they are siblings. Tables with no preceding heading anywhere are
/// labeled "Table".
pub fn extract_tables(
    html: &str,
    table_class: &str,
) -> Result<Vec<ExtractedTable>, ScrapeError> {
    let document = Html::parse_document(html);

    let mut tables = vec![];
    let mut last_heading: Option<String> = None;

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        match element.value().name() {
            "h3" => last_heading = Some(element_text(element)),
            "table" if has_class_token(element, table_class) => {
                tables.push(ExtractedTable {
                    label: last_heading
                        .clone()
                        .unwrap_or_else(|| DEFAULT_TABLE_LABEL.to_string()),
                    rows: extract_rows(element),
                });
            }
            _ => {}
        }
    }

    if tables.is_empty() {
        log::error!("No tables matched class {:?}", table_class);
        return Err(ScrapeError::NoTablesFound);
    }
    Ok(tables)
}

fn has_class_token(element: ElementRef, table_class: &str) -> bool {
    element.value().classes().any(|class| class == table_class)
}

/// Every `<tr>` descendant of the table, each reduced to the text of its
/// `<td>`/`<th>` children. Rows are left jagged; nothing pads or truncates.
fn extract_rows(table: ElementRef) -> Vec<Vec<String>> {
    let row_selector = Selector::parse("tr").unwrap();

    table
        .select(&row_selector)
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .map(element_text)
                .collect()
        })
        .collect()
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{extract_tables, scrape_tables};
    use crate::domain::{scrape_error::ScrapeError, table::ExtractedTable};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"
        <html><body>
            <h3>Sales</h3>
            <table class="stats">
                <tr><th>Region</th><th>Total</th></tr>
                <tr><td>North</td><td>120</td></tr>
            </table>
            <div><h3>Costs</h3></div>
            <table class="stats wide">
                <tr><td>Rent</td><td>90</td></tr>
            </table>
            <table class="unrelated">
                <tr><td>skip me</td></tr>
            </table>
        </body></html>
    "#;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn extracts_matching_tables_in_document_order() {
        let tables = extract_tables(PAGE, "stats").unwrap();

        assert_eq!(
            tables,
            vec![
                ExtractedTable {
                    label: "Sales".to_string(),
                    rows: rows(&[&["Region", "Total"], &["North", "120"]]),
                },
                ExtractedTable {
                    label: "Costs".to_string(),
                    rows: rows(&[&["Rent", "90"]]),
                },
            ]
        );
    }

    #[test]
    fn class_matching_is_token_based_not_substring() {
        let html = r#"
            <table class="stats-wide"><tr><td>no</td></tr></table>
            <table class="big stats"><tr><td>yes</td></tr></table>
        "#;
        let tables = extract_tables(html, "stats").unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, rows(&[&["yes"]]));
    }

    #[test]
    fn zero_matches_is_an_error() {
        let err = extract_tables("<p>No tables here</p>", "stats").unwrap_err();

        assert!(matches!(err, ScrapeError::NoTablesFound));
        assert_eq!(err.to_string(), "No tables found with the given class name.");
    }

    #[test]
    fn label_defaults_when_no_heading_precedes() {
        let html = r#"<table class="x"><tr><td>1</td></tr></table><h3>Too late</h3>"#;
        let tables = extract_tables(html, "x").unwrap();

        assert_eq!(tables[0].label, "Table");
    }

    #[test]
    fn nearest_preceding_heading_wins() {
        let html = r#"
            <h3>Old</h3>
            <section><h3>  Fresh   heading </h3></section>
            <p>filler</p>
            <table class="x"><tr><td>1</td></tr></table>
        "#;
        let tables = extract_tables(html, "x").unwrap();

        assert_eq!(tables[0].label, "Fresh heading");
    }

    #[test]
    fn consecutive_tables_share_a_heading() {
        let html = r#"
            <h3>Quarterly</h3>
            <table class="x"><tr><td>1</td></tr></table>
            <table class="x"><tr><td>2</td></tr></table>
        "#;
        let tables = extract_tables(html, "x").unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].label, "Quarterly");
        assert_eq!(tables[1].label, "Quarterly");
    }

    #[test]
    fn jagged_rows_are_preserved() {
        let html = r#"
            <table class="x">
                <tr><td>a</td><td>b</td><td>c</td></tr>
                <tr><td>d</td><td>e</td></tr>
                <tr><td>f</td></tr>
            </table>
        "#;
        let tables = extract_tables(html, "x").unwrap();

        assert_eq!(tables[0].rows, rows(&[&["a", "b", "c"], &["d", "e"], &["f"]]));
    }

    #[test]
    fn header_and_data_cells_become_plain_text() {
        let html = r#"
            <table class="x">
                <tr><th>Name</th><td>Ada</td></tr>
            </table>
        "#;
        let tables = extract_tables(html, "x").unwrap();

        assert_eq!(tables[0].rows, rows(&[&["Name", "Ada"]]));
    }

    #[test]
    fn cell_text_is_trimmed_and_collapsed() {
        let html = "<table class=\"x\"><tr><td>  spread \n  <b>over</b>\tlines </td></tr></table>";
        let tables = extract_tables(html, "x").unwrap();

        assert_eq!(tables[0].rows, rows(&[&["spread over lines"]]));
    }

    #[test]
    fn unclosed_tags_are_tolerated() {
        let html = r#"<h3>Messy</h3><table class="x"><tr><td>a<td>b<tr><td>c</table>"#;
        let tables = extract_tables(html, "x").unwrap();

        assert_eq!(tables[0].label, "Messy");
        assert_eq!(tables[0].rows, rows(&[&["a", "b"], &["c"]]));
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract_tables(PAGE, "stats").unwrap();
        let second = extract_tables(PAGE, "stats").unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn ok_response_yields_tables() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/report"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/report", server.uri());
        let tables = scrape_tables(&client, &url, "stats").await.unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].label, "Sales");
    }

    #[tokio::test]
    async fn non_200_status_is_reported_with_its_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = scrape_tables(&client, &server.uri(), "stats")
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::Status(404)));
        assert_eq!(
            err.to_string(),
            "Failed to retrieve content. Status code: 404"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let server = MockServer::start().await;
        let url = server.uri();
        drop(server);

        let client = reqwest::Client::new();
        let err = scrape_tables(&client, &url, "stats").await.unwrap_err();

        assert!(matches!(err, ScrapeError::Transport(_)));
        assert!(err
            .to_string()
            .starts_with("Failed to retrieve content. Transport error:"));
    }

    #[tokio::test]
    async fn ok_response_without_matches_reports_no_tables() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>empty</p>"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = scrape_tables(&client, &server.uri(), "stats")
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::NoTablesFound));
    }
}
