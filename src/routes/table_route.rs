use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::routes::home_route::{
    render_page, table_options, IndexTemplate, SelectedTable, PREVIEW_ROWS,
};
use crate::services::csv_export;
use crate::session::{self, SessionStore};

#[derive(Deserialize)]
struct ShowTableQuery {
    index: usize,
}

#[get("/table")]
pub async fn show_table(
    req: HttpRequest,
    query: web::Query<ShowTableQuery>,
    store: web::Data<SessionStore>,
) -> HttpResponse {
    let tables = session::session_from_request(&req)
        .and_then(|id| store.get(&id))
        .unwrap_or_default();

    // An out-of-range index just resets the selection.
    let selected = tables.get(query.index).map(|table| SelectedTable {
        index: query.index,
        label: table.label.clone(),
        preview: table.preview(PREVIEW_ROWS).to_vec(),
        row_count: table.rows.len(),
    });
    let selected_index = selected.as_ref().map(|s| s.index);

    render_page(IndexTemplate {
        banner: None,
        options: table_options(&tables, selected_index),
        selected,
    })
}

#[get("/download/{index}")]
pub async fn download_table(
    req: HttpRequest,
    path: web::Path<usize>,
    store: web::Data<SessionStore>,
) -> HttpResponse {
    let index = path.into_inner();

    let Some(tables) = session::session_from_request(&req).and_then(|id| store.get(&id)) else {
        return HttpResponse::NotFound().body("No scraped tables in this session.");
    };
    let Some(table) = tables.get(index) else {
        return HttpResponse::NotFound().body(format!("No table at index {}.", index));
    };

    match csv_export::to_csv(table) {
        Ok(csv_text) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    csv_export::export_file_name(index)
                ),
            ))
            .body(csv_text),
        Err(e) => {
            log::error!("CSV export of table {} failed: {}", index, e);
            HttpResponse::InternalServerError().body("Failed to export table as CSV.")
        }
    }
}
