use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpRequest, HttpResponse};
use askama::Template;

use crate::domain::table::ExtractedTable;
use crate::session::{self, SessionStore};

pub(crate) const PREVIEW_ROWS: usize = 5;

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub banner: Option<Banner>,
    pub options: Vec<TableOption>,
    pub selected: Option<SelectedTable>,
}

pub(crate) struct Banner {
    pub kind: &'static str,
    pub message: String,
}

impl Banner {
    pub fn success(message: String) -> Self {
        Self {
            kind: "success",
            message,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            kind: "error",
            message,
        }
    }
}

pub(crate) struct TableOption {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

pub(crate) struct SelectedTable {
    pub index: usize,
    pub label: String,
    pub preview: Vec<Vec<String>>,
    pub row_count: usize,
}

pub(crate) fn table_options(
    tables: &[ExtractedTable],
    selected: Option<usize>,
) -> Vec<TableOption> {
    tables
        .iter()
        .enumerate()
        .map(|(index, table)| TableOption {
            index,
            label: table.label.clone(),
            selected: selected == Some(index),
        })
        .collect()
}

pub(crate) fn render_page(page: IndexTemplate) -> HttpResponse {
    match page.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body),
        Err(e) => {
            log::error!("Failed to render page template: {}", e);
            HttpResponse::InternalServerError().body("Failed to render page.")
        }
    }
}

#[get("/")]
pub async fn home(req: HttpRequest, store: web::Data<SessionStore>) -> HttpResponse {
    let tables = session::session_from_request(&req)
        .and_then(|id| store.get(&id))
        .unwrap_or_default();

    render_page(IndexTemplate {
        banner: None,
        options: table_options(&tables, None),
        selected: None,
    })
}
