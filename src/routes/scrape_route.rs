use actix_web::cookie::Cookie;
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::home_route::{render_page, table_options, Banner, IndexTemplate};
use crate::services::table_scraper;
use crate::session::{self, SessionStore, SESSION_COOKIE};

#[derive(Deserialize)]
struct ScrapeForm {
    url: String,
    table_class: String,
}

#[post("/scrape")]
pub async fn scrape(
    req: HttpRequest,
    form: web::Form<ScrapeForm>,
    client: web::Data<reqwest::Client>,
    store: web::Data<SessionStore>,
) -> HttpResponse {
    let existing_session = session::session_from_request(&req);

    // Both fields are required; an empty one means no scrape attempt at all.
    if form.url.trim().is_empty() || form.table_class.trim().is_empty() {
        let tables = existing_session
            .and_then(|id| store.get(&id))
            .unwrap_or_default();
        return render_page(IndexTemplate {
            banner: None,
            options: table_options(&tables, None),
            selected: None,
        });
    }

    match table_scraper::scrape_tables(&client, &form.url, &form.table_class).await {
        Ok(tables) => {
            let session_id = existing_session.unwrap_or_else(Uuid::new_v4);
            let banner = Banner::success(format!("Scraped {} tables successfully!", tables.len()));
            let options = table_options(&tables, None);
            store.insert(session_id, tables);

            let mut response = render_page(IndexTemplate {
                banner: Some(banner),
                options,
                selected: None,
            });
            let cookie = Cookie::build(SESSION_COOKIE, session_id.to_string())
                .path("/")
                .finish();
            if let Err(e) = response.add_cookie(&cookie) {
                log::error!("Failed to attach session cookie: {}", e);
            }
            response
        }
        Err(e) => {
            log::error!("Scraping {} failed: {}", form.url, e);
            // The previous result, if any, stays untouched.
            let tables = existing_session
                .and_then(|id| store.get(&id))
                .unwrap_or_default();
            render_page(IndexTemplate {
                banner: Some(Banner::error(e.to_string())),
                options: table_options(&tables, None),
                selected: None,
            })
        }
    }
}
