use std::collections::HashMap;
use std::sync::Mutex;

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::domain::table::ExtractedTable;

pub const SESSION_COOKIE: &str = "session_id";

/// Per-browser-session cache of the last successful scrape.
///
/// Owned by the application and handed to the routes as `web::Data`; a
/// failed scrape never touches the stored tables, a new success overwrites
/// them, and everything is gone when the process exits.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Vec<ExtractedTable>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, session_id: Uuid, tables: Vec<ExtractedTable>) {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .insert(session_id, tables);
    }

    pub fn get(&self, session_id: &Uuid) -> Option<Vec<ExtractedTable>> {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .get(session_id)
            .cloned()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The session id a browser presented, if it sent a valid cookie.
pub fn session_from_request(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}
