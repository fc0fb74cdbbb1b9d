//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::query::QuerySession;

/// Shared application state.
///
/// There is one query session for the whole server; the mutex makes
/// requests take turns with it.
#[derive(Clone)]
pub struct AppState {
    /// Trip catalog, loaded at start-up
    pub catalog: Arc<Catalog>,

    /// The query session every request works on
    pub session: Arc<Mutex<QuerySession>>,
}

impl AppState {
    /// Create a new app state over a loaded catalog.
    pub fn new(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let session = QuerySession::new(Arc::clone(&catalog));
        Self {
            catalog,
            session: Arc::new(Mutex::new(session)),
        }
    }
}
