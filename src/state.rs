use crate::catalog::Catalog;
use crate::closing::Selection;
use crate::editor::WasteList;
use crate::store::LedgerStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State of the single active UI session.
#[derive(Debug)]
pub struct Session {
    pub editor: WasteList,
    pub selection: Selection,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub catalog: Arc<Catalog>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>, catalog: Catalog) -> Self {
        let session = Session {
            editor: WasteList::new(&catalog),
            selection: Selection::default(),
        };
        Self {
            store,
            catalog: Arc::new(catalog),
            session: Arc::new(Mutex::new(session)),
        }
    }
}
