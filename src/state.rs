use std::sync::Arc;

use crate::db::TodoStore;

pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S: TodoStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

// derive(Clone) would demand `S: Clone`
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
