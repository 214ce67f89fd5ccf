pub mod memory;
pub mod repository;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::{NewTodo, Todo, TodoChanges};

pub use memory::MemoryTodoStore;
pub use repository::SqliteTodoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("stored id {0:?} is not a valid object id")]
    CorruptId(String),
}

/// Persistence for the todo collection.
///
/// Each store picks its own identifier type; handlers only need to parse it
/// from a path segment and render it back out as JSON.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    type Id: Clone + fmt::Display + FromStr + Serialize + Send + Sync + 'static;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_all(&self) -> Result<Vec<Todo<Self::Id>>, StoreError>;

    async fn insert(&self, todo: NewTodo) -> Result<Todo<Self::Id>, StoreError>;

    async fn find_by_id(&self, id: &Self::Id) -> Result<Option<Todo<Self::Id>>, StoreError>;

    async fn update(
        &self,
        id: &Self::Id,
        changes: TodoChanges,
    ) -> Result<Option<Todo<Self::Id>>, StoreError>;

    // must flip in one step; concurrent toggles may not lose a flip
    async fn toggle(&self, id: &Self::Id) -> Result<Option<Todo<Self::Id>>, StoreError>;

    async fn delete_by_id(&self, id: &Self::Id) -> Result<u64, StoreError>;
}
