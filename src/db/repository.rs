use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{StoreError, TodoStore};
use crate::models::{NewTodo, ObjectId, Todo, TodoChanges};

#[derive(Debug, FromRow)]
struct TodoRow {
    id: String,
    completed: bool,
    body: String,
}

impl TryFrom<TodoRow> for Todo<ObjectId> {
    type Error = StoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let id = row
            .id
            .parse()
            .map_err(|_| StoreError::CorruptId(row.id.clone()))?;
        Ok(Todo {
            id,
            completed: row.completed,
            body: row.body,
        })
    }
}

fn into_todos(rows: Vec<TodoRow>) -> Result<Vec<Todo<ObjectId>>, StoreError> {
    rows.into_iter().map(Todo::try_from).collect()
}

#[derive(Clone)]
pub struct SqliteTodoStore {
    db: SqlitePool,
}

impl SqliteTodoStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // every connection to `:memory:` opens its own empty database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:").await
    }

    pub async fn from_pool(db: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&db).await?;
        debug!("todo migrations applied");
        Ok(Self { db })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    type Id = ObjectId;

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Todo<ObjectId>>, StoreError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            "SELECT id, completed, body FROM todos ORDER BY rowid",
        )
        .fetch_all(&self.db)
        .await?;

        into_todos(rows)
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo<ObjectId>, StoreError> {
        let id = ObjectId::new();

        sqlx::query(
            r#"
            INSERT INTO todos (id, completed, body)
            VALUES (?1, 0, ?2)
            "#,
        )
        .bind(id.to_string())
        .bind(&todo.body)
        .execute(&self.db)
        .await?;

        Ok(Todo {
            id,
            completed: false,
            body: todo.body,
        })
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Todo<ObjectId>>, StoreError> {
        sqlx::query_as::<_, TodoRow>("SELECT id, completed, body FROM todos WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.db)
            .await?
            .map(Todo::try_from)
            .transpose()
    }

    async fn update(
        &self,
        id: &ObjectId,
        changes: TodoChanges,
    ) -> Result<Option<Todo<ObjectId>>, StoreError> {
        let Some(completed) = changes.completed else {
            return self.find_by_id(id).await;
        };

        sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET completed = ?1
            WHERE id = ?2
            RETURNING id, completed, body
            "#,
        )
        .bind(completed)
        .bind(id.to_string())
        .fetch_optional(&self.db)
        .await?
        .map(Todo::try_from)
        .transpose()
    }

    async fn toggle(&self, id: &ObjectId) -> Result<Option<Todo<ObjectId>>, StoreError> {
        sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET completed = NOT completed
            WHERE id = ?1
            RETURNING id, completed, body
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.db)
        .await?
        .map(Todo::try_from)
        .transpose()
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.db)
            .await?
            .rows_affected();

        Ok(result)
    }
}
