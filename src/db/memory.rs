use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::models::{NewTodo, Todo, TodoChanges};

struct MemoryState {
    todos: Vec<Todo<u64>>,
    next_id: u64,
}

impl MemoryState {
    fn position(&self, id: u64) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }

    fn apply(&mut self, id: u64, changes: TodoChanges) -> Option<Todo<u64>> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        Some(todo.clone())
    }
}

// next_id only moves forward, deleted ids are never handed out again
pub struct MemoryTodoStore {
    state: RwLock<MemoryState>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                todos: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    type Id = u64;

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Todo<u64>>, StoreError> {
        Ok(self.state.read().await.todos.clone())
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo<u64>, StoreError> {
        let mut state = self.state.write().await;
        let todo = Todo {
            id: state.next_id,
            completed: false,
            body: todo.body,
        };
        state.next_id += 1;
        state.todos.push(todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: &u64) -> Result<Option<Todo<u64>>, StoreError> {
        let state = self.state.read().await;
        Ok(state.todos.iter().find(|t| t.id == *id).cloned())
    }

    async fn update(&self, id: &u64, changes: TodoChanges) -> Result<Option<Todo<u64>>, StoreError> {
        Ok(self.state.write().await.apply(*id, changes))
    }

    async fn toggle(&self, id: &u64) -> Result<Option<Todo<u64>>, StoreError> {
        let mut state = self.state.write().await;
        let Some(current) = state.todos.iter().find(|t| t.id == *id) else {
            return Ok(None);
        };
        let changes = TodoChanges {
            completed: Some(!current.completed),
        };
        Ok(state.apply(*id, changes))
    }

    async fn delete_by_id(&self, id: &u64) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        match state.position(*id) {
            Some(index) => {
                state.todos.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
