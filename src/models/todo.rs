use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo<Id> {
    pub id: Id,
    pub completed: bool,
    pub body: String,
}

/// Payload accepted by `POST /api/todos`.
///
/// `completed` is accepted for compatibility with clients that send the
/// whole object back, but a new todo always starts incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodoRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub body: String,
}

impl NewTodo {
    /// Returns `None` when the body is missing, `null` or empty.
    pub fn from_request(req: NewTodoRequest) -> Option<Self> {
        match req.body {
            Some(body) if !body.is_empty() => Some(Self { body }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}
