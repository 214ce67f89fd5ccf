pub mod object_id;
pub mod todo;

pub use object_id::{ObjectId, ParseObjectIdError};
pub use todo::{DeleteResponse, NewTodo, NewTodoRequest, Todo, TodoChanges};
