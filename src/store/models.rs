use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub task: String,
    pub completed: bool,
}
