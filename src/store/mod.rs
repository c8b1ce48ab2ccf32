pub mod models;

use models::Todo;
use parking_lot::Mutex;

/// Records and the id counter live under one lock so ids stay unique.
struct TodoState {
    todos: Vec<Todo>,
    next_id: i64,
}

pub struct TodoStore {
    state: Mutex<TodoState>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TodoState {
                todos: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn list(&self) -> Vec<Todo> {
        self.state.lock().todos.clone()
    }

    pub fn add(&self, task: &str) -> Todo {
        let mut state = self.state.lock();
        let todo = Todo {
            id: state.next_id,
            task: task.to_string(),
            completed: false,
        };
        state.todos.push(todo.clone());
        state.next_id += 1;
        todo
    }

    /// Remove the todo with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: i64) -> bool {
        let mut state = self.state.lock();
        let before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        state.todos.len() != before
    }

    pub fn len(&self) -> usize {
        self.state.lock().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_ids_strictly_increase() {
        let store = TodoStore::new();
        let ids: Vec<i64> = (0..5).map(|i| store.add(&format!("task {}", i)).id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = TodoStore::new();
        let a = store.add("a");
        assert!(store.delete(a.id));
        let b = store.add("b");
        assert!(b.id > a.id);
    }

    #[test]
    fn test_add_defaults() {
        let store = TodoStore::new();
        let todo = store.add("");
        assert_eq!(todo.task, "");
        assert!(!todo.completed);
        assert_eq!(store.list(), vec![todo]);
    }

    #[test]
    fn test_todo_json_shape() {
        let store = TodoStore::new();
        let todo = store.add("buy milk");
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            serde_json::json!({"id": 1, "task": "buy milk", "completed": false})
        );
    }

    #[test]
    fn test_delete_keeps_order() {
        let store = TodoStore::new();
        let a = store.add("a");
        let b = store.add("b");
        let c = store.add("c");

        assert!(store.delete(b.id));
        assert_eq!(store.list(), vec![a.clone(), c.clone()]);

        let d = store.add("d");
        assert_eq!(store.list(), vec![a, c, d]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let store = TodoStore::new();
        store.add("a");
        let before = store.list();
        assert!(!store.delete(42));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_concurrent_adds_unique_ids() {
        let store = Arc::new(TodoStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..100)
                        .map(|i| store.add(&format!("{}-{}", t, i)).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 800);
        assert_eq!(store.len(), 800);

        let listed: Vec<i64> = store.list().iter().map(|t| t.id).collect();
        assert!(listed.windows(2).all(|w| w[0] < w[1]));
    }
}
