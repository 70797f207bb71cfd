//! Domain types for the todo API.
//!
//! # Design
//! `TodoRecord` fields are private so that `id` can only come from a server
//! response: `TodoRecord::new` always leaves it unset and there is no setter.
//! `TodoCollection` likewise has no public constructor; it is produced by
//! decoding a list response and read through standard iteration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoRecord {
    title: String,
    body: String,
    priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

impl TodoRecord {
    /// Build a pending todo that has not been sent to the server yet.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        priority: i32,
    ) -> Result<Self, ApiError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ApiError::InvalidTodo("title must not be empty".to_string()));
        }
        Ok(Self {
            title,
            body: body.into(),
            priority,
            id: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Server-assigned identifier; `None` until the todo has been created.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_none()
    }
}

impl fmt::Display for TodoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TODO: ID: ")?;
        match self.id {
            Some(id) => write!(f, "{id}")?,
            None => write!(f, "null")?,
        }
        write!(
            f,
            ", Title: {}, Body: {}, Priority: {}",
            self.title, self.body, self.priority
        )
    }
}

/// Todos returned by a list query, in server order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoCollection {
    #[serde(default)]
    todos: Vec<TodoRecord>,
}

impl TodoCollection {
    pub fn iter(&self) -> std::slice::Iter<'_, TodoRecord> {
        self.todos.iter()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn into_vec(self) -> Vec<TodoRecord> {
        self.todos
    }
}

impl IntoIterator for TodoCollection {
    type Item = TodoRecord;
    type IntoIter = std::vec::IntoIter<TodoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.into_iter()
    }
}

impl<'a> IntoIterator for &'a TodoCollection {
    type Item = &'a TodoRecord;
    type IntoIter = std::slice::Iter<'a, TodoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.iter()
    }
}
