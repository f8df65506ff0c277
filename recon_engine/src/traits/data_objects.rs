use std::fmt::Display;

use serde::{Deserialize, Serialize};

//--------------------------------------      RefreshId      ---------------------------------------------------------
/// An opaque handle to an in-flight refresh on a transaction source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshId(pub String);

impl Display for RefreshId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for RefreshId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------       Cursor        ---------------------------------------------------------
/// An opaque pagination cursor handed back by an adapter. Pass it to the next fetch to continue
/// where the previous page left off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor(pub String);

impl Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for Cursor {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------        Page         ---------------------------------------------------------
/// One page of adapter results. A `cursor` of `None` marks the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// A single page holding everything, with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, cursor: None }
    }
}
