//! Structured validation failures: one issue per violated constraint.

use serde::Serialize;
use std::fmt;

/// One step in the path to an offending value: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    InvalidString,
    NotInteger,
    Required,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Issue {
    pub path: Vec<PathSegment>,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    pub fn new(path: &[PathSegment], code: IssueCode, message: impl Into<String>) -> Self {
        Issue {
            path: path.to_vec(),
            code,
            message: message.into(),
        }
    }

    /// Issue attached to the whole input rather than a field.
    pub fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Issue::new(&[], code, message)
    }

    /// Dotted form of the path, e.g. `article.tagList.0`. Empty for root issues.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Every violation found in one input. Serializes as `{"issues": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub issues: Vec<Issue>,
}

impl ValidationErrors {
    pub fn single(issue: Issue) -> Self {
        ValidationErrors { issues: vec![issue] }
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when some issue sits exactly at `path` (dotted form).
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.dotted_path() == path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| {
                let path = i.dotted_path();
                if path.is_empty() {
                    i.message.clone()
                } else {
                    format!("{}: {}", path, i.message)
                }
            })
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
