use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrors, Violations, char_len};

pub const CONTENT_MIN_LEN: usize = 250;
pub const SUMMARY_MAX_LEN: usize = 250;

/// A title must contain at least one of these, matched case-sensitively.
pub const TITLE_MARKERS: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];

/// Post category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Fiction, Category::NonFiction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-Fiction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_category(s)
    }
}

/// Post entity - represents a blog post.
///
/// `category` keeps the stored text; [`Post::validate`] accepts only the
/// spellings of [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// `None` until the store assigns an identity.
    pub id: Option<i32>,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub category: String,
}

/// Partial update of a post; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Post {
    /// Create a new, not yet persisted post.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        summary: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            summary: summary.into(),
            category: category.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Run every post rule and report all violations together.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        violations.check(validate_title(&self.title));
        violations.check(validate_content(&self.content));
        violations.check(validate_summary(&self.summary));
        violations.check(validate_category(&self.category));
        violations.finish()
    }

    /// Parsed category, if the stored text is a known one.
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// Apply `changes` and refresh `updated_at`. Does not validate.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(summary) = changes.summary {
            self.summary = summary;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        self.touch();
    }

    /// Mark the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

impl From<NewPost> for Post {
    fn from(new: NewPost) -> Self {
        Post::new(new.title, new.content, new.summary, new.category)
    }
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.summary.is_none()
            && self.category.is_none()
    }
}

pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::new("title", "Title is required."));
    }
    if !TITLE_MARKERS.iter().any(|marker| title.contains(marker)) {
        return Err(ValidationError::new(
            "title",
            format!(
                "Title must contain one of the following phrases: {}.",
                TITLE_MARKERS.join(", ")
            ),
        ));
    }
    Ok(title)
}

pub fn validate_content(content: &str) -> Result<&str, ValidationError> {
    if char_len(content) < CONTENT_MIN_LEN {
        return Err(ValidationError::new(
            "content",
            format!(
                "Content must be at least {} characters long.",
                CONTENT_MIN_LEN
            ),
        ));
    }
    Ok(content)
}

pub fn validate_summary(summary: &str) -> Result<&str, ValidationError> {
    if char_len(summary) > SUMMARY_MAX_LEN {
        return Err(ValidationError::new(
            "summary",
            format!(
                "Summary must be a maximum of {} characters long.",
                SUMMARY_MAX_LEN
            ),
        ));
    }
    Ok(summary)
}

pub fn validate_category(category: &str) -> Result<Category, ValidationError> {
    Category::ALL
        .into_iter()
        .find(|c| c.as_str() == category)
        .ok_or_else(|| {
            ValidationError::new(
                "category",
                "Category must be either 'Fiction' or 'Non-Fiction'.",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(len: usize) -> String {
        "x".repeat(len)
    }

    #[test]
    fn test_title_markers() {
        assert!(validate_title("Top 10 Secrets").is_ok());
        assert!(validate_title("You Won't Believe This").is_ok());
        assert!(validate_title("Guess Who").is_ok());
        assert!(validate_title("A Normal Day").is_err());
    }

    #[test]
    fn test_title_match_is_case_sensitive() {
        assert!(validate_title("top secrets").is_err());
        assert!(validate_title("you won't believe").is_err());
    }

    #[test]
    fn test_empty_title_is_required() {
        let err = validate_title("").unwrap_err();
        assert_eq!(err.message, "Title is required.");
    }

    #[test]
    fn test_content_boundary() {
        assert!(validate_content(&body(249)).is_err());
        assert!(validate_content(&body(250)).is_ok());
    }

    #[test]
    fn test_summary_boundary() {
        assert!(validate_summary(&body(250)).is_ok());
        assert!(validate_summary(&body(251)).is_err());
        assert!(validate_summary("").is_ok());
    }

    #[test]
    fn test_category_values() {
        assert_eq!(validate_category("Fiction"), Ok(Category::Fiction));
        assert_eq!(validate_category("Non-Fiction"), Ok(Category::NonFiction));
        assert!(validate_category("fiction").is_err());
        assert!(validate_category("Poetry").is_err());
    }

    #[test]
    fn test_category_serde_spelling() {
        let json = serde_json::to_string(&Category::NonFiction).unwrap();
        assert_eq!(json, "\"Non-Fiction\"");
        let parsed: Category = serde_json::from_str("\"Fiction\"").unwrap();
        assert_eq!(parsed, Category::Fiction);
    }

    #[test]
    fn test_validate_reports_every_field() {
        let post = Post::new("A Normal Day", body(10), body(300), "Poetry");
        let errors = post.validate().unwrap_err();

        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["title", "content", "summary", "category"]);
    }

    #[test]
    fn test_valid_post() {
        let post = Post::new("Top 10 Secrets", body(250), "short", "Fiction");
        assert!(post.validate().is_ok());
        assert_eq!(post.category(), Some(Category::Fiction));
    }
}
