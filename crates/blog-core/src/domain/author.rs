use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrors, Violations, char_len};

/// Largest identity an author may carry.
pub const MAX_AUTHOR_ID: i32 = 10_000;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 50;
pub const PHONE_NUMBER_LEN: usize = 10;

/// Author entity - a person who writes posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// `None` until the store assigns an identity.
    pub id: Option<i32>,
    pub name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    pub phone_number: String,
}

/// Partial update of an author; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Author {
    /// Create a new, not yet persisted author with fresh timestamps.
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            phone_number: phone_number.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Request a specific identity instead of a store-assigned one.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Run every author rule and report all violations together.
    ///
    /// Name uniqueness needs the stored collection and is checked by
    /// [`AuthorService`](crate::service::AuthorService).
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Violations::new();
        if let Some(id) = self.id {
            violations.check(validate_id(id));
        }
        violations.check(validate_name(&self.name));
        violations.check(validate_phone_number(&self.phone_number));
        violations.finish()
    }

    /// Apply `changes` and refresh `updated_at`. Does not validate.
    pub fn apply(&mut self, changes: AuthorChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(phone_number) = changes.phone_number {
            self.phone_number = phone_number;
        }
        self.touch();
    }

    /// Mark the record as modified now.
    pub fn touch(&mut self) {
        let now = Utc::now();
        // Clock skew must never move updated_at before created_at.
        self.updated_at = now.max(self.created_at);
    }
}

impl From<NewAuthor> for Author {
    fn from(new: NewAuthor) -> Self {
        let author = Author::new(new.name, new.phone_number);
        match new.id {
            Some(id) => author.with_id(id),
            None => author,
        }
    }
}

impl AuthorChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none()
    }
}

pub fn validate_id(id: i32) -> Result<i32, ValidationError> {
    if id <= 0 {
        return Err(ValidationError::new(
            "id",
            "ID must be a positive integer.",
        ));
    }
    if id > MAX_AUTHOR_ID {
        return Err(id_above_max());
    }
    Ok(id)
}

/// The violation reported for an identity past [`MAX_AUTHOR_ID`], whether
/// requested or handed out by the store.
pub fn id_above_max() -> ValidationError {
    ValidationError::new(
        "id",
        format!("ID must be less than or equal to {}.", MAX_AUTHOR_ID),
    )
}

/// Length and character rules for a name. Uniqueness is checked elsewhere.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let len = char_len(name);
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::new(
            "name",
            format!(
                "Name must be between {} and {} characters long.",
                NAME_MIN_LEN, NAME_MAX_LEN
            ),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
    {
        return Err(ValidationError::new(
            "name",
            "Name must contain only alphabetic characters, spaces, or hyphens.",
        ));
    }
    Ok(name)
}

pub fn validate_phone_number(phone_number: &str) -> Result<&str, ValidationError> {
    if char_len(phone_number) != PHONE_NUMBER_LEN {
        return Err(ValidationError::new(
            "phone_number",
            format!("Phone number must be exactly {} digits.", PHONE_NUMBER_LEN),
        ));
    }
    if !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "phone_number",
            "Phone number must contain only digits.",
        ));
    }
    Ok(phone_number)
}

/// The violation reported when another author already holds `name`.
pub fn duplicate_name() -> ValidationError {
    ValidationError::new("name", "Name must be unique.")
}

/// The violation reported when another author already holds the requested id.
pub fn duplicate_id() -> ValidationError {
    ValidationError::new("id", "ID must be unique.")
}
