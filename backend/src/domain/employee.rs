//! Employee record model.
//!
//! Records are deliberately loose: the API validates field *presence* only,
//! so every attribute value is kept as the JSON value the caller submitted.
//! Storage adapters convert [`EmployeeDraft`] and [`EmployeeChanges`] into
//! their native document form and hand back [`Employee`] values carrying the
//! backend-assigned identifier.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the identifier key in stored documents and JSON responses.
pub const ID_FIELD: &str = "_id";

/// Date layout used for `hire_date` defaults.
pub const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Attributes of an employee record known to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    /// Full name. Required.
    Name,
    /// Contact address. Required.
    Email,
    /// Job title. Required.
    Position,
    /// Organisational unit. Required.
    Department,
    /// Annual pay. Required.
    Salary,
    /// Start date as `YYYY-MM-DD`. Defaults to the creation date.
    HireDate,
}

impl EmployeeField {
    /// Every known attribute, in document order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Position,
        Self::Department,
        Self::Salary,
        Self::HireDate,
    ];

    /// Attributes that must be present when creating a record.
    pub const REQUIRED: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Position,
        Self::Department,
        Self::Salary,
    ];

    /// Key used for this attribute in payloads and documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Position => "position",
            Self::Department => "department",
            Self::Salary => "salary",
            Self::HireDate => "hire_date",
        }
    }

    /// Resolve a payload key to a known attribute.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

impl std::fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the first required attribute absent from `payload`.
///
/// A key explicitly set to `null` counts as present; the check is about
/// presence, not content.
///
/// # Examples
/// ```
/// use employee_api::domain::{first_missing_field, EmployeeField};
/// use serde_json::json;
///
/// let payload = json!({"name": "Ada", "email": "ada@example.com"});
/// let missing = first_missing_field(payload.as_object().expect("object"));
/// assert_eq!(missing, Some(EmployeeField::Position));
/// ```
pub fn first_missing_field(payload: &Map<String, Value>) -> Option<EmployeeField> {
    EmployeeField::REQUIRED
        .into_iter()
        .find(|field| !payload.contains_key(field.as_str()))
}

/// Backend-assigned record identifier in its plain string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmployeeId(String);

/// Validation errors returned when constructing [`EmployeeId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("employee identifier must not be empty")]
    Empty,
}

impl EmployeeId {
    /// Wrap an identifier string. Well-formedness for a given backend is
    /// checked by the storage adapter, not here.
    pub fn new(value: impl Into<String>) -> Result<Self, EmployeeIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(EmployeeIdValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    name: Value,
    email: Value,
    position: Value,
    department: Value,
    salary: Value,
    hire_date: Value,
}

impl EmployeeDraft {
    /// Build a draft from a request payload.
    ///
    /// Absent attributes become `null`; required-field validation is the
    /// caller's job. `hire_date` falls back to `today` when it is absent,
    /// `null`, or an empty string. Unknown keys are dropped.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use employee_api::domain::EmployeeDraft;
    /// use serde_json::json;
    ///
    /// let payload = json!({"name": "Ada", "salary": 100});
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    /// let draft = EmployeeDraft::from_payload(payload.as_object().expect("object"), today);
    /// assert_eq!(draft.fields()["hire_date"], json!("2024-03-01"));
    /// ```
    pub fn from_payload(payload: &Map<String, Value>, today: NaiveDate) -> Self {
        let take = |field: EmployeeField| payload.get(field.as_str()).cloned().unwrap_or(Value::Null);
        let hire_date = match payload.get(EmployeeField::HireDate.as_str()) {
            None | Some(Value::Null) => default_hire_date(today),
            Some(Value::String(text)) if text.is_empty() => default_hire_date(today),
            Some(value) => value.clone(),
        };
        Self {
            name: take(EmployeeField::Name),
            email: take(EmployeeField::Email),
            position: take(EmployeeField::Position),
            department: take(EmployeeField::Department),
            salary: take(EmployeeField::Salary),
            hire_date,
        }
    }

    /// Value of a single attribute.
    pub fn get(&self, field: EmployeeField) -> &Value {
        match field {
            EmployeeField::Name => &self.name,
            EmployeeField::Email => &self.email,
            EmployeeField::Position => &self.position,
            EmployeeField::Department => &self.department,
            EmployeeField::Salary => &self.salary,
            EmployeeField::HireDate => &self.hire_date,
        }
    }

    /// Persistable attributes, excluding the identifier.
    pub fn fields(&self) -> Map<String, Value> {
        EmployeeField::ALL
            .into_iter()
            .map(|field| (field.as_str().to_owned(), self.get(field).clone()))
            .collect()
    }
}

fn default_hire_date(today: NaiveDate) -> Value {
    Value::String(today.format(HIRE_DATE_FORMAT).to_string())
}

/// Partial update applied to an existing record.
///
/// Only known attributes survive; the identifier and unrecognised keys are
/// discarded so an update can never rewrite `_id` or grow the schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeChanges(Map<String, Value>);

impl EmployeeChanges {
    /// Keep the known attributes present in `payload`.
    ///
    /// # Examples
    /// ```
    /// use employee_api::domain::EmployeeChanges;
    /// use serde_json::json;
    ///
    /// let payload = json!({"_id": "abc", "salary": 90000, "nickname": "x"});
    /// let changes = EmployeeChanges::from_payload(payload.as_object().expect("object"));
    /// assert_eq!(changes.len(), 1);
    /// ```
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self(
            payload
                .iter()
                .filter(|(key, _)| EmployeeField::from_key(key).is_some())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    /// Whether the update sets nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of attributes being set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Attributes to set, keyed by field name.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A persisted employee record.
///
/// Serialises as a flat JSON object with the identifier under `_id`,
/// followed by every stored attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    id: EmployeeId,
    fields: Map<String, Value>,
}

impl Employee {
    /// Assemble a record from its identifier and stored attributes.
    ///
    /// Any `_id` key inside `fields` is dropped in favour of `id`.
    pub fn new(id: EmployeeId, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    /// Backend-assigned identifier.
    pub fn id(&self) -> &EmployeeId {
        &self.id
    }

    /// Stored attributes, excluding the identifier.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Value of a single attribute, if stored.
    pub fn get(&self, field: EmployeeField) -> Option<&Value> {
        self.fields.get(field.as_str())
    }
}

impl Serialize for Employee {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, self.id.as_str())?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
