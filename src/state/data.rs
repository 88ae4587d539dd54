/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the persistent store, the repository and the UI layer.
/// The serialized form is a JSON array of camelCase objects,
/// dates as `YYYY-MM-DD` and `createdAt` as an RFC 3339 timestamp.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Format used for every calendar date, both persisted and typed in the form
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque project identifier
///
/// New ids are random UUIDs. Ids loaded from older saved data
/// (any string) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generate a fresh random id
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every field of a project the form is allowed to edit
/// (everything except `id` and `created_at`)
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectData {
    pub title: String,
    pub size: String,
    pub quantity: u32,
    pub deposit: f64,
    pub total: f64,
    pub order_date: NaiveDate,
    pub current_state_date: NaiveDate,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub delivered_date: Option<NaiveDate>,
    /// Photo as a `data:` URI
    pub image: Option<String>,
}

/// Represents a single commissioned print job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique id, assigned by the repository, never changes
    pub id: ProjectId,
    /// Display name (never empty)
    pub title: String,
    /// Free-text physical dimensions (e.g. "15x10x8 cm"), may be empty
    #[serde(default)]
    pub size: String,
    /// Number of pieces (>= 1)
    pub quantity: u32,
    /// Amount already paid
    pub deposit: f64,
    /// Amount owed in total
    pub total: f64,
    pub order_date: NaiveDate,
    /// Date of the last status update, set by hand
    pub current_state_date: NaiveDate,
    #[serde(default, with = "optional_date")]
    pub estimated_delivery_date: Option<NaiveDate>,
    /// Presence of this date is the only "delivered" signal
    #[serde(default, with = "optional_date")]
    pub delivered_date: Option<NaiveDate>,
    /// Embedded photo as a `data:` URI
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub image: Option<String>,
    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Build a record from form data and repository-assigned identity
    pub fn from_data(id: ProjectId, created_at: DateTime<Utc>, data: ProjectData) -> Self {
        Self {
            id,
            title: data.title,
            size: data.size,
            quantity: data.quantity,
            deposit: data.deposit,
            total: data.total,
            order_date: data.order_date,
            current_state_date: data.current_state_date,
            estimated_delivery_date: data.estimated_delivery_date,
            delivered_date: data.delivered_date,
            image: data.image,
            created_at,
        }
    }

    /// Replace every editable field, keeping `id` and `created_at`
    pub fn apply(&mut self, data: ProjectData) {
        let id = self.id.clone();
        let created_at = self.created_at;
        *self = Self::from_data(id, created_at, data);
    }

    /// Editable fields of this record
    pub fn data(&self) -> ProjectData {
        ProjectData {
            title: self.title.clone(),
            size: self.size.clone(),
            quantity: self.quantity,
            deposit: self.deposit,
            total: self.total,
            order_date: self.order_date,
            current_state_date: self.current_state_date,
            estimated_delivery_date: self.estimated_delivery_date,
            delivered_date: self.delivered_date,
            image: self.image.clone(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered_date.is_some()
    }

    /// Amount still owed. Negative when the deposit exceeds the total.
    pub fn pending(&self) -> f64 {
        self.total - self.deposit
    }

    /// The card only shows a pending line for a positive balance
    pub fn shows_pending(&self) -> bool {
        self.pending() > 0.0
    }
}

/// Serialize a whole collection for the storage slot
pub fn collection_to_json(projects: &[Project]) -> Result<String, serde_json::Error> {
    serde_json::to_string(projects)
}

/// Parse a whole collection from the storage slot
pub fn collection_from_json(json: &str) -> Result<Vec<Project>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Optional dates are stored as `""` when unset.
/// `null` and a missing key are accepted on read as well.
mod optional_date {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}

/// Treat `""` the same as an absent value
fn non_empty_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.is_empty()))
}
