use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Task {
    pub fn created_date(&self) -> Option<NaiveDate> {
        date_prefix(&self.created_at)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub created_at: NaiveDate,
}

/// Partial task update. Unset fields are left out of the body.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    /// `Some(None)` clears the timestamp on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Finance {
    pub id: i64,
    pub description: String,
    #[serde(deserialize_with = "decimal")]
    pub value: f64,
    #[serde(default)]
    pub tags: String,
    pub created_at: String,
}

impl Finance {
    pub fn created_date(&self) -> Option<NaiveDate> {
        date_prefix(&self.created_at)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewFinance {
    pub description: String,
    pub value: f64,
    pub tags: String,
    pub created_at: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FinancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// One row of `/api/finances/by_day/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FinanceDayTotal {
    #[serde(rename = "created_at__date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "decimal")]
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access: Option<String>,
}

/// Accepts the API's timestamps (`2024-05-01T09:30:00-03:00`) as well as
/// bare dates.
pub fn date_prefix(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Number(f64),
    Text(String),
}

/// Decimal fields arrive as strings (`"15.00"`) from the API; plain numbers
/// are accepted too.
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match DecimalRepr::deserialize(deserializer)? {
        DecimalRepr::Number(value) => Ok(value),
        DecimalRepr::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {:?}", text))),
    }
}
