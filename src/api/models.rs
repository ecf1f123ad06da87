use serde::{Deserialize, Serialize};

/// A stored contact entry as returned by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "fecha", default)]
    pub created_at: String,
}

/// The writable subset of a contact, sent on create and update.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "mensaje")]
    pub message: String,
}

impl ContactInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

impl From<&ContactRecord> for ContactInput {
    fn from(record: &ContactRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            message: record.message.clone(),
        }
    }
}
