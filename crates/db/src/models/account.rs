//! Account entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{self, DbId, Timestamp};

/// Gender stored as SMALLINT (`0` male, `1` female, `2` other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum Gender {
    Male = 0,
    Female = 1,
    #[default]
    Other = 2,
}

impl Gender {
    /// Map a free-form label onto a gender. Unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// An account row from the `accounts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub location: Option<String>,
    pub gender: Gender,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Build a new account with a fresh id and timestamps.
    pub fn new(input: &NewAccount) -> Self {
        let now = types::now();
        Self {
            id: types::new_id(),
            email: input.email.trim().to_string(),
            full_name: input.full_name.clone(),
            date_of_birth: input.date_of_birth,
            location: input.location.clone(),
            gender: input.gender,
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for creating a new account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub location: Option<String>,
    #[serde(default)]
    pub gender: Gender,
}
