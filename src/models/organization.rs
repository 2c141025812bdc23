use super::{empty_string_as_none, lenient_id};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub organization: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub scm_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub scm_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub scm_branch: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
}
