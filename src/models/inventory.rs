use super::empty_string_as_none;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Host {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

/// An inventory with its hosts attached in upstream order. `hosts` is filled
/// by a second request per inventory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Inventory {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub hosts: Vec<Host>,
}

fn enabled_by_default() -> bool {
    true
}
