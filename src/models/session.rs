//! Session records as exchanged with the session log API.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A logged play session. `id` is assigned by the server and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub title: String,
    pub system: String,
    #[serde(default)]
    pub players: Option<String>,
    /// ISO 8601 timestamp exactly as the server sent it; the offset may be absent.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub log_url: Option<String>,
}

impl Session {
    pub fn tone(&self) -> SystemTone {
        SystemTone::for_system(&self.system)
    }

    /// Players text, treating an empty string like a missing value.
    pub fn players_text(&self) -> Option<&str> {
        non_empty(self.players.as_deref())
    }

    pub fn memo_text(&self) -> Option<&str> {
        non_empty(self.memo.as_deref())
    }

    pub fn log_url_text(&self) -> Option<&str> {
        non_empty(self.log_url.as_deref())
    }

    pub fn date_text(&self) -> Option<&str> {
        non_empty(self.date.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// One page of a listing plus the total number of matches across all pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<Session>,
    #[serde(default)]
    pub total: u64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Session>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Session>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a create or partial-update request. Absent fields are left out of
/// the JSON entirely so the server keeps (or defaults) them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub title: String,
    pub system: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Display colour category derived from a game system's name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SystemTone {
    Indigo,
    Amber,
    Emerald,
    Slate,
    Gray,
}

impl SystemTone {
    pub fn for_system(name: &str) -> Self {
        if name.is_empty() {
            return SystemTone::Gray;
        }

        let name = name.to_lowercase();
        if name.contains("coc") {
            SystemTone::Indigo
        } else if name.contains("dnd") || name.contains("d&d") {
            SystemTone::Amber
        } else if name.contains("sw2") {
            SystemTone::Emerald
        } else {
            SystemTone::Slate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemTone::Indigo => "indigo",
            SystemTone::Amber => "amber",
            SystemTone::Emerald => "emerald",
            SystemTone::Slate => "slate",
            SystemTone::Gray => "gray",
        }
    }
}

/// Parses a server timestamp. Values without an offset are returned as naive
/// wall-clock times so the caller can decide which zone they belong to.
pub fn parse_server_timestamp(value: &str) -> Option<ServerTimestamp> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(ServerTimestamp::Offset(dt));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(ServerTimestamp::Naive)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerTimestamp {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}
