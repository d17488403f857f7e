//! Editable form state shared by the create form and the edit draft.

pub mod datetime;
pub mod validation;

use std::{fmt, str::FromStr};

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::models::{Session, SessionPayload};

pub use validation::ValidationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Title,
    System,
    Players,
    Date,
    Memo,
    LogUrl,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::System,
        FormField::Players,
        FormField::Date,
        FormField::Memo,
        FormField::LogUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::System => "system",
            FormField::Players => "players",
            FormField::Date => "date",
            FormField::Memo => "memo",
            FormField::LogUrl => "url",
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(FormField::Title),
            "system" => Ok(FormField::System),
            "players" => Ok(FormField::Players),
            "date" => Ok(FormField::Date),
            "memo" => Ok(FormField::Memo),
            "url" | "logurl" | "log_url" => Ok(FormField::LogUrl),
            other => Err(format!(
                "unknown field '{other}' (expected title, system, players, date, memo or url)"
            )),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text of every editable field, exactly as typed. `date` holds the
/// local `YYYY-MM-DDTHH:MM` picker value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionForm {
    pub title: String,
    pub system: String,
    pub players: String,
    pub date: String,
    pub memo: String,
    pub log_url: String,
}

impl SessionForm {
    /// Draft seeded from a stored session, its timestamp moved into `tz`.
    pub fn from_session<Tz: TimeZone>(session: &Session, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            title: session.title.clone(),
            system: session.system.clone(),
            players: session.players.clone().unwrap_or_default(),
            date: session
                .date
                .as_deref()
                .map(|date| datetime::to_local_input(date, tz))
                .unwrap_or_default(),
            memo: session.memo.clone().unwrap_or_default(),
            log_url: session.log_url.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::System => &self.system,
            FormField::Players => &self.players,
            FormField::Date => &self.date,
            FormField::Memo => &self.memo,
            FormField::LogUrl => &self.log_url,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::System => self.system = value,
            FormField::Players => self.players = value,
            FormField::Date => self.date = value,
            FormField::Memo => self.memo = value,
            FormField::LogUrl => self.log_url = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validates the form and builds the request body: required fields
    /// trimmed, empty optionals dropped, the local date converted to UTC.
    pub fn to_payload<Tz: TimeZone>(&self, tz: &Tz) -> Result<SessionPayload, ValidationError> {
        validation::check_required(&self.title, &self.system)?;
        validation::check_log_url(&self.log_url)?;

        let date = if validation::is_blank(&self.date) {
            None
        } else {
            Some(datetime::local_input_to_iso(&self.date, tz).ok_or(ValidationError::InvalidDate)?)
        };

        Ok(SessionPayload {
            title: self.title.trim().to_string(),
            system: self.system.trim().to_string(),
            players: optional(&self.players),
            memo: optional(&self.memo),
            log_url: optional(&self.log_url),
            date,
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn payload_trims_and_drops_empty_optionals() {
        let mut form = SessionForm::default();
        form.set(FormField::Title, "  宴の一幕 ");
        form.set(FormField::System, "CoC");
        form.set(FormField::Players, "   ");
        form.set(FormField::Memo, " 卓の記録 ");
        form.set(FormField::Date, "2024-05-01T12:00");

        let payload = form.to_payload(&jst()).unwrap();
        assert_eq!(payload.title, "宴の一幕");
        assert_eq!(payload.players, None);
        assert_eq!(payload.memo.as_deref(), Some("卓の記録"));
        assert_eq!(payload.log_url, None);
        assert_eq!(payload.date.as_deref(), Some("2024-05-01T03:00:00.000Z"));
    }

    #[test]
    fn payload_rejects_bad_input_in_order() {
        let mut form = SessionForm::default();
        form.set(FormField::LogUrl, "not-a-url");
        assert_eq!(form.to_payload(&jst()), Err(ValidationError::MissingRequired));

        form.set(FormField::Title, "宴の一幕");
        form.set(FormField::System, "CoC");
        assert_eq!(form.to_payload(&jst()), Err(ValidationError::InvalidLogUrl));

        form.set(FormField::LogUrl, "");
        form.set(FormField::Date, "next friday");
        assert_eq!(form.to_payload(&jst()), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn draft_is_seeded_from_session() {
        let session = Session {
            id: 7,
            title: "Tomb of Annihilation".into(),
            system: "D&D 5e".into(),
            players: Some("A, B".into()),
            date: Some("2024-05-01T03:00:59Z".into()),
            memo: None,
            log_url: None,
        };

        let draft = SessionForm::from_session(&session, &jst());
        assert_eq!(draft.title, "Tomb of Annihilation");
        assert_eq!(draft.players, "A, B");
        assert_eq!(draft.date, "2024-05-01T12:00");
        assert_eq!(draft.memo, "");
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("logUrl".parse::<FormField>(), Ok(FormField::LogUrl));
        assert_eq!("URL".parse::<FormField>(), Ok(FormField::LogUrl));
        assert!("id".parse::<FormField>().is_err());
        for field in FormField::ALL {
            assert_eq!(field.as_str().parse::<FormField>(), Ok(field));
        }
    }
}
