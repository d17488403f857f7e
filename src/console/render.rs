//! Plain-text rendering of the page. Pure functions over a [`ViewSnapshot`]
//! so the output can be checked without a terminal.

use std::fmt::{Display, Write};

use chrono::TimeZone;

use crate::{
    forms::{datetime::to_local_display, FormField, SessionForm},
    manager::{DetailModal, Notice, NoticeLevel, ViewSnapshot},
    models::{Session, SystemTone},
};

pub const EMPTY_STATE: &str = "No sessions match the current search. Add a new one.";
pub const LOADING: &str = "Loading…";

fn tone_code(tone: SystemTone) -> &'static str {
    match tone {
        SystemTone::Indigo => "34",
        SystemTone::Amber => "33",
        SystemTone::Emerald => "32",
        SystemTone::Slate => "37",
        SystemTone::Gray => "90",
    }
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn date_or<Tz: TimeZone>(session: &Session, tz: &Tz, fallback: &str) -> String
where
    Tz::Offset: Display,
{
    session
        .date_text()
        .map(|date| to_local_display(date, tz).unwrap_or_else(|| date.to_string()))
        .unwrap_or_else(|| fallback.to_string())
}

pub fn render_notice(notice: &Notice, color: bool) -> String {
    match notice.level {
        NoticeLevel::Success => paint(&format!("✔ {}", notice.message), "32", color),
        NoticeLevel::Info => format!("• {}", notice.message),
        NoticeLevel::Error => paint(&format!("✖ {}", notice.message), "31", color),
    }
}

fn render_card<Tz: TimeZone>(out: &mut String, session: &Session, tz: &Tz, color: bool)
where
    Tz::Offset: Display,
{
    let system = paint(&format!("[{}]", session.system), tone_code(session.tone()), color);
    let _ = writeln!(
        out,
        "  #{:<4} {}  {}  {}  {}",
        session.id,
        session.title,
        system,
        session.players_text().unwrap_or("no players"),
        date_or(session, tz, "no date"),
    );
}

fn render_form(out: &mut String, heading: &str, form: &SessionForm) {
    let _ = writeln!(out, "{heading}");
    for field in FormField::ALL {
        let _ = writeln!(out, "  {:<8} {}", field.as_str(), form.get(field));
    }
}

fn render_detail<Tz: TimeZone>(out: &mut String, session: &Session, tz: &Tz)
where
    Tz::Offset: Display,
{
    let _ = writeln!(out, "── {} (ID: {})", session.title, session.id);
    let _ = writeln!(out, "  system   {}", session.system);
    let _ = writeln!(out, "  players  {}", session.players_text().unwrap_or("—"));
    let _ = writeln!(out, "  date     {}", date_or(session, tz, "—"));
    let _ = writeln!(out, "  log      {}", session.log_url_text().unwrap_or("—"));
    let _ = writeln!(out, "  memo     {}", session.memo_text().unwrap_or("—"));
    let _ = writeln!(out, "  (edit | close)");
}

/// The whole page: header, list or its placeholder, pager, then whichever
/// dialog is open.
pub fn render_page<Tz: TimeZone>(snapshot: &ViewSnapshot, tz: &Tz, color: bool) -> String
where
    Tz::Offset: Display,
{
    let mut out = String::new();
    let query = &snapshot.query;
    let _ = writeln!(
        out,
        "== TRPG sessions ==  search: \"{}\"  sort: {} {}  {}/page",
        query.q, query.sort_by, query.order, query.limit
    );

    if snapshot.loading {
        let _ = writeln!(out, "{LOADING}");
    } else if snapshot.is_empty {
        let _ = writeln!(out, "{EMPTY_STATE}");
    } else {
        for session in &snapshot.items {
            render_card(&mut out, session, tz, color);
        }
    }
    let _ = writeln!(out, "Page {} / {}", query.page, snapshot.total_pages);

    let form = &snapshot.create_form;
    if *form != SessionForm::default() {
        render_form(&mut out, "── new session (new submit | new clear)", form);
    }

    match &snapshot.modal {
        DetailModal::Closed => {}
        DetailModal::Viewing { session } => render_detail(&mut out, session, tz),
        DetailModal::Editing { session, draft } => {
            render_form(
                &mut out,
                &format!("── editing #{} (save | cancel)", session.id),
                draft,
            );
        }
    }

    if let Some(target) = &snapshot.pending_delete {
        let _ = writeln!(
            out,
            "Delete ID {} \"{}\"? This cannot be undone. (confirm | abort)",
            target.id, target.title
        );
    }

    out
}
