use std::str::FromStr;

use crate::{
    forms::FormField,
    models::{SortField, SortOrder, PAGE_SIZES},
};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Refresh,
    Search(String),
    Sort(SortField),
    Order(SortOrder),
    Limit(u32),
    Next,
    Prev,
    Page(u32),
    NewField(FormField, String),
    NewClear,
    NewSubmit,
    Open(i64),
    Edit,
    Set(FormField, String),
    Save,
    Cancel,
    Close,
    Delete(i64),
    Confirm,
    Abort,
}

pub const HELP: &str = "\
list | refresh              reload the current page
search [text]               filter by title, system or players
sort <date|title|system|id> choose the sort field
order <asc|desc>            choose the sort order
limit <n>                   sessions per page (12, 24, 36, 60)
next | prev | page <n>      move between pages
new <field> <value>         fill the new-session form
new submit | new clear      add the session / reset the form
open <id>                   show a session
edit | set <field> <value>  edit the open session
save | cancel | close       save the draft / stop editing / close
delete <id>                 ask to delete a session
confirm | abort             answer the delete question
quit

fields: title, system, players, date (YYYY-MM-DDTHH:MM), memo, url";

fn split_word(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    }
}

fn parse_number<T: FromStr>(what: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{what} must be a number, got '{value}'"))
}

fn parse_field_value(rest: &str) -> Result<(FormField, String), String> {
    let (field, value) = split_word(rest);
    if field.is_empty() {
        return Err("expected <field> <value>".to_string());
    }
    Ok((field.parse()?, value.to_string()))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "list" | "refresh" => Command::Refresh,
            "search" => Command::Search(rest.to_string()),
            "sort" => Command::Sort(rest.parse()?),
            "order" => Command::Order(rest.parse()?),
            "limit" => {
                let limit = parse_number("limit", rest)?;
                if !PAGE_SIZES.contains(&limit) {
                    return Err(format!("limit must be one of {PAGE_SIZES:?}, got {limit}"));
                }
                Command::Limit(limit)
            }
            "next" => Command::Next,
            "prev" => Command::Prev,
            "page" => Command::Page(parse_number("page", rest)?),
            "new" => match rest.to_ascii_lowercase().as_str() {
                "submit" => Command::NewSubmit,
                "clear" => Command::NewClear,
                _ => {
                    let (field, value) = parse_field_value(rest)?;
                    Command::NewField(field, value)
                }
            },
            "open" | "show" => Command::Open(parse_number("id", rest)?),
            "edit" => Command::Edit,
            "set" => {
                let (field, value) = parse_field_value(rest)?;
                Command::Set(field, value)
            }
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "close" => Command::Close,
            "delete" | "rm" => Command::Delete(parse_number("id", rest)?),
            "confirm" | "yes" => Command::Confirm,
            "abort" | "no" => Command::Abort,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_commands() {
        assert_eq!("search  宴 の ".parse(), Ok(Command::Search("宴 の".into())));
        assert_eq!("search".parse(), Ok(Command::Search(String::new())));
        assert_eq!("sort title".parse(), Ok(Command::Sort(SortField::Title)));
        assert_eq!("order asc".parse(), Ok(Command::Order(SortOrder::Asc)));
        assert_eq!("limit 24".parse(), Ok(Command::Limit(24)));
        assert!("limit 13".parse::<Command>().is_err());
        assert_eq!("page 3".parse(), Ok(Command::Page(3)));
        assert!("page three".parse::<Command>().is_err());
    }

    #[test]
    fn parses_form_commands() {
        assert_eq!(
            "new title 宴の一幕".parse(),
            Ok(Command::NewField(FormField::Title, "宴の一幕".into()))
        );
        assert_eq!(
            "new players Aki, Ren".parse(),
            Ok(Command::NewField(FormField::Players, "Aki, Ren".into()))
        );
        assert_eq!("new url".parse(), Ok(Command::NewField(FormField::LogUrl, String::new())));
        assert_eq!("new submit".parse(), Ok(Command::NewSubmit));
        assert_eq!("NEW CLEAR".parse(), Ok(Command::NewClear));
        assert_eq!(
            "set memo long night".parse(),
            Ok(Command::Set(FormField::Memo, "long night".into()))
        );
        assert!("new".parse::<Command>().is_err());
        assert!("set colour red".parse::<Command>().is_err());
    }

    #[test]
    fn parses_dialog_commands() {
        assert_eq!("open 12".parse(), Ok(Command::Open(12)));
        assert_eq!("delete 4".parse(), Ok(Command::Delete(4)));
        assert_eq!("confirm".parse(), Ok(Command::Confirm));
        assert!("frobnicate".parse::<Command>().is_err());
        assert!("   ".parse::<Command>().is_err());
    }
}
