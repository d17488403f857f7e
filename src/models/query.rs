use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Page sizes the view offers.
pub const PAGE_SIZES: [u32; 4] = [12, 24, 36, 60];
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Upper bound the server accepts for `limit`.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Date,
    Title,
    System,
    Id,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Title => "title",
            SortField::System => "system",
            SortField::Id => "id",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "title" => Ok(SortField::Title),
            "system" => Ok(SortField::System),
            "id" => Ok(SortField::Id),
            other => Err(format!(
                "unknown sort field '{other}' (expected date, title, system or id)"
            )),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search, sort and paging parameters of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub q: String,
    pub sort_by: SortField,
    pub order: SortOrder,
    /// 1-based.
    pub page: u32,
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            sort_by: SortField::default(),
            order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Query-string pairs in the server's naming. `q` is sent even when empty.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Number of pages needed for `total` items, never less than one.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_has_floor_of_one() {
        assert_eq!(total_pages(0, 12), 1);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(60, 24), 3);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn default_query_matches_initial_view() {
        let query = ListQuery::default();
        assert_eq!(
            query.to_pairs(),
            vec![
                ("q", String::new()),
                ("sort_by", "date".to_string()),
                ("order", "desc".to_string()),
                ("page", "1".to_string()),
                ("limit", "12".to_string()),
            ]
        );
    }

    #[test]
    fn sort_options_parse_case_insensitively() {
        assert_eq!("Title".parse::<SortField>(), Ok(SortField::Title));
        assert_eq!(" ID ".parse::<SortField>(), Ok(SortField::Id));
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert!("players".parse::<SortField>().is_err());
        assert!("up".parse::<SortOrder>().is_err());
    }
}
