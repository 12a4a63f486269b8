use serde::{Deserialize, Serialize};

use crate::de;

/// Laravel-style page descriptor, passed through from the backend untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub total: u32,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub per_page: u32,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub current_page: u32,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub last_page: u32,
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde(default)]
    pub prev_page_url: Option<String>,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub from: u32,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub to: u32,
    #[serde(default)]
    pub links: Vec<PageLink>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PageLink {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub active: bool,
}

/// A rendered page button. `page` is `None` for labels that are not page
/// numbers (ellipses), which render disabled.
#[derive(Clone, Debug, PartialEq)]
pub struct PageButton {
    pub label: String,
    pub page: Option<u32>,
    pub active: bool,
}

const PREV_LABELS: &[&str] = &["&laquo; Previous", "\u{ab} Previous", "pagination.previous"];
const NEXT_LABELS: &[&str] = &["Next &raquo;", "Next \u{bb}", "pagination.next"];

impl Pagination {
    /// Page to load when "previous" is pressed, or `None` at the first page.
    pub fn prev_page(&self) -> Option<u32> {
        if self.current_page <= 1 || self.prev_page_url.is_none() {
            return None;
        }
        Some(self.current_page - 1)
    }

    /// Page to load when "next" is pressed, or `None` at the last page.
    pub fn next_page(&self) -> Option<u32> {
        if self.current_page >= self.last_page || self.next_page_url.is_none() {
            return None;
        }
        Some(self.current_page + 1)
    }

    pub fn buttons(&self) -> Vec<PageButton> {
        self.links
            .iter()
            .filter(|link| {
                let label = link.label.trim();
                !PREV_LABELS.contains(&label) && !NEXT_LABELS.contains(&label)
            })
            .map(|link| PageButton {
                label: link.label.clone(),
                page: parse_page_label(&link.label),
                active: link.active,
            })
            .collect()
    }

    /// "12 items, showing 1 to 10"-style summary values.
    pub fn summary(&self) -> (u32, u32, u32) {
        (self.total, self.from, self.to)
    }
}

fn parse_page_label(label: &str) -> Option<u32> {
    let label = label.trim();
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse().ok().filter(|page| *page > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(label: &str, active: bool) -> PageLink {
        PageLink {
            url: Some(format!("http://backend/api/projects?page={label}")),
            label: label.into(),
            active,
        }
    }

    fn descriptor(current: u32, last: u32) -> Pagination {
        Pagination {
            total: 45,
            per_page: 10,
            current_page: current,
            last_page: last,
            next_page_url: (current < last).then(|| "next".into()),
            prev_page_url: (current > 1).then(|| "prev".into()),
            from: (current - 1) * 10 + 1,
            to: (current * 10).min(45),
            links: vec![
                link("&laquo; Previous", false),
                link("1", current == 1),
                link("2", current == 2),
                link("...", false),
                link("5", current == 5),
                link("Next &raquo;", false),
            ],
        }
    }

    #[test]
    fn prev_disabled_on_first_page() {
        let p = descriptor(1, 5);
        assert_eq!(p.prev_page(), None);
        assert_eq!(p.next_page(), Some(2));
    }

    #[test]
    fn next_disabled_on_last_page() {
        let p = descriptor(5, 5);
        assert_eq!(p.prev_page(), Some(4));
        assert_eq!(p.next_page(), None);
    }

    #[test]
    fn single_page_disables_both() {
        let p = descriptor(1, 1);
        assert_eq!(p.prev_page(), None);
        assert_eq!(p.next_page(), None);
    }

    #[test]
    fn missing_urls_disable_navigation() {
        let mut p = descriptor(3, 5);
        p.next_page_url = None;
        p.prev_page_url = None;
        assert_eq!(p.prev_page(), None);
        assert_eq!(p.next_page(), None);
    }

    #[test]
    fn buttons_drop_sentinels_and_mark_ellipsis() {
        let buttons = descriptor(2, 5).buttons();
        let labels: Vec<_> = buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "...", "5"]);
        assert_eq!(buttons[0].page, Some(1));
        assert!(buttons[1].active);
        assert_eq!(buttons[2].page, None);
        assert_eq!(buttons[3].page, Some(5));
    }

    #[test]
    fn malformed_labels_do_not_panic() {
        assert_eq!(parse_page_label(""), None);
        assert_eq!(parse_page_label("0"), None);
        assert_eq!(parse_page_label("-3"), None);
        assert_eq!(parse_page_label("99999999999999999999"), None);
        assert_eq!(parse_page_label(" 7 "), Some(7));
    }

    #[test]
    fn decodes_string_numbers() {
        let p: Pagination = serde_json::from_str(
            r#"{"total":"12","per_page":10,"current_page":"2","last_page":2,"from":11,"to":12,"links":[]}"#,
        )
        .unwrap();
        assert_eq!(p.total, 12);
        assert_eq!(p.current_page, 2);
        assert_eq!(p.summary(), (12, 11, 12));
    }
}
