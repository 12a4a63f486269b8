pub mod app;
pub mod envelope;
pub mod form;
pub mod history;
pub mod license;
pub mod pagination;
pub mod project;
pub mod user;

mod de;

pub use app::*;
pub use de::GENERAL_ERRORS;
pub use envelope::*;
pub use form::*;
pub use history::*;
pub use license::*;
pub use pagination::*;
pub use project::*;
pub use user::*;

/// Cuts a backend timestamp ("2025-01-01 09:00:00" or RFC 3339) down to the
/// `YYYY-MM-DD` form a date input accepts.
pub fn date_part(value: &str) -> &str {
    let value = value.trim();
    let end = value.find([' ', 'T']).unwrap_or(value.len());
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_part_strips_time() {
        assert_eq!(date_part("2025-01-01 09:30:00"), "2025-01-01");
        assert_eq!(date_part("2025-03-04T00:00:00.000000Z"), "2025-03-04");
        assert_eq!(date_part("2025-12-31"), "2025-12-31");
        assert_eq!(date_part(""), "");
    }
}
