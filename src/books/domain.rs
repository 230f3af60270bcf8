use crate::core::domain::Identifiable;
use crate::core::library::{BookKind, LibraryError, LibraryResult};

pub mod model;

// Book is the capability shared by every catalog entry, whatever its format.
pub trait Book: Identifiable {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn isbn(&self) -> &str;
    fn is_available(&self) -> bool;
    fn kind(&self) -> BookKind;

    /// Human-readable, multi-line description used for listing and search results.
    fn describe(&self) -> String {
        format!("Title: {}\nAuthor: {}\nISBN: {}\nAvailable: {}",
                self.title(), self.author(), self.isbn(), self.is_available())
    }
}

/// Case-insensitive substring match used by title search.
pub fn title_matches(title: &str, fragment: &str) -> bool {
    title.to_lowercase().contains(fragment.to_lowercase().as_str())
}

/// Trims an ISBN and rejects it when nothing is left.
pub fn normalize_isbn(isbn: &str) -> LibraryResult<&str> {
    let isbn = isbn.trim();
    if isbn.is_empty() {
        return Err(LibraryError::validation("isbn must not be blank", Some("isbn".to_string())));
    }
    Ok(isbn)
}

#[cfg(test)]
mod tests {
    use crate::books::domain::{normalize_isbn, title_matches};
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_normalize_isbn() {
        assert_eq!("111", normalize_isbn(" 111 ").expect("should trim"));
        assert!(matches!(normalize_isbn(""), Err(LibraryError::Validation { .. })));
        assert!(matches!(normalize_isbn(" \t "), Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_match_title_ignoring_case() {
        assert!(title_matches("Dune Messiah", "DUNE"));
        assert!(title_matches("dune messiah", "Messiah"));
        assert!(title_matches("Dune", ""));
        assert!(!title_matches("Foundation", "dune"));
    }
}
