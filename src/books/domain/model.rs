use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity is the stored form of a catalog entry. Printed books leave file_size_mb empty.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub file_size_mb: Option<u32>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str, available: bool) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            available,
            file_size_mb: None,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}


#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::core::domain::Identifiable;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("isbn", "title", "author", true);
        assert_eq!("isbn", book.id().as_str());
        assert_eq!("title", book.title.as_str());
        assert_eq!(None, book.file_size_mb);
    }
}
