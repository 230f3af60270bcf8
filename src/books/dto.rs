use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::BookKind;
use crate::utils::date::serializer;

// BookDto is the record shared by printed and electronic books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub available: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str, available: bool) -> BookDto {
        BookDto {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            available,
            created_at: Utc::now().naive_utc(),
        }
    }
}

// EBookDto extends the shared record with the size of the file in megabytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EBookDto {
    #[serde(flatten)]
    pub book: BookDto,
    pub file_size_mb: u32,
}

impl EBookDto {
    pub fn new(book: BookDto, file_size_mb: u32) -> EBookDto {
        EBookDto {
            book,
            file_size_mb,
        }
    }
}

// CatalogEntry is any item held by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CatalogEntry {
    Book(BookDto),
    EBook(EBookDto),
}

impl CatalogEntry {
    pub fn book(isbn: &str, title: &str, author: &str, available: bool) -> Self {
        CatalogEntry::Book(BookDto::new(isbn, title, author, available))
    }

    pub fn ebook(isbn: &str, title: &str, author: &str, available: bool, file_size_mb: u32) -> Self {
        CatalogEntry::EBook(EBookDto::new(BookDto::new(isbn, title, author, available), file_size_mb))
    }

    pub fn base(&self) -> &BookDto {
        match self {
            CatalogEntry::Book(book) => book,
            CatalogEntry::EBook(ebook) => &ebook.book,
        }
    }

    pub fn base_mut(&mut self) -> &mut BookDto {
        match self {
            CatalogEntry::Book(book) => book,
            CatalogEntry::EBook(ebook) => &mut ebook.book,
        }
    }

    pub fn file_size_mb(&self) -> Option<u32> {
        match self {
            CatalogEntry::Book(_) => None,
            CatalogEntry::EBook(ebook) => Some(ebook.file_size_mb),
        }
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Book for BookDto {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn kind(&self) -> BookKind {
        BookKind::Book
    }
}

impl Identifiable for EBookDto {
    fn id(&self) -> String {
        self.book.id()
    }
}

impl Book for EBookDto {
    fn title(&self) -> &str {
        self.book.title()
    }

    fn author(&self) -> &str {
        self.book.author()
    }

    fn isbn(&self) -> &str {
        self.book.isbn()
    }

    fn is_available(&self) -> bool {
        self.book.is_available()
    }

    fn kind(&self) -> BookKind {
        BookKind::EBook
    }

    fn describe(&self) -> String {
        format!("{}\nFile Size: {} MB", self.book.describe(), self.file_size_mb)
    }
}

impl Identifiable for CatalogEntry {
    fn id(&self) -> String {
        self.base().id()
    }
}

impl Book for CatalogEntry {
    fn title(&self) -> &str {
        self.base().title()
    }

    fn author(&self) -> &str {
        self.base().author()
    }

    fn isbn(&self) -> &str {
        self.base().isbn()
    }

    fn is_available(&self) -> bool {
        self.base().is_available()
    }

    fn kind(&self) -> BookKind {
        match self {
            CatalogEntry::Book(book) => book.kind(),
            CatalogEntry::EBook(ebook) => ebook.kind(),
        }
    }

    fn describe(&self) -> String {
        match self {
            CatalogEntry::Book(book) => book.describe(),
            CatalogEntry::EBook(ebook) => ebook.describe(),
        }
    }
}
