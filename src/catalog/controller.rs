use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};
use crate::books::domain::{normalize_isbn, Book};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::core::command::Command;
use crate::core::controller::{AppError, AppState};
use crate::core::library::{BookKind, LibraryResult};

const MENU: &str = "Library Management System\n\
1. Add Book/EBook\n\
2. Remove Book/EBook by ISBN\n\
3. Search for Books by Title\n\
4. List all Books/EBooks\n\
5. Exit\n";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MenuOption {
    Add,
    Remove,
    Search,
    List,
    Exit,
}

impl MenuOption {
    pub fn parse(s: &str) -> Option<MenuOption> {
        match s.trim() {
            "1" => Some(MenuOption::Add),
            "2" => Some(MenuOption::Remove),
            "3" => Some(MenuOption::Search),
            "4" => Some(MenuOption::List),
            "5" => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

pub fn parse_available(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "y")
}

// CatalogConsole runs the interactive menu, one command at a time, until exit or end of input.
pub struct CatalogConsole<R, W> {
    state: AppState,
    catalog_service: Arc<dyn CatalogService>,
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin> CatalogConsole<R, W> {
    pub fn new(state: AppState, catalog_service: Arc<dyn CatalogService>, input: R, output: W) -> Self {
        Self {
            state,
            catalog_service,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> LibraryResult<()> {
        info!(branch = self.state.config.branch_id.as_str(), "catalog console started");
        loop {
            self.write(MENU).await?;
            let Some(choice) = self.prompt("Choose an option: ").await? else {
                break;
            };
            let keep_going = match MenuOption::parse(choice.as_str()) {
                Some(MenuOption::Add) => self.add_book().await?,
                Some(MenuOption::Remove) => self.remove_book().await?,
                Some(MenuOption::Search) => self.search_books().await?,
                Some(MenuOption::List) => self.list_books().await?,
                Some(MenuOption::Exit) => {
                    self.write_line("Exiting program.").await?;
                    false
                }
                None => {
                    self.write_line("Invalid option, please try again.").await?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush().await?;
        info!("catalog console stopped");
        Ok(())
    }

    async fn add_book(&mut self) -> LibraryResult<bool> {
        let Some(kind) = self.prompt("Enter book type (book/ebook): ").await? else {
            return Ok(false);
        };
        let kind = match BookKind::parse(kind.as_str()) {
            Ok(kind) => kind,
            Err(err) => {
                self.write_line(format!("Error: {}", err).as_str()).await?;
                return Ok(true);
            }
        };
        let Some(title) = self.prompt("Enter title: ").await? else { return Ok(false) };
        let Some(author) = self.prompt("Enter author: ").await? else { return Ok(false) };
        let Some(isbn) = self.prompt("Enter ISBN: ").await? else { return Ok(false) };
        if let Err(err) = normalize_isbn(isbn.as_str()) {
            self.write_line(format!("Error: {}", err).as_str()).await?;
            return Ok(true);
        }
        let Some(available) = self.prompt("Is it available? (true/false): ").await? else { return Ok(false) };
        let available = parse_available(available.as_str());

        let req = match kind {
            BookKind::Book => AddBookCommandRequest::book(isbn.as_str(), title.as_str(), author.as_str(), available),
            BookKind::EBook => {
                let Some(size) = self.prompt("Enter file size (MB): ").await? else { return Ok(false) };
                match AddBookCommandRequest::parse_file_size(size.as_str()) {
                    Ok(file_size_mb) => AddBookCommandRequest::ebook(
                        isbn.as_str(), title.as_str(), author.as_str(), available, file_size_mb),
                    Err(err) => {
                        self.write_line(format!("Error: {}", err).as_str()).await?;
                        return Ok(true);
                    }
                }
            }
        };

        match AddBookCommand::new(self.catalog_service.clone()).execute(req).await {
            Ok(res) => {
                info!(isbn = res.book.isbn(), kind = %res.book.kind(), "book added");
                self.write_line("Book/EBook added successfully!").await?;
            }
            Err(err) => {
                warn!(error = %err, "add book rejected");
                self.write_line(AppError::from(err).message()).await?;
            }
        }
        Ok(true)
    }

    async fn remove_book(&mut self) -> LibraryResult<bool> {
        let Some(isbn) = self.prompt("Enter ISBN to remove: ").await? else {
            return Ok(false);
        };
        match RemoveBookCommand::new(self.catalog_service.clone()).execute(RemoveBookCommandRequest::new(isbn.as_str())).await {
            Ok(_) => self.write_line("Book/EBook removed successfully!").await?,
            Err(err) => {
                warn!(error = %err, "remove book rejected");
                self.write_line(AppError::from(err).message()).await?
            }
        }
        Ok(true)
    }

    async fn search_books(&mut self) -> LibraryResult<bool> {
        let Some(title) = self.prompt("Enter title to search: ").await? else {
            return Ok(false);
        };
        match SearchBooksCommand::new(self.catalog_service.clone()).execute(SearchBooksCommandRequest::new(title.as_str())).await {
            Ok(res) if res.books.is_empty() => self.write_line("No books found.").await?,
            Ok(res) => {
                for book in res.books {
                    self.write_line(format!("{}\n", book.describe()).as_str()).await?;
                }
            }
            Err(err) => self.write_line(AppError::from(err).message()).await?,
        }
        Ok(true)
    }

    async fn list_books(&mut self) -> LibraryResult<bool> {
        match ListBooksCommand::new(self.catalog_service.clone()).execute(ListBooksCommandRequest::default()).await {
            Ok(res) if res.descriptions.is_empty() => self.write_line("The catalog is empty.").await?,
            Ok(res) => {
                for description in res.descriptions {
                    self.write_line(format!("{}\n", description).as_str()).await?;
                }
            }
            Err(err) => self.write_line(AppError::from(err).message()).await?,
        }
        Ok(true)
    }

    // None means the input was closed
    async fn prompt(&mut self, message: &str) -> LibraryResult<Option<String>> {
        self.write(message).await?;
        self.output.flush().await?;
        // raw bytes, so a line that is not valid UTF-8 cannot end the session
        let mut line = vec![];
        if self.input.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn write(&mut self, text: &str) -> LibraryResult<()> {
        self.output.write_all(text.as_bytes()).await?;
        Ok(())
    }

    async fn write_line(&mut self, text: &str) -> LibraryResult<()> {
        self.write(text).await?;
        self.write("\n").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::domain::Book;
    use crate::catalog::controller::{parse_available, CatalogConsole, MenuOption};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;

    async fn run_script(svc: Arc<dyn CatalogService>, script: &str) -> String {
        run_bytes(svc, script.as_bytes()).await
    }

    async fn run_bytes(svc: Arc<dyn CatalogService>, script: &[u8]) -> String {
        let mut console = CatalogConsole::new(
            AppState::new(Configuration::new("test")), svc, script, Vec::<u8>::new());
        console.run().await.expect("console should run");
        String::from_utf8(console.into_output()).expect("utf8 output")
    }

    fn new_service() -> Arc<dyn CatalogService> {
        Arc::from(factory::create_catalog_service(&Configuration::new("test")))
    }

    #[tokio::test]
    async fn test_should_parse_menu_options() {
        assert_eq!(Some(MenuOption::Add), MenuOption::parse("1"));
        assert_eq!(Some(MenuOption::Exit), MenuOption::parse(" 5 "));
        assert_eq!(None, MenuOption::parse("6"));
        assert_eq!(None, MenuOption::parse("add"));
    }

    #[tokio::test]
    async fn test_should_parse_availability() {
        assert!(parse_available("true"));
        assert!(parse_available("Yes"));
        assert!(parse_available("y"));
        assert!(!parse_available("false"));
        assert!(!parse_available(""));
    }

    #[tokio::test]
    async fn test_should_add_and_list_books() {
        let svc = new_service();
        let out = run_script(svc.clone(),
            "1\nbook\nDune\nHerbert\n111\ntrue\n1\nebook\nDune Messiah\nHerbert\n222\nfalse\n4\n4\n5\n").await;

        assert_eq!(2, out.matches("Book/EBook added successfully!").count());
        assert!(out.contains("Title: Dune\nAuthor: Herbert\nISBN: 111\nAvailable: true\n"));
        assert!(out.contains("ISBN: 222\nAvailable: false\nFile Size: 4 MB\n"));
        assert!(out.ends_with("Exiting program.\n"));
        assert_eq!(2, svc.list_books().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_report_duplicate_and_continue() {
        let svc = new_service();
        let out = run_script(svc.clone(),
            "1\nbook\nDune\nHerbert\n111\ntrue\n1\nbook\nOther\nSomeone\n111\ntrue\n5\n").await;

        assert!(out.contains("Error: duplicate isbn 111"));
        assert!(out.ends_with("Exiting program.\n"));
        let books = svc.list_books().await.expect("should list");
        assert_eq!(1, books.len());
        assert_eq!("Dune", books[0].title());
    }

    #[tokio::test]
    async fn test_should_remove_book_by_isbn() {
        let svc = new_service();
        let out = run_script(svc.clone(),
            "1\nbook\nDune\nHerbert\n111\ntrue\n2\n111\n2\n111\n4\n5\n").await;

        assert_eq!(1, out.matches("Book/EBook removed successfully!").count());
        assert!(out.contains("Error: book not found for 111"));
        assert!(out.contains("The catalog is empty."));
        assert!(svc.list_books().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_search_by_title() {
        let svc = new_service();
        let out = run_script(svc,
            "1\nbook\nDune\nHerbert\n111\ntrue\n1\nbook\ndune messiah\nHerbert\n222\ntrue\n3\nDUNE\n3\nHerbert\n5\n").await;

        let dune = out.find("ISBN: 111").expect("first match");
        let messiah = out.find("ISBN: 222").expect("second match");
        assert!(dune < messiah);
        assert!(out.contains("No books found."));
    }

    #[tokio::test]
    async fn test_should_reject_bad_input_and_continue() {
        let svc = new_service();
        let out = run_script(svc.clone(),
            "9\n1\nmagazine\n1\nebook\nDune\nHerbert\n111\ntrue\nhuge\n5\n").await;

        assert!(out.contains("Invalid option, please try again."));
        assert!(out.contains("Error: unknown book type"));
        assert!(out.contains("Error: file size must be a whole number of MB"));
        assert!(svc.list_books().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_survive_invalid_utf8_input() {
        let svc = new_service();
        let out = run_bytes(svc.clone(), b"1\nbook\nDune\nHerbert\n111\ntrue\n\xff\n4\n5\n").await;

        assert!(out.contains("Invalid option, please try again."));
        assert!(out.contains("Title: Dune\nAuthor: Herbert\nISBN: 111\n"));
        assert!(out.ends_with("Exiting program.\n"));
        assert_eq!(1, svc.list_books().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_keep_bad_bytes_inside_a_title() {
        let svc = new_service();
        let _ = run_bytes(svc.clone(), b"1\nbook\nD\xffne\nHerbert\n111\ntrue\n5\n").await;

        let books = svc.list_books().await.expect("should list");
        assert_eq!(1, books.len());
        assert_eq!("D\u{FFFD}ne", books[0].title());
    }

    #[tokio::test]
    async fn test_should_reject_blank_isbn_before_other_prompts() {
        let svc = new_service();
        let out = run_script(svc.clone(), "1\nebook\nDune\nHerbert\n   \n5\n").await;

        assert!(out.contains("Error: isbn must not be blank"));
        assert!(!out.contains("Is it available?"));
        assert!(!out.contains("Enter file size"));
        assert!(out.ends_with("Exiting program.\n"));
        assert!(svc.list_books().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_stop_at_end_of_input() {
        let svc = new_service();
        let out = run_script(svc.clone(), "1\nbook\nDune\n").await;

        assert!(out.ends_with("Enter author: "));
        assert!(svc.list_books().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_list_empty_catalog() {
        let out = run_script(new_service(), "4\r\n5\r\n").await;
        assert!(out.contains("The catalog is empty."));
    }
}
