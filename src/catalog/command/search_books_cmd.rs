use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::CatalogEntry;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct SearchBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchBooksCommandRequest {
    pub title: String,
}

impl SearchBooksCommandRequest {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub struct SearchBooksCommandResponse {
    pub books: Vec<CatalogEntry>,
}

impl SearchBooksCommandResponse {
    pub fn new(books: Vec<CatalogEntry>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        self.catalog_service.find_books_by_title(req.title.as_str())
            .await.map_err(CommandError::from).map(SearchBooksCommandResponse::new)
    }
}
