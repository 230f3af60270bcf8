use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct ListBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ListBooksCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct ListBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub struct ListBooksCommandResponse {
    pub descriptions: Vec<String>,
}

impl ListBooksCommandResponse {
    pub fn new(descriptions: Vec<String>) -> Self {
        Self {
            descriptions,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, _req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        self.catalog_service.describe_books()
            .await.map_err(CommandError::from).map(ListBooksCommandResponse::new)
    }
}
