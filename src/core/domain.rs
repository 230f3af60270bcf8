// Identifiable defines common traits that can be shared by catalog objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}

pub const DEFAULT_BRANCH: &str = "main";

// Configuration abstracts config options for the catalog
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub json_logs: bool,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            json_logs: false,
        }
    }

    // reads CATALOG_BRANCH and CATALOG_LOG_JSON, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let branch_id = lookup("CATALOG_BRANCH")
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let json_logs = lookup("CATALOG_LOG_JSON")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);
        Configuration {
            branch_id,
            json_logs,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_BRANCH)
    }
}
