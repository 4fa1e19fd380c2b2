use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use matplan_mealplan::{OverlapMatch, RankOptions, SuggestionOptions};
use matplan_shopping::{CategoryRule, CategoryTable, FALLBACK_CATEGORY, Portions};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default = "default_portions")]
    pub portions_per_recipe: u32,
    #[serde(default = "default_portions")]
    pub target_portions: u32,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_true")]
    pub exclude_variants: bool,
    /// Count "lök" as shared with "rödlök" when ranking suggestions
    #[serde(default)]
    pub substring_overlap: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            portions_per_recipe: default_portions(),
            target_portions: default_portions(),
            suggestion_limit: default_suggestion_limit(),
            exclude_variants: true,
            substring_overlap: false,
        }
    }
}

impl PlannerConfig {
    pub fn portions(&self) -> matplan_shared::Result<Portions> {
        Portions::new(self.portions_per_recipe, self.target_portions)
    }

    pub fn suggestion_options(&self) -> SuggestionOptions {
        SuggestionOptions {
            limit: self.suggestion_limit,
            rank: RankOptions {
                exclude_variants: self.exclude_variants,
                overlap: if self.substring_overlap {
                    OverlapMatch::Substring
                } else {
                    OverlapMatch::Exact
                },
                ..RankOptions::default()
            },
        }
    }
}

fn default_portions() -> u32 {
    4
}

fn default_suggestion_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_size")]
    pub target_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            target_size: default_catalog_size(),
        }
    }
}

fn default_catalog_size() -> usize {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Replaces the built-in Swedish grocery table when set
    #[serde(default)]
    pub categories: Option<Vec<CategoryRule>>,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            categories: None,
        }
    }
}

impl ShoppingConfig {
    pub fn category_table(&self) -> matplan_shared::Result<CategoryTable> {
        match &self.categories {
            Some(rules) => CategoryTable::new(rules.clone(), self.fallback.clone()),
            None if self.fallback == FALLBACK_CATEGORY => Ok(CategoryTable::default()),
            None => CategoryTable::new(CategoryTable::default().rules().to_vec(), self.fallback.clone()),
        }
    }
}

fn default_fallback() -> String {
    FALLBACK_CATEGORY.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> String {
    "matplan-storage.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MATPLAN__PLANNER__TARGET_PORTIONS, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("planner.portions_per_recipe", 4)?
            .set_default("planner.target_portions", 4)?
            .set_default("catalog.target_size", 60)?
            .set_default("observability.log_level", "info")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, a missing file keeps the defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MATPLAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.planner.portions_per_recipe < 1 || self.planner.target_portions < 1 {
            return Err("Portions must be at least 1".to_string());
        }
        if self.catalog.target_size < 1 {
            return Err("Catalog target_size must be at least 1".to_string());
        }
        if let Some(categories) = &self.shopping.categories {
            if categories.iter().any(|c| c.name.trim().is_empty()) {
                return Err("Shopping category names must not be empty".to_string());
            }
        }
        if self.shopping.fallback.trim().is_empty() {
            return Err("Shopping fallback category must not be empty".to_string());
        }
        Ok(())
    }
}
