use std::time::Duration;

use anyhow::Result;
use matplan::{CatalogSearch, Config};
use matplan_recipe::{Catalog, RecipeFilter};

#[tracing::instrument(skip(config))]
pub async fn list(config: Config, filter: RecipeFilter) -> Result<()> {
    let catalog = Catalog::generate(config.catalog.target_size)?;

    let recipes = if filter.is_empty() {
        catalog.recipes().to_vec()
    } else {
        let mut search = CatalogSearch::new(catalog, Duration::from_millis(config.search.debounce_ms));
        let mut results = search.subscribe();
        search.input(filter);
        results.changed().await?;

        let settled = results.borrow_and_update().clone();
        settled.map(|result| result.recipes).unwrap_or_default()
    };

    for recipe in &recipes {
        let category = recipe.category.map(|c| c.to_string()).unwrap_or_default();
        println!(
            "{:<32} {:>4} min  {:<10} {}",
            recipe.id, recipe.prep_time, category, recipe.name
        );
    }

    tracing::info!(count = recipes.len(), "catalog listed");

    Ok(())
}
