use std::collections::HashSet;

use anyhow::Result;
use matplan::{Config, Session};

#[tracing::instrument(skip(config))]
pub fn rank(config: Config, ingredients: Vec<String>) -> Result<()> {
    let session = Session::from_config(&config)?;
    let selected: HashSet<String> = ingredients.into_iter().collect();

    let ranked = session.rank_by_ingredient_match(&selected);
    if ranked.is_empty() {
        println!("No recipe uses any of these ingredients");
        return Ok(());
    }

    for entry in ranked.iter().take(config.planner.suggestion_limit) {
        println!(
            "{:>5.1}%  {}/{}  {}  ({})",
            entry.match_percentage,
            entry.match_count,
            entry.recipe.ingredients.len(),
            entry.recipe.name,
            entry.matched.join(", ")
        );
    }

    Ok(())
}
