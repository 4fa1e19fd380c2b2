use matplan_shared::recipe::{Difficulty, Recipe, RecipeCategory};
use matplan_shared::text::normalize_key;

/// Catalog filter shared by search and by the suggestion ranker.
///
/// Every populated field narrows the result; a default filter matches
/// every recipe.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeFilter {
    /// Case-insensitive text matched against the recipe name and ingredient names.
    pub query: Option<String>,
    /// All of these tags must be present.
    pub tags: Vec<String>,
    pub category: Option<RecipeCategory>,
    pub difficulty: Option<Difficulty>,
    /// Upper bound in minutes, inclusive.
    pub max_prep_time: Option<u32>,
}

impl RecipeFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query
            .as_deref()
            .map(|q| q.trim().is_empty())
            .unwrap_or(true)
            && self.tags.is_empty()
            && self.category.is_none()
            && self.difficulty.is_none()
            && self.max_prep_time.is_none()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.category.is_some() && recipe.category != self.category {
            return false;
        }

        if self.difficulty.is_some() && recipe.difficulty != self.difficulty {
            return false;
        }

        if self
            .max_prep_time
            .is_some_and(|max| recipe.prep_time > max)
        {
            return false;
        }

        if !self.tags.iter().all(|tag| recipe.has_tag(tag)) {
            return false;
        }

        let query = self.query.as_deref().map(normalize_key).unwrap_or_default();
        if query.is_empty() {
            return true;
        }

        normalize_key(&recipe.name).contains(&query)
            || recipe.ingredient_keys().any(|key| key.contains(&query))
    }
}
