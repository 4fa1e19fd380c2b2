use std::sync::Arc;

use matplan_recipe::{Catalog, Recipe, RecipeFilter};
use matplan_shared::Result;
use validator::Validate;

use crate::{
    DayPlan, InstanceId, MealInstance, RankOptions, RankedRecipe, WeekPlan, WeekSummary,
    rank_by_plan_overlap,
};
use matplan_shared::mealplan::Day;

#[derive(Clone, Debug)]
pub struct SuggestionOptions {
    /// Number of top suggestions kept after each refresh.
    pub limit: usize,
    pub rank: RankOptions,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            rank: RankOptions::default(),
        }
    }
}

/// Owns the week plan. Every mutation recomputes the suggestion list before
/// returning, so reads never observe suggestions from an older plan.
#[derive(Clone, Debug)]
pub struct MealPlanStore {
    catalog: Catalog,
    week: WeekPlan,
    options: SuggestionOptions,
    suggestions: Vec<RankedRecipe>,
}

impl MealPlanStore {
    pub fn new(catalog: Catalog, options: SuggestionOptions) -> Self {
        Self {
            catalog,
            week: WeekPlan::new(),
            options,
            suggestions: vec![],
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn week(&self) -> &WeekPlan {
        &self.week
    }

    pub fn day(&self, day: Day) -> &DayPlan {
        self.week.day(day)
    }

    pub fn meal_instances(&self) -> impl Iterator<Item = &MealInstance> {
        self.week.meal_instances()
    }

    pub fn is_empty(&self) -> bool {
        self.week.is_empty()
    }

    pub fn summary(&self) -> WeekSummary {
        self.week.summary()
    }

    pub fn suggestions(&self) -> &[RankedRecipe] {
        &self.suggestions
    }

    pub fn options(&self) -> &SuggestionOptions {
        &self.options
    }

    /// Places `recipe` on `day` under a fresh instance id.
    ///
    /// The recipe is validated first; a malformed recipe leaves the plan untouched.
    #[tracing::instrument(skip_all, fields(day = %day, recipe = %recipe.id))]
    pub fn add_recipe(&mut self, day: Day, recipe: Arc<Recipe>) -> Result<InstanceId> {
        recipe.validate()?;

        let instance = MealInstance::new(recipe);
        let instance_id = instance.instance_id.clone();
        self.week.push(day, instance);
        self.refresh();

        tracing::debug!(%instance_id, "recipe added");

        Ok(instance_id)
    }

    /// Removes the instance from `day`. Unknown ids are ignored.
    pub fn remove_recipe(&mut self, day: Day, instance_id: &str) -> Option<MealInstance> {
        let Some(instance) = self.week.take(day, instance_id) else {
            tracing::debug!(%day, instance_id, "remove ignored, instance not on day");
            return None;
        };

        self.refresh();

        Some(instance)
    }

    /// Moves the instance, keeping its id and timestamp, to the end of `to`.
    ///
    /// Returns false when nothing moved: same day, or the instance is not on `from`.
    pub fn move_recipe(&mut self, from: Day, to: Day, instance_id: &str) -> bool {
        if from == to {
            return false;
        }

        let Some(instance) = self.week.take(from, instance_id) else {
            tracing::debug!(%from, %to, instance_id, "move ignored, instance not on day");
            return false;
        };

        self.week.push(to, instance);
        self.refresh();

        true
    }

    pub fn set_filter(&mut self, filter: Option<RecipeFilter>) {
        self.options.rank.filter = filter;
        self.refresh();
    }

    fn refresh(&mut self) {
        let mut suggestions = rank_by_plan_overlap(&self.catalog, &self.week, &self.options.rank);
        suggestions.truncate(self.options.limit);
        self.suggestions = suggestions;

        tracing::debug!(suggestions = self.suggestions.len(), "suggestions refreshed");
    }
}
