use std::collections::HashSet;
use std::sync::Arc;

use matplan_mealplan::{
    Day, InstanceId, MealPlanStore, RankedRecipe, SuggestionOptions, rank_by_ingredient_match,
};
use matplan_recipe::{Catalog, Recipe, RecipeFilter, parse_payload};
use matplan_shopping::{
    AggregatedIngredient, CategorizedList, CategoryTable, CustomItem, Portions, RecipeIngredients,
    ShoppingList, aggregate, aggregate_by_recipe, categorize, shopping_items,
};

use crate::Config;

/// One planning session: the week plan, the shopping list state and the
/// settings they are read with. Nothing here is persisted.
pub struct Session {
    store: MealPlanStore,
    shopping: ShoppingList,
    table: CategoryTable,
    portions: Portions,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        options: SuggestionOptions,
        table: CategoryTable,
        portions: Portions,
    ) -> Self {
        Self {
            store: MealPlanStore::new(catalog, options),
            shopping: ShoppingList::default(),
            table,
            portions,
        }
    }

    /// Generates the catalog and reads every setting from `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = Catalog::generate(config.catalog.target_size)?;

        Ok(Self::new(
            catalog,
            config.planner.suggestion_options(),
            config.shopping.category_table()?,
            config.planner.portions()?,
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    pub fn store(&self) -> &MealPlanStore {
        &self.store
    }

    pub fn add_recipe(&mut self, day: Day, recipe: Arc<Recipe>) -> matplan_shared::Result<InstanceId> {
        self.store.add_recipe(day, recipe)
    }

    pub fn add_recipe_by_id(&mut self, day: Day, recipe_id: &str) -> matplan_shared::Result<InstanceId> {
        let Some(recipe) = self.catalog().get(recipe_id).cloned() else {
            matplan_shared::bail!("unknown recipe '{recipe_id}'");
        };

        self.store.add_recipe(day, recipe)
    }

    /// Adds a recipe received as JSON. A malformed payload is logged and
    /// dropped, the plan stays as it was.
    pub fn add_recipe_payload(&mut self, day: Day, payload: &str) -> Option<InstanceId> {
        match parse_payload(payload).and_then(|recipe| self.store.add_recipe(day, Arc::new(recipe))) {
            Ok(instance_id) => Some(instance_id),
            Err(error) => {
                tracing::warn!(%day, %error, "recipe payload discarded");
                None
            }
        }
    }

    pub fn remove_recipe(&mut self, day: Day, instance_id: &str) -> bool {
        self.store.remove_recipe(day, instance_id).is_some()
    }

    pub fn move_recipe(&mut self, from: Day, to: Day, instance_id: &str) -> bool {
        self.store.move_recipe(from, to, instance_id)
    }

    /// Shopping totals for the whole week, scaled to `target_portions` when
    /// given and to the session default otherwise.
    pub fn aggregated_ingredients(
        &self,
        target_portions: Option<u32>,
    ) -> matplan_shared::Result<Vec<AggregatedIngredient>> {
        let portions = match target_portions {
            Some(target) => self.portions.with_target(target)?,
            None => self.portions,
        };

        Ok(aggregate(self.store.meal_instances(), portions))
    }

    pub fn ingredients_by_recipe(&self) -> Vec<RecipeIngredients> {
        aggregate_by_recipe(self.store.meal_instances())
    }

    /// Aggregated week plus the given free-form items, grouped by category.
    pub fn categorized_shopping_list(&self, custom: &[CustomItem]) -> CategorizedList {
        let aggregated = aggregate(self.store.meal_instances(), self.portions);

        categorize(&self.table, shopping_items(&aggregated, custom))
    }

    /// Like [`Self::categorized_shopping_list`] with the session's own
    /// custom items and check marks.
    pub fn shopping_list(&self) -> CategorizedList {
        let aggregated = aggregate(self.store.meal_instances(), self.portions);

        self.shopping.build(&self.table, &aggregated)
    }

    pub fn shopping_list_mut(&mut self) -> &mut ShoppingList {
        &mut self.shopping
    }

    pub fn suggestions(&self) -> &[RankedRecipe] {
        self.store.suggestions()
    }

    pub fn rank_by_ingredient_match(&self, selected: &HashSet<String>) -> Vec<RankedRecipe> {
        rank_by_ingredient_match(self.catalog(), selected)
    }

    pub fn set_suggestion_filter(&mut self, filter: Option<RecipeFilter>) {
        self.store.set_filter(filter);
    }
}
