use std::collections::HashMap;
use std::sync::Arc;

use matplan_mealplan::MealInstance;
use matplan_shared::recipe::{Ingredient, Recipe};
use matplan_shared::text::{capitalize, collate, round2};
use serde::Serialize;

/// Serving counts used to scale recipe quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portions {
    per_recipe: u32,
    target: u32,
}

impl Default for Portions {
    fn default() -> Self {
        Self {
            per_recipe: 4,
            target: 4,
        }
    }
}

impl Portions {
    /// Both counts must be at least one.
    pub fn new(per_recipe: u32, target: u32) -> matplan_shared::Result<Self> {
        if per_recipe == 0 || target == 0 {
            matplan_shared::bail!("portions must be at least 1, got {per_recipe}/{target}");
        }

        Ok(Self { per_recipe, target })
    }

    pub fn per_recipe(&self) -> u32 {
        self.per_recipe
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Keeps the recipe base and changes the target.
    pub fn with_target(self, target: u32) -> matplan_shared::Result<Self> {
        Self::new(self.per_recipe, target)
    }

    fn factor(&self) -> f64 {
        f64::from(self.target) / f64::from(self.per_recipe)
    }
}

/// One consolidated shopping line.
///
/// The unit is the first one seen for the name. Quantities with other units
/// are summed as-is, no conversion happens.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedIngredient {
    pub name: String,
    pub total_quantity: f64,
    pub unit: String,
}

/// Sums ingredient quantities across meals, keyed by trimmed lowercase name
///
/// # Arguments
/// * `meals` - Placed meals, a whole week or any subset
/// * `portions` - Scale applied to every quantity (`target / per_recipe`)
///
/// # Returns
/// Lines sorted by capitalized name. Empty input gives an empty list.
pub fn aggregate<'a>(
    meals: impl IntoIterator<Item = &'a MealInstance>,
    portions: Portions,
) -> Vec<AggregatedIngredient> {
    let factor = portions.factor();
    let mut groups: HashMap<String, (f64, String)> = HashMap::new();

    for meal in meals {
        for ingredient in &meal.recipe.ingredients {
            let contribution = round2(ingredient.quantity * factor);
            let entry = groups
                .entry(ingredient.key())
                .or_insert_with(|| (0.0, ingredient.unit.clone()));
            entry.0 += contribution;
        }
    }

    let mut result = groups
        .into_iter()
        .map(|(key, (total, unit))| AggregatedIngredient {
            name: capitalize(&key),
            total_quantity: round2(total),
            unit,
        })
        .collect::<Vec<_>>();

    result.sort_by(|a, b| collate(&a.name, &b.name));

    tracing::debug!(lines = result.len(), "ingredients aggregated");

    result
}

/// Ingredient lines of one dish, for the per-recipe shopping view.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeIngredients {
    pub recipe: Arc<Recipe>,
    pub ingredients: Vec<Ingredient>,
}

/// Groups ingredient lines by recipe name, in order of first appearance.
///
/// A recipe placed twice lists its lines twice; quantities are not summed.
pub fn aggregate_by_recipe<'a>(
    meals: impl IntoIterator<Item = &'a MealInstance>,
) -> Vec<RecipeIngredients> {
    let mut groups: Vec<RecipeIngredients> = vec![];
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for meal in meals {
        let name = meal.recipe.name.as_str();
        let position = *positions.entry(name).or_insert_with(|| {
            groups.push(RecipeIngredients {
                recipe: meal.recipe.clone(),
                ingredients: vec![],
            });
            groups.len() - 1
        });

        groups[position]
            .ingredients
            .extend(meal.recipe.ingredients.iter().cloned());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portions_reject_zero() {
        assert!(Portions::new(0, 4).is_err());
        assert!(Portions::new(4, 0).is_err());
        assert_eq!(Portions::new(2, 6).unwrap().factor(), 3.0);
        assert_eq!(Portions::default().factor(), 1.0);
    }

    #[test]
    fn test_with_target() {
        let portions = Portions::default().with_target(8).unwrap();
        assert_eq!(portions.per_recipe(), 4);
        assert_eq!(portions.target(), 8);
        assert!(Portions::default().with_target(0).is_err());
    }
}
