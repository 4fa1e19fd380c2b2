use std::sync::Arc;

use matplan_shared::mealplan::Day;
use matplan_shared::recipe::Recipe;
use strum::VariantArray;
use time::OffsetDateTime;
use ulid::Ulid;

pub type InstanceId = String;

/// One placement of a recipe on one day.
///
/// The recipe is shared with the catalog; the instance id is the only key
/// used for removal and moves since the same recipe may be placed many times.
#[derive(Clone, Debug, PartialEq)]
pub struct MealInstance {
    pub instance_id: InstanceId,
    pub recipe: Arc<Recipe>,
    pub added_at: OffsetDateTime,
}

impl MealInstance {
    pub fn new(recipe: Arc<Recipe>) -> Self {
        Self {
            instance_id: Ulid::new().to_string(),
            recipe,
            added_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayPlan {
    day: Day,
    recipes: Vec<MealInstance>,
}

impl DayPlan {
    fn new(day: Day) -> Self {
        Self {
            day,
            recipes: vec![],
        }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn recipes(&self) -> &[MealInstance] {
        &self.recipes
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn instance_ids(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(|m| m.instance_id.as_str())
    }
}

/// Per-day meal counts and total prep minutes, for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekSummary {
    pub meals_per_day: Vec<(Day, usize)>,
    pub total_meals: usize,
    pub total_prep_time: u32,
}

/// Exactly seven day plans, Monday to Sunday. Empty days hold an empty list.
#[derive(Clone, Debug, PartialEq)]
pub struct WeekPlan {
    days: [DayPlan; 7],
}

impl Default for WeekPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekPlan {
    pub fn new() -> Self {
        Self {
            days: std::array::from_fn(|i| DayPlan::new(Day::VARIANTS[i])),
        }
    }

    pub fn day(&self, day: Day) -> &DayPlan {
        &self.days[day.index()]
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    /// Every placed meal, Monday first, in placement order within a day.
    pub fn meal_instances(&self) -> impl Iterator<Item = &MealInstance> {
        self.days.iter().flat_map(|d| d.recipes.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(DayPlan::is_empty)
    }

    pub fn contains_recipe(&self, recipe_id: &str) -> bool {
        self.meal_instances().any(|m| m.recipe.id == recipe_id)
    }

    pub fn find(&self, instance_id: &str) -> Option<(Day, &MealInstance)> {
        self.days.iter().find_map(|d| {
            d.recipes
                .iter()
                .find(|m| m.instance_id == instance_id)
                .map(|m| (d.day, m))
        })
    }

    pub fn summary(&self) -> WeekSummary {
        WeekSummary {
            meals_per_day: self.days.iter().map(|d| (d.day, d.recipes.len())).collect(),
            total_meals: self.meal_instances().count(),
            total_prep_time: self.meal_instances().map(|m| m.recipe.prep_time).sum(),
        }
    }

    pub(crate) fn push(&mut self, day: Day, instance: MealInstance) {
        self.days[day.index()].recipes.push(instance);
    }

    pub(crate) fn take(&mut self, day: Day, instance_id: &str) -> Option<MealInstance> {
        let recipes = &mut self.days[day.index()].recipes;
        let position = recipes.iter().position(|m| m.instance_id == instance_id)?;

        Some(recipes.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matplan_shared::recipe::Ingredient;

    fn recipe(id: &str, prep_time: u32) -> Arc<Recipe> {
        Arc::new(Recipe {
            id: id.to_owned(),
            name: id.to_owned(),
            ingredients: vec![Ingredient::new("Lök", 1.0, "st")],
            prep_time,
            category: None,
            difficulty: None,
            tags: vec![],
            image: None,
            nutrition: None,
            base_recipe_id: None,
        })
    }

    #[test]
    fn test_new_week_has_seven_empty_days() {
        let week = WeekPlan::new();
        assert_eq!(week.days().len(), 7);
        assert!(week.is_empty());
        for (day, plan) in Day::VARIANTS.iter().zip(week.days()) {
            assert_eq!(plan.day(), *day);
            assert!(plan.is_empty());
        }
    }

    #[test]
    fn test_push_take_and_find() {
        let mut week = WeekPlan::new();
        let instance = MealInstance::new(recipe("a", 20));
        let id = instance.instance_id.clone();
        week.push(Day::Wednesday, instance);

        assert_eq!(week.find(&id).map(|(d, _)| d), Some(Day::Wednesday));
        assert!(week.contains_recipe("a"));
        assert!(week.take(Day::Monday, &id).is_none());
        assert!(week.take(Day::Wednesday, &id).is_some());
        assert!(week.is_empty());
    }

    #[test]
    fn test_summary() {
        let mut week = WeekPlan::new();
        week.push(Day::Monday, MealInstance::new(recipe("a", 20)));
        week.push(Day::Monday, MealInstance::new(recipe("b", 35)));
        week.push(Day::Friday, MealInstance::new(recipe("a", 20)));

        let summary = week.summary();
        assert_eq!(summary.total_meals, 3);
        assert_eq!(summary.total_prep_time, 75);
        assert_eq!(summary.meals_per_day[0], (Day::Monday, 2));
        assert_eq!(summary.meals_per_day[4], (Day::Friday, 1));
        assert_eq!(summary.meals_per_day[6], (Day::Sunday, 0));
    }

    #[test]
    fn test_instance_ids_are_unique() {
        let r = recipe("a", 10);
        let ids: std::collections::HashSet<_> = (0..100)
            .map(|_| MealInstance::new(r.clone()).instance_id)
            .collect();
        assert_eq!(ids.len(), 100);
    }
}
