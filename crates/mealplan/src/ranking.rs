use std::collections::HashSet;
use std::sync::Arc;

use matplan_recipe::{Catalog, Recipe, RecipeFilter};
use matplan_shared::text::normalize_key;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::WeekPlan;

/// Percentage points within which two ingredient-match scores count as equal.
const TIE_WINDOW: f64 = 5.0;

/// How a recipe ingredient is compared against the planned ingredient set.
#[derive(EnumString, Display, Default, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OverlapMatch {
    #[default]
    Exact,
    /// Either name contains the other, "lök" also counts for "rödlök".
    Substring,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedRecipe {
    pub recipe: Arc<Recipe>,
    pub score: f64,
    pub match_count: usize,
    /// Display names of the recipe's ingredients that matched.
    pub matched: Vec<String>,
    pub match_percentage: f64,
}

#[derive(Clone, Debug)]
pub struct RankOptions {
    pub exclude_already_planned: bool,
    /// Also skip recipes sharing a base recipe with anything planned.
    pub exclude_variants: bool,
    pub overlap: OverlapMatch,
    pub filter: Option<RecipeFilter>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            exclude_already_planned: true,
            exclude_variants: true,
            overlap: OverlapMatch::Exact,
            filter: None,
        }
    }
}

struct Overlap {
    count: usize,
    matched: Vec<String>,
}

fn overlap(recipe: &Recipe, known: &HashSet<String>, mode: OverlapMatch) -> Overlap {
    let matched = recipe
        .ingredients
        .iter()
        .filter(|ingredient| {
            let key = ingredient.key();
            match mode {
                OverlapMatch::Exact => known.contains(&key),
                OverlapMatch::Substring => {
                    known.contains(&key)
                        || (!key.is_empty()
                            && known.iter().any(|k| k.contains(&key) || key.contains(k.as_str())))
                }
            }
        })
        .map(|ingredient| ingredient.name.trim().to_owned())
        .collect::<Vec<_>>();

    Overlap {
        count: matched.len(),
        matched,
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    count as f64 / total as f64 * 100.0
}

/// Ranks catalog recipes by how many ingredients they share with the week
/// plan, most shared first. Equal counts keep catalog order.
///
/// An empty plan yields no suggestions.
pub fn rank_by_plan_overlap(
    catalog: &Catalog,
    week: &WeekPlan,
    options: &RankOptions,
) -> Vec<RankedRecipe> {
    if week.is_empty() {
        return vec![];
    }

    let planned_keys = week
        .meal_instances()
        .flat_map(|m| m.recipe.ingredient_keys())
        .filter(|k| !k.is_empty())
        .collect::<HashSet<_>>();
    let planned_ids = week
        .meal_instances()
        .map(|m| m.recipe.id.as_str())
        .collect::<HashSet<_>>();
    let planned_bases = week
        .meal_instances()
        .map(|m| m.recipe.base_id())
        .collect::<HashSet<_>>();

    let mut ranked = catalog
        .iter()
        .filter(|recipe| {
            if !options.exclude_already_planned {
                return true;
            }

            !planned_ids.contains(recipe.id.as_str())
                && !(options.exclude_variants && planned_bases.contains(recipe.base_id()))
        })
        .filter(|recipe| options.filter.as_ref().is_none_or(|f| f.matches(recipe)))
        .map(|recipe| {
            let Overlap { count, matched } = overlap(recipe, &planned_keys, options.overlap);

            RankedRecipe {
                recipe: recipe.clone(),
                score: count as f64,
                match_count: count,
                matched,
                match_percentage: percentage(count, recipe.ingredients.len()),
            }
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.match_count.cmp(&a.match_count));

    ranked
}

/// Ranks catalog recipes by the share of their ingredients found in
/// `selected`. Recipes matching nothing are left out.
///
/// Scores within five percentage points are treated as equal, and then the
/// recipe with fewer ingredients wins.
pub fn rank_by_ingredient_match<S: AsRef<str>>(
    catalog: &Catalog,
    selected: impl IntoIterator<Item = S>,
) -> Vec<RankedRecipe> {
    let selected = selected
        .into_iter()
        .map(|s| normalize_key(s.as_ref()))
        .filter(|k| !k.is_empty())
        .collect::<HashSet<_>>();

    if selected.is_empty() {
        return vec![];
    }

    let candidates = catalog.iter().filter_map(|recipe| {
        let Overlap { count, matched } = overlap(recipe, &selected, OverlapMatch::Exact);
        if count == 0 {
            return None;
        }

        let match_percentage = percentage(count, recipe.ingredients.len());

        Some(RankedRecipe {
            recipe: recipe.clone(),
            score: match_percentage,
            match_count: count,
            matched,
            match_percentage,
        })
    });

    order_by_match(candidates)
}

fn ranks_before(a: &RankedRecipe, b: &RankedRecipe) -> bool {
    let diff = a.match_percentage - b.match_percentage;
    if diff.abs() > TIE_WINDOW {
        return diff > 0.0;
    }

    a.recipe.ingredients.len() < b.recipe.ingredients.len()
}

// The tie window makes the relation non-transitive, so `sort_by` could panic.
// Each candidate goes in front of the first entry it beats.
fn order_by_match(candidates: impl Iterator<Item = RankedRecipe>) -> Vec<RankedRecipe> {
    let mut ordered: Vec<RankedRecipe> = vec![];

    for candidate in candidates {
        let position = ordered
            .iter()
            .position(|existing| ranks_before(&candidate, existing))
            .unwrap_or(ordered.len());
        ordered.insert(position, candidate);
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use matplan_shared::recipe::Ingredient;

    fn recipe(id: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_owned(),
            name: id.to_uppercase(),
            ingredients: ingredients
                .iter()
                .map(|name| Ingredient::new(*name, 1.0, "st"))
                .collect(),
            prep_time: 20,
            category: None,
            difficulty: None,
            tags: vec![],
            image: None,
            nutrition: None,
            base_recipe_id: None,
        }
    }

    fn ranked(id: &str, total: usize, percentage: f64) -> RankedRecipe {
        let names = (0..total).map(|i| format!("x{i}")).collect::<Vec<_>>();
        let names = names.iter().map(String::as_str).collect::<Vec<_>>();

        RankedRecipe {
            recipe: Arc::new(recipe(id, &names)),
            score: percentage,
            match_count: 1,
            matched: vec![],
            match_percentage: percentage,
        }
    }

    fn ids(ranked: &[RankedRecipe]) -> Vec<&str> {
        ranked.iter().map(|r| r.recipe.id.as_str()).collect()
    }

    #[test]
    fn test_overlap_exact_and_substring() {
        let known = HashSet::from(["rödlök".to_owned(), "potatis".to_owned()]);
        let r = recipe("a", &["Lök", " POTATIS ", "Fisk"]);

        let exact = overlap(&r, &known, OverlapMatch::Exact);
        assert_eq!(exact.count, 1);
        assert_eq!(exact.matched, vec!["POTATIS"]);

        let substring = overlap(&r, &known, OverlapMatch::Substring);
        assert_eq!(substring.count, 2);
        assert_eq!(substring.matched, vec!["Lök", "POTATIS"]);
    }

    #[test]
    fn test_order_by_match_window() {
        let ordered = order_by_match(
            vec![
                ranked("wide", 3, 66.7),
                ranked("full", 2, 100.0),
                ranked("close", 5, 98.0),
                ranked("simple", 1, 96.0),
            ]
            .into_iter(),
        );

        assert_eq!(ids(&ordered), vec!["simple", "full", "close", "wide"]);
    }

    #[test]
    fn test_order_by_match_keeps_equal_in_input_order() {
        let ordered = order_by_match(
            vec![
                ranked("a", 2, 50.0),
                ranked("b", 2, 50.0),
                ranked("c", 2, 50.0),
            ]
            .into_iter(),
        );

        assert_eq!(ids(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_overlap_match_parse() {
        assert_eq!("substring".parse::<OverlapMatch>().ok(), Some(OverlapMatch::Substring));
        assert_eq!(OverlapMatch::default(), OverlapMatch::Exact);
    }
}
