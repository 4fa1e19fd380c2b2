use anyhow::Result;
use matplan::{Config, Session};
use matplan_mealplan::Day;
use strum::VariantArray;

pub struct PlanArgs {
    pub meals: Vec<(Day, String)>,
    pub portions: Option<u32>,
    pub items: Vec<String>,
    pub per_recipe: bool,
}

/// Parses `DAY=RECIPE_ID`, e.g. `monday=kottbullar`.
pub fn parse_meal(value: &str) -> Result<(Day, String), String> {
    let (day, recipe_id) = value
        .split_once('=')
        .ok_or_else(|| format!("expected DAY=RECIPE_ID, got '{value}'"))?;
    let day = day
        .trim()
        .parse::<Day>()
        .map_err(|_| format!("unknown day '{}'", day.trim()))?;
    let recipe_id = recipe_id.trim();
    if recipe_id.is_empty() {
        return Err(format!("missing recipe id in '{value}'"));
    }

    Ok((day, recipe_id.to_owned()))
}

fn quantity(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        return value.to_string();
    }

    format!("{value} {unit}")
}

#[tracing::instrument(skip_all, fields(meals = args.meals.len()))]
pub fn plan(mut config: Config, args: PlanArgs) -> Result<()> {
    if let Some(portions) = args.portions {
        config.planner.target_portions = portions;
    }

    let mut session = Session::from_config(&config)?;
    for (day, recipe_id) in &args.meals {
        session.add_recipe_by_id(*day, recipe_id)?;
    }
    for item in &args.items {
        session.shopping_list_mut().add_custom(item)?;
    }

    println!("Week");
    for day in Day::VARIANTS {
        let plan = session.store().day(*day);
        if plan.is_empty() {
            continue;
        }

        let names = plan
            .recipes()
            .iter()
            .map(|m| m.recipe.name.as_str())
            .collect::<Vec<_>>();
        println!("  {:<8} {}", day.label(), names.join(", "));
    }
    let summary = session.store().summary();
    println!("  {} meals, {} min cooking", summary.total_meals, summary.total_prep_time);

    println!();
    if args.per_recipe {
        println!("Ingredients per recipe");
        for group in session.ingredients_by_recipe() {
            println!("  {}", group.recipe.name);
            for ingredient in &group.ingredients {
                println!("    {:<24} {}", ingredient.name, quantity(ingredient.quantity, &ingredient.unit));
            }
        }
    } else {
        println!("Ingredients for {} portions", config.planner.target_portions);
        for line in session.aggregated_ingredients(None)? {
            println!("  {:<24} {}", line.name, quantity(line.total_quantity, &line.unit));
        }
    }

    println!();
    println!("Shopping list");
    for group in &session.shopping_list() {
        println!("  {}", group.name);
        for item in &group.items {
            match (item.quantity, item.unit.as_deref()) {
                (Some(value), Some(unit)) => println!("    [ ] {:<24} {}", item.name, quantity(value, unit)),
                _ => println!("    [ ] {}", item.name),
            }
        }
    }

    println!();
    println!("Suggestions");
    for suggestion in session.suggestions() {
        println!(
            "  {:<32} shares {} ({})",
            suggestion.recipe.name,
            suggestion.match_count,
            suggestion.matched.join(", ")
        );
    }

    tracing::info!(meals = summary.total_meals, "week planned");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meal() {
        assert_eq!(
            parse_meal("Monday=kottbullar"),
            Ok((Day::Monday, "kottbullar".to_owned()))
        );
        assert_eq!(
            parse_meal(" friday = tacos "),
            Ok((Day::Friday, "tacos".to_owned()))
        );
        assert!(parse_meal("kottbullar").is_err());
        assert!(parse_meal("someday=tacos").is_err());
        assert!(parse_meal("monday=").is_err());
    }
}
