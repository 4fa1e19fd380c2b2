use matplan_shared::recipe::{Difficulty, Ingredient, Nutrition, Recipe, RecipeCategory};
use serde::Deserialize;
use validator::Validate;

/// Ingredient line as sent by UI collaborators.
#[derive(Deserialize, Clone, Debug)]
pub struct IngredientInput {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

/// Recipe as it crosses into the core, e.g. a drag-and-drop payload.
///
/// Nothing here is trusted: [`RecipeInput::into_recipe`] validates the whole
/// shape and a failure means the payload is discarded.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<IngredientInput>,
    pub prep_time: u32,
    #[serde(default)]
    pub category: Option<RecipeCategory>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub base_recipe_id: Option<String>,
}

impl RecipeInput {
    pub fn into_recipe(self) -> matplan_shared::Result<Recipe> {
        let recipe = Recipe {
            id: self.id,
            name: self.name,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name, i.quantity, i.unit))
                .collect(),
            prep_time: self.prep_time,
            category: self.category,
            difficulty: self.difficulty,
            tags: self.tags,
            image: self.image,
            nutrition: self.nutrition,
            base_recipe_id: self.base_recipe_id,
        };

        recipe.validate()?;

        Ok(recipe)
    }
}

/// Decodes and validates a JSON recipe payload in one step.
pub fn parse_payload(payload: &str) -> matplan_shared::Result<Recipe> {
    let input: RecipeInput = serde_json::from_str(payload)?;
    input.into_recipe()
}

#[cfg(test)]
mod tests {
    use super::*;
    use matplan_shared::Error;

    const VALID: &str = r#"{
        "id": "pasta-bolognese",
        "name": "Pasta bolognese",
        "ingredients": [
            {"name": "Nötfärs", "quantity": 400, "unit": "g"},
            {"name": "Lök", "quantity": 1, "unit": "st"}
        ],
        "prepTime": 35,
        "category": "carbs",
        "difficulty": "easy",
        "tags": ["klassiker"]
    }"#;

    #[test]
    fn test_parse_valid_payload() {
        let recipe = parse_payload(VALID).unwrap();
        assert_eq!(recipe.id, "pasta-bolognese");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].quantity, 400.0);
        assert_eq!(recipe.category, Some(RecipeCategory::Carbs));
        assert_eq!(recipe.base_recipe_id, None);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let result = parse_payload(r#"{"id": "x", "name": "X", "prepTime": 10}"#);
        assert!(matches!(result, Err(Error::Payload(_))));
    }

    #[test]
    fn test_wrong_types_rejected() {
        let result = parse_payload(
            r#"{"id": "x", "name": "X", "ingredients": "none", "prepTime": "ten"}"#,
        );
        assert!(matches!(result, Err(Error::Payload(_))));

        let result = parse_payload(
            r#"{"id": "x", "name": "X", "ingredients": [{"name": "Lök", "quantity": 1}], "prepTime": -5}"#,
        );
        assert!(matches!(result, Err(Error::Payload(_))));
    }

    #[test]
    fn test_invalid_shape_rejected() {
        let result = parse_payload(
            r#"{"id": "x", "name": "X", "ingredients": [], "prepTime": 10}"#,
        );
        assert!(matches!(result, Err(Error::Validate(_))));

        let result = parse_payload(
            r#"{"id": "x", "name": "X", "ingredients": [{"name": "Lök", "quantity": 0}], "prepTime": 10}"#,
        );
        assert!(matches!(result, Err(Error::Validate(_))));

        let long_name = "a".repeat(101);
        let payload = format!(
            r#"{{"id": "x", "name": "{long_name}", "ingredients": [{{"name": "Lök", "quantity": 1}}], "prepTime": 10}}"#
        );
        assert!(matches!(parse_payload(&payload), Err(Error::Validate(_))));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = parse_payload(
            r#"{"id": "x", "name": "X", "ingredients": [{"name": "Lök", "quantity": 1}], "prepTime": 10, "category": "snacks"}"#,
        );
        assert!(result.is_err());
    }
}
