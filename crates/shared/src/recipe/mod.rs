use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::{Validate, ValidationError};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecipeCategory {
    Vegetables,
    Carbs,
    Protein,
    Dairy,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Next harder level, saturating at `Hard`.
    pub fn harder(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }
}

/// Display-only nutrition facts, never computed on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: Option<u32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Validate, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[validate(custom(function = "positive_quantity"))]
    pub quantity: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Name used for every cross-recipe comparison.
    pub fn key(&self) -> String {
        crate::text::normalize_key(&self.name)
    }
}

#[derive(Validate, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub id: String,
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<Ingredient>,
    #[validate(range(min = 1))]
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
    /// Set on generated variants; points at the hand-authored recipe they derive from.
    #[serde(default)]
    pub base_recipe_id: Option<String>,
}

impl Recipe {
    /// Identity shared by a recipe and all of its variants.
    pub fn base_id(&self) -> &str {
        self.base_recipe_id.as_deref().unwrap_or(&self.id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn ingredient_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.ingredients.iter().map(Ingredient::key)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }

    Ok(())
}

fn positive_quantity(quantity: f64) -> Result<(), ValidationError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        let mut error = ValidationError::new("quantity");
        error.message = Some(Cow::from("quantity must be a positive number"));
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: "kottbullar".to_owned(),
            name: "Köttbullar".to_owned(),
            ingredients: vec![
                Ingredient::new("Nötfärs", 500.0, "g"),
                Ingredient::new("Lök", 1.0, "st"),
            ],
            prep_time: 40,
            category: Some(RecipeCategory::Protein),
            difficulty: Some(Difficulty::Medium),
            tags: vec!["klassiker".to_owned()],
            image: None,
            nutrition: None,
            base_recipe_id: None,
        }
    }

    #[test]
    fn test_valid_recipe() {
        assert!(recipe().validate().is_ok());
    }

    #[test]
    fn test_name_too_long() {
        let mut r = recipe();
        r.name = "a".repeat(101);
        assert!(r.validate().is_err());

        r.name = "å".repeat(100);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut r = recipe();
        r.id = "  ".to_owned();
        assert!(r.validate().is_err());

        let mut r = recipe();
        r.name = "\t".to_owned();
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let mut r = recipe();
        r.prep_time = 0;
        assert!(r.validate().is_err());

        let mut r = recipe();
        r.ingredients[0].quantity = 0.0;
        assert!(r.validate().is_err());

        let mut r = recipe();
        r.ingredients[1].quantity = f64::NAN;
        assert!(r.validate().is_err());

        let mut r = recipe();
        r.ingredients[0].quantity = -500.0;
        assert!(r.validate().is_err());
        r.ingredients[0].quantity = 0.01;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let mut r = recipe();
        r.ingredients.clear();
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_base_id() {
        let mut r = recipe();
        assert_eq!(r.base_id(), "kottbullar");
        r.base_recipe_id = Some("base".to_owned());
        assert_eq!(r.base_id(), "base");
    }

    #[test]
    fn test_difficulty_harder() {
        assert_eq!(Difficulty::Easy.harder(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.harder(), Difficulty::Hard);
        assert_eq!("MEDIUM".parse::<Difficulty>().ok(), Some(Difficulty::Medium));
    }
}
