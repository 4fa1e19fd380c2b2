use std::collections::HashSet;

use matplan_shared::text::normalize_key;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::{AggregatedIngredient, CategorizedList, CategoryTable, categorize};

const INGREDIENT_PREFIX: &str = "ingredient:";

/// A free-form line the user typed in, not derived from any recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomItem {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub is_custom: bool,
    pub checked: bool,
}

impl ShoppingItem {
    pub fn ingredient_id(name: &str) -> String {
        format!("{INGREDIENT_PREFIX}{}", normalize_key(name))
    }
}

impl From<&AggregatedIngredient> for ShoppingItem {
    fn from(value: &AggregatedIngredient) -> Self {
        Self {
            id: Self::ingredient_id(&value.name),
            name: value.name.clone(),
            quantity: Some(value.total_quantity),
            unit: Some(value.unit.clone()),
            is_custom: false,
            checked: false,
        }
    }
}

impl From<&CustomItem> for ShoppingItem {
    fn from(value: &CustomItem) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            quantity: None,
            unit: None,
            is_custom: true,
            checked: false,
        }
    }
}

/// Aggregated lines first, then custom items, all unchecked.
pub fn shopping_items(aggregated: &[AggregatedIngredient], custom: &[CustomItem]) -> Vec<ShoppingItem> {
    aggregated
        .iter()
        .map(ShoppingItem::from)
        .chain(custom.iter().map(ShoppingItem::from))
        .collect()
}

/// Session state of the shopping view: custom lines and check marks.
///
/// Check marks are keyed by item id, so a recipe-derived line stays checked
/// while the plan changes as long as its ingredient remains.
#[derive(Clone, Debug, Default)]
pub struct ShoppingList {
    custom: Vec<CustomItem>,
    checked: HashSet<String>,
}

impl ShoppingList {
    pub fn custom_items(&self) -> &[CustomItem] {
        &self.custom
    }

    pub fn add_custom(&mut self, name: &str) -> matplan_shared::Result<String> {
        let name = name.trim();
        if name.is_empty() {
            matplan_shared::bail!("custom item name must not be blank");
        }

        let id = Ulid::new().to_string();
        self.custom.push(CustomItem {
            id: id.clone(),
            name: name.to_owned(),
        });

        tracing::debug!(%id, name, "custom item added");

        Ok(id)
    }

    /// Returns false when no custom item has that id.
    pub fn remove_custom(&mut self, id: &str) -> bool {
        let Some(position) = self.custom.iter().position(|item| item.id == id) else {
            return false;
        };

        self.custom.remove(position);
        self.checked.remove(id);

        true
    }

    /// Flips the check mark and returns the new state.
    pub fn toggle_checked(&mut self, id: &str) -> bool {
        if self.checked.remove(id) {
            return false;
        }

        self.checked.insert(id.to_owned());

        true
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    pub fn build(&self, table: &CategoryTable, aggregated: &[AggregatedIngredient]) -> CategorizedList {
        let items = shopping_items(aggregated, &self.custom)
            .into_iter()
            .map(|mut item| {
                item.checked = self.checked.contains(&item.id);
                item
            });

        categorize(table, items)
    }
}
