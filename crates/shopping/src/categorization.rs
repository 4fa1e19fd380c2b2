use matplan_shared::text::fold;
use serde::{Deserialize, Serialize};

use crate::ShoppingItem;

pub const FALLBACK_CATEGORY: &str = "Other";

const PRODUCE: &[&str] = &[
    "tomat", "lök", "potatis", "morot", "paprika", "gurka", "sallad", "spenat", "svamp",
    "champinjon", "citron", "lime", "äpple", "banan", "broccoli", "selleri", "dill",
    "persilja", "basilika", "ingefära", "avokado", "zucchini", "vitkål", "rödkål", "grönkål",
    "blomkål", "spetskål", "brysselkål", "kålrot", "rödbet", "ruccola",
];
// No bare "färs" or "kål": "färs" is inside "färsk" and folded "kål" is inside "kalv".
const MEAT_AND_FISH: &[&str] = &[
    "nötfärs", "blandfärs", "viltfärs", "kyckling", "kalkon", "kalv", "kalops", "lamm",
    "fläsk", "bacon", "korv", "skinka", "biff", "kött", "lax", "torsk", "fisk", "räk",
    "tonfisk",
];
// Cheeses are listed by name since a bare "ost" is inside "rostad".
const DAIRY_AND_EGGS: &[&str] = &[
    "mjölk", "grädd", "smör", "riven ost", "hushållsost", "prästost", "västerbotten",
    "fetaost", "getost", "färskost", "cheddar", "halloumi", "mozzarella", "ricotta",
    "mascarpone", "keso", "ägg", "yoghurt", "crème fraiche", "parmesan",
];
const DRY_GOODS: &[&str] = &[
    "pasta", "spagetti", "ris", "mjöl", "socker", "havregryn", "bröd", "lins", "bön",
    "tortilla", "buljong", "nudlar", "nötter", "mandel", "cashew",
];
const SPICES_AND_SAUCES: &[&str] = &[
    "salt", "peppar", "krydd", "kummin", "soja", "olja", "vinäger", "senap", "ketchup",
    "honung", "curry", "oregano", "timjan", "sås",
];
const FROZEN_AND_CANNED: &[&str] = &["fryst", "krossade", "konserv", "burk", "ärtor", "majs"];

/// A named shopping category and the keywords that select it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
        }
    }
}

/// Ordered keyword table used by [`categorize`].
///
/// Keywords are folded (trimmed, lowercased, diacritics removed) once here,
/// so "Lök" in a table matches "purjolok" and "PURJOLÖK" alike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::build(
            vec![
                CategoryRule::new("Produce", PRODUCE),
                CategoryRule::new("Meat & Fish", MEAT_AND_FISH),
                CategoryRule::new("Dairy & Eggs", DAIRY_AND_EGGS),
                CategoryRule::new("Dry Goods", DRY_GOODS),
                CategoryRule::new("Spices & Sauces", SPICES_AND_SAUCES),
                CategoryRule::new("Frozen & Canned", FROZEN_AND_CANNED),
            ],
            FALLBACK_CATEGORY.to_owned(),
        )
    }
}

impl CategoryTable {
    /// Fails when a category name is blank or used twice, fallback included.
    pub fn new(rules: Vec<CategoryRule>, fallback: impl Into<String>) -> matplan_shared::Result<Self> {
        let fallback = fallback.into();
        if fallback.trim().is_empty() {
            matplan_shared::bail!("fallback category name must not be blank");
        }

        for (i, rule) in rules.iter().enumerate() {
            if rule.name.trim().is_empty() {
                matplan_shared::bail!("category #{} has a blank name", i + 1);
            }

            if rule.name == fallback || rules[..i].iter().any(|r| r.name == rule.name) {
                matplan_shared::bail!("category '{}' is declared twice", rule.name);
            }
        }

        Ok(Self::build(rules, fallback))
    }

    fn build(rules: Vec<CategoryRule>, fallback: String) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                name: rule.name,
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| fold(k))
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();

        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// First category with a keyword contained in the folded name, else the fallback.
    pub fn category_of(&self, name: &str) -> &str {
        match self.rule_index(name) {
            Some(index) => &self.rules[index].name,
            None => &self.fallback,
        }
    }

    fn rule_index(&self, name: &str) -> Option<usize> {
        let folded = fold(name);
        if folded.is_empty() {
            return None;
        }

        self.rules
            .iter()
            .position(|rule| rule.keywords.iter().any(|k| folded.contains(k.as_str())))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub items: Vec<ShoppingItem>,
}

/// Non-empty groups in table order, the fallback group last.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategorizedList {
    groups: Vec<CategoryGroup>,
}

impl CategorizedList {
    pub fn get(&self, name: &str) -> Option<&[ShoppingItem]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.items.as_slice())
    }

    /// Number of non-empty categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a CategorizedList {
    type Item = &'a CategoryGroup;
    type IntoIter = std::slice::Iter<'a, CategoryGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Assigns every item to exactly one category, keeping input order inside
/// each group.
pub fn categorize(
    table: &CategoryTable,
    items: impl IntoIterator<Item = ShoppingItem>,
) -> CategorizedList {
    let mut buckets: Vec<Vec<ShoppingItem>> = vec![vec![]; table.rules.len() + 1];

    for item in items {
        let index = table.rule_index(&item.name).unwrap_or(table.rules.len());
        buckets[index].push(item);
    }

    let names = table
        .rules
        .iter()
        .map(|rule| rule.name.as_str())
        .chain(std::iter::once(table.fallback.as_str()));

    let groups = names
        .zip(buckets)
        .filter(|(_, items)| !items.is_empty())
        .map(|(name, items)| CategoryGroup {
            name: name.to_owned(),
            items,
        })
        .collect::<Vec<_>>();

    tracing::debug!(categories = groups.len(), "shopping list categorized");

    CategorizedList { groups }
}
