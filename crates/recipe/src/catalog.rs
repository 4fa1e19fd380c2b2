use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use matplan_shared::recipe::{Difficulty, Ingredient, Nutrition, Recipe, RecipeCategory};
use matplan_shared::text::{capitalize, collate, normalize_key};
use validator::Validate;

use crate::RecipeFilter;

/// Read-only recipe catalog, built once at startup and shared by reference.
#[derive(Clone, Debug)]
pub struct Catalog {
    recipes: Arc<[Arc<Recipe>]>,
}

impl Catalog {
    /// Builds a catalog from already assembled recipes.
    ///
    /// Fails when the list is empty, when two recipes share an id or when
    /// any recipe is malformed.
    pub fn new(recipes: Vec<Recipe>) -> matplan_shared::Result<Self> {
        if recipes.is_empty() {
            matplan_shared::bail!("catalog must contain at least one recipe");
        }

        let mut ids = HashSet::new();
        for recipe in &recipes {
            recipe.validate()?;

            if !ids.insert(recipe.id.as_str()) {
                matplan_shared::bail!("duplicate recipe id '{}'", recipe.id);
            }
        }

        Ok(Self {
            recipes: recipes.into_iter().map(Arc::new).collect(),
        })
    }

    /// Hand-authored base set expanded with quick and festive variants until
    /// `target_size` recipes exist.
    pub fn generate(target_size: usize) -> matplan_shared::Result<Self> {
        let base = base_recipes();
        let mut recipes: Vec<Recipe> = base.iter().take(target_size).cloned().collect();

        let mut round = 1;
        while recipes.len() < target_size {
            for kind in [VariantKind::Quick, VariantKind::Festive] {
                for recipe in &base {
                    if recipes.len() == target_size {
                        break;
                    }

                    recipes.push(kind.derive(recipe, round));
                }
            }

            round += 1;
        }

        tracing::debug!(
            base = base.len(),
            total = recipes.len(),
            "recipe catalog generated"
        );

        Self::new(recipes)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Recipe>> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Recipe>> {
        self.recipes.iter()
    }

    pub fn recipes(&self) -> &[Arc<Recipe>] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes matching `filter`, in catalog order.
    pub fn search(&self, filter: &RecipeFilter) -> Vec<Arc<Recipe>> {
        self.recipes
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Every distinct ingredient name in the catalog in Swedish alphabetical
    /// order, for ingredient pickers.
    pub fn ingredient_names(&self) -> Vec<String> {
        let names: BTreeMap<String, String> = self
            .recipes
            .iter()
            .flat_map(|r| r.ingredients.iter())
            .map(|i| {
                let key = normalize_key(&i.name);
                let display = capitalize(&key);
                (key, display)
            })
            .filter(|(key, _)| !key.is_empty())
            .collect();

        let mut names: Vec<String> = names.into_values().collect();
        names.sort_by(|a, b| collate(a, b));
        names
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VariantKind {
    Quick,
    Festive,
}

impl VariantKind {
    fn marker(self) -> &'static str {
        match self {
            VariantKind::Quick => "snabb",
            VariantKind::Festive => "fest",
        }
    }

    fn derive(self, base: &Recipe, round: usize) -> Recipe {
        let marker = self.marker();
        let (id, name) = if round == 1 {
            (
                format!("{}-{marker}", base.id),
                format!("{} ({marker})", base.name),
            )
        } else {
            (
                format!("{}-{marker}-{round}", base.id),
                format!("{} ({marker} {round})", base.name),
            )
        };

        let (prep_time, difficulty) = match self {
            VariantKind::Quick => ((base.prep_time * 2 / 3).max(1), Difficulty::Easy),
            VariantKind::Festive => (
                base.prep_time + 20,
                base.difficulty.unwrap_or_default().harder(),
            ),
        };

        let mut tags = base.tags.clone();
        if !base.has_tag(marker) {
            tags.push(marker.to_owned());
        }

        Recipe {
            id,
            name,
            prep_time,
            difficulty: Some(difficulty),
            tags,
            base_recipe_id: Some(base.base_id().to_owned()),
            ..base.clone()
        }
    }
}

fn ingredients(items: &[(&str, f64, &str)]) -> Vec<Ingredient> {
    items
        .iter()
        .map(|(name, quantity, unit)| Ingredient::new(*name, *quantity, *unit))
        .collect()
}

fn base(
    id: &str,
    name: &str,
    prep_time: u32,
    category: RecipeCategory,
    difficulty: Difficulty,
    tags: &[&str],
    items: &[(&str, f64, &str)],
) -> Recipe {
    Recipe {
        id: id.to_owned(),
        name: name.to_owned(),
        ingredients: ingredients(items),
        prep_time,
        category: Some(category),
        difficulty: Some(difficulty),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        image: Some(format!("/images/recipes/{id}.webp")),
        nutrition: None,
        base_recipe_id: None,
    }
}

/// The hand-authored recipes every generated catalog starts from.
pub fn base_recipes() -> Vec<Recipe> {
    use Difficulty::*;
    use RecipeCategory::*;

    let mut recipes = vec![
        base(
            "kottbullar",
            "Köttbullar med potatismos",
            45,
            Protein,
            Medium,
            &["klassiker", "barnvänlig"],
            &[
                ("Nötfärs", 500.0, "g"),
                ("Lök", 1.0, "st"),
                ("Ägg", 1.0, "st"),
                ("Ströbröd", 0.5, "dl"),
                ("Mjölk", 1.0, "dl"),
                ("Potatis", 800.0, "g"),
                ("Smör", 25.0, "g"),
                ("Salt", 1.0, "tsk"),
            ],
        ),
        base(
            "pasta-bolognese",
            "Pasta bolognese",
            35,
            Carbs,
            Easy,
            &["klassiker", "barnvänlig"],
            &[
                ("Nötfärs", 400.0, "g"),
                ("Lök", 1.0, "st"),
                ("Vitlök", 2.0, "klyftor"),
                ("Krossade tomater", 400.0, "g"),
                ("Morot", 1.0, "st"),
                ("Pasta", 400.0, "g"),
                ("Olivolja", 2.0, "msk"),
            ],
        ),
        base(
            "ugnsbakad-lax",
            "Ugnsbakad lax med citron",
            30,
            Protein,
            Easy,
            &["fisk"],
            &[
                ("Laxfilé", 500.0, "g"),
                ("Citron", 1.0, "st"),
                ("Dill", 1.0, "kruka"),
                ("Potatis", 800.0, "g"),
                ("Smör", 30.0, "g"),
                ("Salt", 1.0, "tsk"),
            ],
        ),
        base(
            "kycklinggryta",
            "Krämig kycklinggryta",
            40,
            Protein,
            Medium,
            &["gryta"],
            &[
                ("Kycklingfilé", 600.0, "g"),
                ("Grädde", 2.0, "dl"),
                ("Lök", 1.0, "st"),
                ("Paprika", 1.0, "st"),
                ("Ris", 4.0, "dl"),
                ("Buljong", 1.0, "tärning"),
                ("Vitlök", 2.0, "klyftor"),
            ],
        ),
        base(
            "pannkakor",
            "Pannkakor",
            25,
            Dairy,
            Easy,
            &["vegetarisk", "barnvänlig"],
            &[
                ("Vetemjöl", 2.5, "dl"),
                ("Mjölk", 6.0, "dl"),
                ("Ägg", 3.0, "st"),
                ("Smör", 30.0, "g"),
                ("Salt", 0.5, "tsk"),
            ],
        ),
        base(
            "rod-linssoppa",
            "Röd linssoppa",
            30,
            Vegetables,
            Easy,
            &["vegetarisk", "soppa"],
            &[
                ("Röda linser", 3.0, "dl"),
                ("Lök", 1.0, "st"),
                ("Morot", 2.0, "st"),
                ("Krossade tomater", 400.0, "g"),
                ("Vitlök", 2.0, "klyftor"),
                ("Buljong", 1.0, "tärning"),
                ("Spiskummin", 1.0, "tsk"),
            ],
        ),
        base(
            "potatisgratang",
            "Potatisgratäng",
            60,
            Carbs,
            Medium,
            &["vegetarisk"],
            &[
                ("Potatis", 1000.0, "g"),
                ("Grädde", 3.0, "dl"),
                ("Mjölk", 2.0, "dl"),
                ("Vitlök", 2.0, "klyftor"),
                ("Riven ost", 150.0, "g"),
                ("Salt", 1.0, "tsk"),
            ],
        ),
        base(
            "pytt-i-panna",
            "Pytt i panna",
            30,
            Carbs,
            Easy,
            &["klassiker"],
            &[
                ("Potatis", 800.0, "g"),
                ("Lök", 1.0, "st"),
                ("Falukorv", 400.0, "g"),
                ("Ägg", 4.0, "st"),
                ("Rödbetor", 1.0, "burk"),
                ("Smör", 20.0, "g"),
            ],
        ),
        base(
            "fiskgratang",
            "Fiskgratäng med dill",
            45,
            Protein,
            Medium,
            &["fisk"],
            &[
                ("Torskfilé", 600.0, "g"),
                ("Grädde", 2.0, "dl"),
                ("Purjolök", 1.0, "st"),
                ("Dill", 1.0, "kruka"),
                ("Potatis", 800.0, "g"),
                ("Citron", 1.0, "st"),
            ],
        ),
        base(
            "spenatsoppa",
            "Spenatsoppa med ägg",
            25,
            Vegetables,
            Easy,
            &["vegetarisk", "soppa"],
            &[
                ("Spenat", 300.0, "g"),
                ("Lök", 1.0, "st"),
                ("Buljong", 1.0, "tärning"),
                ("Mjölk", 3.0, "dl"),
                ("Ägg", 4.0, "st"),
                ("Smör", 20.0, "g"),
            ],
        ),
        base(
            "tacos",
            "Tacos",
            30,
            Protein,
            Easy,
            &["barnvänlig", "fredag"],
            &[
                ("Nötfärs", 500.0, "g"),
                ("Tacokrydda", 1.0, "påse"),
                ("Tortillabröd", 8.0, "st"),
                ("Tomat", 2.0, "st"),
                ("Gurka", 1.0, "st"),
                ("Riven ost", 150.0, "g"),
                ("Gräddfil", 2.0, "dl"),
            ],
        ),
        base(
            "svamprisotto",
            "Svamprisotto",
            50,
            Carbs,
            Hard,
            &["vegetarisk"],
            &[
                ("Arborioris", 3.0, "dl"),
                ("Champinjoner", 250.0, "g"),
                ("Lök", 1.0, "st"),
                ("Vitlök", 1.0, "klyfta"),
                ("Buljong", 1.0, "tärning"),
                ("Parmesan", 50.0, "g"),
                ("Smör", 30.0, "g"),
            ],
        ),
    ];

    recipes[0].nutrition = Some(Nutrition {
        calories: Some(620),
        protein: Some(32.0),
        carbs: Some(48.0),
        fat: Some(30.0),
    });
    recipes[2].nutrition = Some(Nutrition {
        calories: Some(540),
        protein: Some(34.0),
        carbs: Some(40.0),
        fat: Some(26.0),
    });

    recipes
}
