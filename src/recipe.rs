//! Recipe and user-preference data model.
//!
//! These types mirror what the storage layer persists and what the API layer
//! serializes, so everything derives serde. Times are minutes; an absent time
//! means unknown, never zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single ingredient line as stored with a recipe. Immutable once attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Free-text ingredient name, e.g. "chicken breast".
    pub name: String,
    /// Free-text quantity, unit-agnostic (may be "1/2", "2-3", or empty).
    pub quantity: String,
    /// Free-text unit, e.g. "cup" (may be empty).
    pub unit: String,
    /// Free-text annotation, e.g. "softened".
    #[serde(default)]
    pub additional: String,
    /// Grouping label within the recipe, e.g. "sauce" vs "main".
    #[serde(default = "default_section")]
    pub section: String,
}

fn default_section() -> String {
    "main".to_string()
}

impl Ingredient {
    /// Convenience constructor for an ingredient with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: String::new(),
            unit: String::new(),
            additional: String::new(),
            section: default_section(),
        }
    }
}

/// A recipe with its ingredients grouped by section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Storage-assigned identifier. `None` only for recipes not yet inserted.
    pub id: Option<i64>,
    pub title: String,
    pub url: Option<String>,
    /// Preparation time in minutes, if known.
    pub prep_time: Option<u32>,
    /// Cooking time in minutes, if known.
    pub cook_time: Option<u32>,
    /// Total time in minutes. Unknown unless both prep and cook are known;
    /// see [`Recipe::total_from`].
    pub total_time: Option<u32>,
    pub servings: String,
    /// Section name → ordered ingredient lines. Section order is not
    /// significant to scoring.
    pub ingredients: BTreeMap<String, Vec<Ingredient>>,
}

impl Recipe {
    /// Derive a total time from prep and cook times.
    ///
    /// When either component is unknown the total is unknown; the known one
    /// is never silently promoted to a total.
    pub fn total_from(prep_time: Option<u32>, cook_time: Option<u32>) -> Option<u32> {
        prep_time.zip(cook_time).map(|(p, c)| p + c)
    }

    /// All ingredient names across every section, in section iteration order.
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients
            .values()
            .flatten()
            .map(|ingredient| ingredient.name.as_str())
            .collect()
    }
}

/// What the user has, wants, avoids, and how much time they can spend.
///
/// Every field is optional; an absent field contributes its neutral value to
/// scoring rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Ingredients the user has on hand.
    pub available_ingredients: Option<Vec<String>>,
    /// Maximum acceptable total time, in minutes.
    pub max_time: Option<u32>,
    /// Ingredients the user refuses; a single match hard-filters a recipe.
    pub excluded_ingredients: Option<Vec<String>>,
    /// Ingredients the user particularly likes.
    pub preferred_ingredients: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(Some(10), Some(20), Some(30))]
    #[case(Some(10), None, None)]
    #[case(None, Some(20), None)]
    #[case(None, None, None)]
    fn total_time_requires_both_components(
        #[case] prep: Option<u32>,
        #[case] cook: Option<u32>,
        #[case] expected: Option<u32>,
    ) {
        check!(Recipe::total_from(prep, cook) == expected);
    }

    #[test]
    fn ingredient_names_flatten_all_sections() {
        let mut ingredients = BTreeMap::new();
        ingredients.insert(
            "main".to_string(),
            vec![Ingredient::named("chicken breast"), Ingredient::named("garlic")],
        );
        ingredients.insert("sauce".to_string(), vec![Ingredient::named("soy sauce")]);

        let recipe = Recipe {
            id: Some(1),
            title: "Test".to_string(),
            url: None,
            prep_time: None,
            cook_time: None,
            total_time: None,
            servings: "4".to_string(),
            ingredients,
        };

        let names = recipe.ingredient_names();
        check!(names.len() == 3);
        check!(names.contains(&"chicken breast"));
        check!(names.contains(&"soy sauce"));
    }

    #[test]
    fn ingredient_deserializes_with_defaults() {
        let ingredient: Ingredient =
            serde_json::from_str(r#"{"name": "salt", "quantity": "", "unit": ""}"#).unwrap();
        check!(ingredient.additional.is_empty());
        check!(ingredient.section == "main");
    }

    #[test]
    fn default_preferences_are_all_unset() {
        let preferences = UserPreferences::default();
        check!(preferences.available_ingredients.is_none());
        check!(preferences.max_time.is_none());
        check!(preferences.excluded_ingredients.is_none());
        check!(preferences.preferred_ingredients.is_none());
    }
}
