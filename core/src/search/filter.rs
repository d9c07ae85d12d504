use super::form::SearchCriteria;
use crate::models::{Difficulty, Recipe};

/// A single constraint on a recipe. All matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Recipe name contains the (lowercased) needle
    NameContains(String),
    /// At least one ingredient name contains at least one of the (lowercased) terms
    AnyIngredientContains(Vec<String>),
    MaxCookTime(u32),
    DifficultyIs(Difficulty),
}

impl Predicate {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Predicate::NameContains(needle) => recipe.name.to_lowercase().contains(needle.as_str()),
            Predicate::AnyIngredientContains(terms) => recipe.ingredient_names().any(|name| {
                let name = name.to_lowercase();
                terms.iter().any(|term| name.contains(term.as_str()))
            }),
            Predicate::MaxCookTime(bound) => recipe.cook_time_minutes <= *bound,
            Predicate::DifficultyIs(difficulty) => recipe.difficulty == Some(*difficulty),
        }
    }
}

/// Split a comma-separated ingredient list into trimmed, lowercased, non-empty terms.
pub fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// An immutable conjunction of predicates built from validated criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut predicates = Vec::new();

        if let Some(name) = &criteria.name {
            predicates.push(Predicate::NameContains(name.to_lowercase()));
        }

        if let Some(raw) = &criteria.ingredients {
            let terms = split_terms(raw);
            if !terms.is_empty() {
                predicates.push(Predicate::AnyIngredientContains(terms));
            }
        }

        if let Some(bound) = criteria.max_cook_time {
            predicates.push(Predicate::MaxCookTime(bound));
        }

        if let Some(difficulty) = criteria.difficulty {
            predicates.push(Predicate::DifficultyIs(difficulty));
        }

        Filter { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.predicates.iter().all(|p| p.matches(recipe))
    }

    /// Keep the recipes matching every predicate, ordered by name.
    ///
    /// An empty filter matches nothing.
    pub fn apply(&self, recipes: impl IntoIterator<Item = Recipe>) -> Vec<Recipe> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut matched: Vec<Recipe> = recipes.into_iter().filter(|r| self.matches(r)).collect();
        sort_recipes(&mut matched);
        matched
    }
}

/// Order by name, then id, dropping repeated ids.
pub fn sort_recipes(recipes: &mut Vec<Recipe>) {
    recipes.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    recipes.dedup_by_key(|r| r.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, RecipeIngredient};

    fn recipe(
        id: i32,
        name: &str,
        minutes: u32,
        difficulty: Option<Difficulty>,
        ingredients: &[&str],
    ) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            description: String::new(),
            cook_time_minutes: minutes,
            difficulty,
            created_at: None,
            image: None,
            ingredients: ingredients
                .iter()
                .enumerate()
                .map(|(i, n)| RecipeIngredient {
                    ingredient: Ingredient {
                        id: id * 100 + i as i32,
                        name: n.to_string(),
                    },
                    quantity: 1.0,
                    unit: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_split_terms_drops_blanks() {
        assert_eq!(split_terms(" Tomato, ,cheese ,, "), vec!["tomato", "cheese"]);
        assert!(split_terms(" , ,").is_empty());
    }

    #[test]
    fn test_blank_ingredient_terms_add_no_predicate() {
        let filter = Filter::from_criteria(&SearchCriteria {
            ingredients: Some(" , ".into()),
            ..Default::default()
        });
        assert!(filter.is_empty());
    }

    #[test]
    fn test_empty_filter_matches_nothing() {
        let filter = Filter::default();
        let out = filter.apply(vec![recipe(1, "Toast", 5, None, &["Bread"])]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_ingredient_match_is_deduplicated() {
        let filter = Filter::from_criteria(&SearchCriteria {
            ingredients: Some("egg, bacon".into()),
            ..Default::default()
        });
        let carbonara = recipe(1, "Carbonara", 25, None, &["Eggs", "Bacon", "Egg Yolk"]);
        let out = filter.apply(vec![carbonara.clone(), carbonara]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_ordering_is_by_name_then_id() {
        let filter = Filter::from_criteria(&SearchCriteria {
            max_cook_time: Some(500),
            ..Default::default()
        });
        let out = filter.apply(vec![
            recipe(3, "Soup", 30, None, &[]),
            recipe(2, "Apple Pie", 60, None, &[]),
            recipe(1, "Soup", 40, None, &[]),
        ]);
        let keys: Vec<(&str, i32)> = out.iter().map(|r| (r.name.as_str(), r.id)).collect();
        assert_eq!(keys, vec![("Apple Pie", 2), ("Soup", 1), ("Soup", 3)]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let filter = Filter::from_criteria(&SearchCriteria {
            name: Some("SOUP".into()),
            max_cook_time: Some(35),
            difficulty: Some(Difficulty::Easy),
            ..Default::default()
        });
        assert_eq!(filter.predicates().len(), 3);
        let out = filter.apply(vec![
            recipe(1, "Tomato Soup", 30, Some(Difficulty::Easy), &[]),
            recipe(2, "Onion Soup", 30, Some(Difficulty::Hard), &[]),
            recipe(3, "Pea Soup", 45, Some(Difficulty::Easy), &[]),
            recipe(4, "Salad", 10, Some(Difficulty::Easy), &[]),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Tomato Soup");
    }

    #[test]
    fn test_unset_difficulty_never_matches_difficulty_filter() {
        let p = Predicate::DifficultyIs(Difficulty::Easy);
        assert!(!p.matches(&recipe(1, "Mystery", 10, None, &[])));
    }
}
