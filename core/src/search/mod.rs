//! Recipe search: form validation, filtering, and the optional summary chart.

pub mod filter;
pub mod form;

pub use filter::{sort_recipes, split_terms, Filter, Predicate};
pub use form::{SearchCriteria, SearchForm, SearchParams, ValidatedSearch};

use crate::chart::{Chart, ChartRenderer};
use crate::models::Recipe;
use std::convert::Infallible;

/// Read access to every stored recipe, with its ingredients.
pub trait RecipeCatalog {
    type Error;

    fn all_recipes(&mut self) -> Result<Vec<Recipe>, Self::Error>;
}

impl RecipeCatalog for Vec<Recipe> {
    type Error = Infallible;

    fn all_recipes(&mut self) -> Result<Vec<Recipe>, Infallible> {
        Ok(self.clone())
    }
}

/// Everything the search page needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub form: SearchForm,
    /// `None` when no search ran (invalid input or no criteria), as opposed
    /// to a search that matched nothing.
    pub recipes: Option<Vec<Recipe>>,
    pub chart: Option<Chart>,
}

/// Validate `params`, run the search against `catalog`, and chart the rows
/// that will be listed.
///
/// Invalid input never errors; it comes back as field messages in the form.
/// Only a failing catalog produces `Err`.
pub fn run_search<C>(
    params: &SearchParams,
    catalog: &mut C,
    renderer: &ChartRenderer,
) -> Result<SearchOutcome, C::Error>
where
    C: RecipeCatalog + ?Sized,
{
    let (form, validated) = SearchForm::validate(params);

    let recipes = if params.show_all() {
        let mut all = catalog.all_recipes()?;
        sort_recipes(&mut all);
        Some(all)
    } else {
        match &validated {
            Some(v) => {
                let filter = Filter::from_criteria(&v.criteria);
                if filter.is_empty() {
                    None
                } else {
                    Some(filter.apply(catalog.all_recipes()?))
                }
            }
            None => None,
        }
    };

    let chart_kind = validated.as_ref().and_then(|v| v.chart);
    let chart = match (&recipes, chart_kind) {
        (Some(rows), Some(kind)) if !rows.is_empty() => renderer.render(Some(kind), rows),
        _ => None,
    };

    tracing::debug!(
        show_all = params.show_all(),
        valid = form.is_valid(),
        matched = recipes.as_ref().map(Vec::len),
        chart = chart.is_some(),
        "recipe search finished"
    );

    Ok(SearchOutcome {
        form,
        recipes,
        chart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    /// Catalog that counts how often it was read.
    struct CountingCatalog {
        recipes: Vec<Recipe>,
        reads: usize,
    }

    impl RecipeCatalog for CountingCatalog {
        type Error = Infallible;

        fn all_recipes(&mut self) -> Result<Vec<Recipe>, Infallible> {
            self.reads += 1;
            Ok(self.recipes.clone())
        }
    }

    struct BrokenCatalog;

    impl RecipeCatalog for BrokenCatalog {
        type Error = &'static str;

        fn all_recipes(&mut self) -> Result<Vec<Recipe>, &'static str> {
            Err("store unavailable")
        }
    }

    fn recipe(id: i32, name: &str, minutes: u32) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            description: String::new(),
            cook_time_minutes: minutes,
            difficulty: Some(Difficulty::Easy),
            created_at: None,
            image: None,
            ingredients: Vec::new(),
        }
    }

    fn catalog() -> CountingCatalog {
        CountingCatalog {
            recipes: vec![recipe(2, "Toast", 5), recipe(1, "Stew", 90)],
            reads: 0,
        }
    }

    #[test]
    fn test_invalid_form_does_not_touch_catalog() {
        let mut catalog = catalog();
        let params = SearchParams {
            max_cook_time: Some("0".into()),
            ..Default::default()
        };
        let outcome = run_search(&params, &mut catalog, &ChartRenderer::default()).unwrap();
        assert!(outcome.recipes.is_none());
        assert!(outcome.form.errors.contains_key("max_cook_time"));
        assert_eq!(catalog.reads, 0);
    }

    #[test]
    fn test_no_criteria_leaves_result_unset() {
        let mut catalog = catalog();
        let params = SearchParams {
            chart_type: Some("#1".into()),
            ..Default::default()
        };
        let outcome = run_search(&params, &mut catalog, &ChartRenderer::default()).unwrap();
        assert_eq!(outcome.recipes, None);
        assert!(outcome.chart.is_none());
        assert_eq!(catalog.reads, 0);
    }

    #[test]
    fn test_show_all_ignores_criteria() {
        let mut catalog = catalog();
        let params = SearchParams {
            recipe_name: Some("nothing matches this".into()),
            show_all: Some(String::new()),
            ..Default::default()
        };
        let outcome = run_search(&params, &mut catalog, &ChartRenderer::default()).unwrap();
        let names: Vec<String> = outcome.recipes.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Stew", "Toast"]);
    }

    #[test]
    fn test_empty_match_is_some_empty_without_chart() {
        let mut catalog = catalog();
        let params = SearchParams {
            recipe_name: Some("pancake".into()),
            chart_type: Some("#2".into()),
            ..Default::default()
        };
        let outcome = run_search(&params, &mut catalog, &ChartRenderer::default()).unwrap();
        assert_eq!(outcome.recipes, Some(Vec::new()));
        assert!(outcome.chart.is_none());
    }

    #[test]
    fn test_chart_covers_listed_rows() {
        let mut catalog = catalog();
        let params = SearchParams {
            max_cook_time: Some("10".into()),
            chart_type: Some("#2".into()),
            ..Default::default()
        };
        let outcome = run_search(&params, &mut catalog, &ChartRenderer::default()).unwrap();
        assert_eq!(outcome.recipes.as_ref().map(Vec::len), Some(1));
        let chart = outcome.chart.unwrap();
        let total: usize = chart.legend.iter().map(|e| e.value).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_chart_panic_keeps_listing() {
        let mut catalog = catalog();
        let params = SearchParams {
            max_cook_time: Some("100".into()),
            chart_type: Some("#1".into()),
            ..Default::default()
        };
        let outcome = run_search(&params, &mut catalog, &ChartRenderer::panicking()).unwrap();
        assert!(outcome.chart.is_none());
        assert!(outcome.form.is_valid());
        let names: Vec<String> = outcome.recipes.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Stew", "Toast"]);
    }

    #[test]
    fn test_catalog_errors_propagate() {
        let params = SearchParams {
            show_all: Some("true".into()),
            ..Default::default()
        };
        let result = run_search(&params, &mut BrokenCatalog, &ChartRenderer::default());
        assert_eq!(result.unwrap_err(), "store unavailable");
    }
}
