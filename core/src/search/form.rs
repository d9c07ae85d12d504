//! Validation of raw search form input.
//!
//! Every field is optional. A field that fails validation is reported in
//! [`SearchForm::errors`] and the whole submission is treated as invalid.

use crate::chart::ChartKind;
use crate::models::Difficulty;
use std::collections::BTreeMap;
use std::num::IntErrorKind;

pub const RECIPE_NAME_MAX_CHARS: usize = 120;
pub const INGREDIENTS_MAX_CHARS: usize = 300;
pub const MIN_COOK_TIME: i64 = 1;
pub const MAX_COOK_TIME: i64 = 500;

/// Raw, unvalidated search parameters as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub recipe_name: Option<String>,
    pub ingredients: Option<String>,
    pub max_cook_time: Option<String>,
    pub difficulty: Option<String>,
    pub chart_type: Option<String>,
    /// Presence alone matters; the value is ignored.
    pub show_all: Option<String>,
}

impl SearchParams {
    pub fn show_all(&self) -> bool {
        self.show_all.is_some()
    }
}

/// Validated filter values. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub ingredients: Option<String>,
    pub max_cook_time: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSearch {
    pub criteria: SearchCriteria,
    pub chart: Option<ChartKind>,
}

/// The submitted values echoed back, with any field-level error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub recipe_name: String,
    pub ingredients: String,
    pub max_cook_time: String,
    pub difficulty: String,
    pub chart_type: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl SearchForm {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn add_error(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }

    /// Validate raw parameters. The echoed form is always returned; the
    /// validated values only when no field has an error.
    pub fn validate(params: &SearchParams) -> (SearchForm, Option<ValidatedSearch>) {
        let echo = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut form = SearchForm {
            recipe_name: echo(&params.recipe_name),
            ingredients: echo(&params.ingredients),
            max_cook_time: echo(&params.max_cook_time),
            difficulty: echo(&params.difficulty),
            chart_type: echo(&params.chart_type),
            errors: BTreeMap::new(),
        };

        let name = match clean_text(&params.recipe_name, RECIPE_NAME_MAX_CHARS) {
            Ok(v) => v,
            Err(msg) => {
                form.add_error("recipe_name", msg);
                None
            }
        };

        let ingredients = match clean_text(&params.ingredients, INGREDIENTS_MAX_CHARS) {
            Ok(v) => v,
            Err(msg) => {
                form.add_error("ingredients", msg);
                None
            }
        };

        let max_cook_time = match clean_cook_time(&params.max_cook_time) {
            Ok(v) => v,
            Err(msg) => {
                form.add_error("max_cook_time", msg);
                None
            }
        };

        let difficulty = match clean_choice(&params.difficulty, |s| s.parse::<Difficulty>().ok()) {
            Ok(v) => v,
            Err(msg) => {
                form.add_error("difficulty", msg);
                None
            }
        };

        let chart = match clean_choice(&params.chart_type, ChartKind::from_code) {
            Ok(v) => v,
            Err(msg) => {
                form.add_error("chart_type", msg);
                None
            }
        };

        if !form.is_valid() {
            return (form, None);
        }

        let validated = ValidatedSearch {
            criteria: SearchCriteria {
                name,
                ingredients,
                max_cook_time,
                difficulty,
            },
            chart,
        };
        (form, Some(validated))
    }
}

fn clean_text(raw: &Option<String>, max_chars: usize) -> Result<Option<String>, String> {
    let Some(value) = raw.as_deref().map(str::trim) else {
        return Ok(None);
    };
    let len = value.chars().count();
    if len > max_chars {
        return Err(format!(
            "Ensure this value has at most {} characters (it has {}).",
            max_chars, len
        ));
    }
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn clean_cook_time(raw: &Option<String>) -> Result<Option<u32>, String> {
    let value = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(None),
        Some(v) => v,
    };
    // "30.0" and "30." are whole numbers too
    let digits = match value.split_once('.') {
        Some((whole, fraction)) if fraction.trim_end().chars().all(|c| c == '0') => whole,
        _ => value,
    };
    let minutes: i64 = match digits.parse() {
        Ok(m) => m,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return Err("Enter a whole number.".to_string()),
        },
    };
    if minutes < MIN_COOK_TIME {
        return Err(format!(
            "Ensure this value is greater than or equal to {}.",
            MIN_COOK_TIME
        ));
    }
    if minutes > MAX_COOK_TIME {
        return Err(format!(
            "Ensure this value is less than or equal to {}.",
            MAX_COOK_TIME
        ));
    }
    // Bounds checked above
    Ok(Some(minutes as u32))
}

fn clean_choice<T>(
    raw: &Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some).ok_or_else(|| {
            format!(
                "Select a valid choice. {} is not one of the available choices.",
                value
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SearchParams {
        SearchParams::default()
    }

    #[test]
    fn test_empty_form_is_valid() {
        let (form, validated) = SearchForm::validate(&params());
        assert!(form.is_valid());
        assert_eq!(validated.unwrap().criteria, SearchCriteria::default());
    }

    #[test]
    fn test_partial_data_is_valid() {
        let (_, v) = SearchForm::validate(&SearchParams {
            recipe_name: Some("pasta".into()),
            ..params()
        });
        assert_eq!(v.unwrap().criteria.name.as_deref(), Some("pasta"));

        let (_, v) = SearchForm::validate(&SearchParams {
            max_cook_time: Some("60".into()),
            ..params()
        });
        assert_eq!(v.unwrap().criteria.max_cook_time, Some(60));

        let (_, v) = SearchForm::validate(&SearchParams {
            difficulty: Some("Easy".into()),
            ..params()
        });
        assert_eq!(v.unwrap().criteria.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn test_max_cook_time_bounds() {
        for bad in ["0", "501", "-3"] {
            let (form, v) = SearchForm::validate(&SearchParams {
                max_cook_time: Some(bad.into()),
                ..params()
            });
            assert!(v.is_none(), "{} should be rejected", bad);
            assert!(form.errors.contains_key("max_cook_time"));
        }

        for good in ["1", "30", "500", " 45 "] {
            let (_, v) = SearchForm::validate(&SearchParams {
                max_cook_time: Some(good.into()),
                ..params()
            });
            assert!(v.is_some(), "{} should be accepted", good);
        }
    }

    #[test]
    fn test_max_cook_time_non_integer() {
        let (form, v) = SearchForm::validate(&SearchParams {
            max_cook_time: Some("thirty".into()),
            ..params()
        });
        assert!(v.is_none());
        assert_eq!(
            form.errors["max_cook_time"],
            vec!["Enter a whole number.".to_string()]
        );
        // The raw value is echoed back for re-display
        assert_eq!(form.max_cook_time, "thirty");
    }

    #[test]
    fn test_max_cook_time_zero_fraction_is_whole() {
        for raw in ["30.0", "30.", "30.000"] {
            let (form, v) = SearchForm::validate(&SearchParams {
                max_cook_time: Some(raw.into()),
                ..params()
            });
            assert!(form.is_valid(), "{} should be accepted", raw);
            assert_eq!(v.unwrap().criteria.max_cook_time, Some(30));
        }

        for raw in ["30.5", ".", "3.0.0"] {
            let (form, _) = SearchForm::validate(&SearchParams {
                max_cook_time: Some(raw.into()),
                ..params()
            });
            assert_eq!(
                form.errors["max_cook_time"],
                vec!["Enter a whole number.".to_string()],
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_max_cook_time_overflow_is_out_of_range() {
        let (form, _) = SearchForm::validate(&SearchParams {
            max_cook_time: Some("99999999999999999999999".into()),
            ..params()
        });
        assert_eq!(
            form.errors["max_cook_time"],
            vec!["Ensure this value is less than or equal to 500.".to_string()]
        );

        let (form, _) = SearchForm::validate(&SearchParams {
            max_cook_time: Some("-99999999999999999999999".into()),
            ..params()
        });
        assert_eq!(
            form.errors["max_cook_time"],
            vec!["Ensure this value is greater than or equal to 1.".to_string()]
        );
    }

    #[test]
    fn test_unknown_choices_rejected() {
        let (form, v) = SearchForm::validate(&SearchParams {
            difficulty: Some("Extreme".into()),
            chart_type: Some("#9".into()),
            ..params()
        });
        assert!(v.is_none());
        assert!(form.errors.contains_key("difficulty"));
        assert!(form.errors.contains_key("chart_type"));
    }

    #[test]
    fn test_text_length_caps() {
        let (form, v) = SearchForm::validate(&SearchParams {
            recipe_name: Some("x".repeat(121)),
            ingredients: Some("y".repeat(301)),
            ..params()
        });
        assert!(v.is_none());
        assert!(form.errors.contains_key("recipe_name"));
        assert!(form.errors.contains_key("ingredients"));

        let (_, v) = SearchForm::validate(&SearchParams {
            recipe_name: Some("x".repeat(120)),
            ingredients: Some("y".repeat(300)),
            ..params()
        });
        assert!(v.is_some());
    }

    #[test]
    fn test_whitespace_only_text_is_absent() {
        let (_, v) = SearchForm::validate(&SearchParams {
            recipe_name: Some("   ".into()),
            ..params()
        });
        assert_eq!(v.unwrap().criteria.name, None);
    }

    #[test]
    fn test_chart_choice_parsed() {
        let (_, v) = SearchForm::validate(&SearchParams {
            chart_type: Some("#2".into()),
            ..params()
        });
        assert_eq!(v.unwrap().chart, Some(ChartKind::TimeBuckets));
    }
}
