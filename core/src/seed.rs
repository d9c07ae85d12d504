//! Seed data files and ingredient-name resolution for bulk imports.

use crate::error::SeedError;
use crate::models::Difficulty;
use crate::sales::{BookType, Genre, BOOK_TEXT_MAX_CHARS, PERSON_NAME_MAX_CHARS};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;

pub const RECIPE_NAME_MAX_CHARS: usize = 120;
pub const INGREDIENT_NAME_MAX_CHARS: usize = 120;
pub const UNIT_MAX_CHARS: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub recipes: Vec<SeedRecipe>,
    /// Alternative spellings mapped to the canonical ingredient name
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    #[serde(default)]
    pub books: Vec<SeedBook>,
    #[serde(default)]
    pub customers: Vec<SeedCustomer>,
    #[serde(default)]
    pub salespersons: Vec<SeedSalesperson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRecipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cook_time_minutes: i64,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<SeedIngredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

/// Genre and type fall back to the table defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedBook {
    pub name: String,
    pub author_name: String,
    pub price: f64,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub book_type: Option<BookType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCustomer {
    pub name: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedSalesperson {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
}

impl SeedFile {
    /// Parse a seed file. Bytes that are not valid UTF-8 are read as
    /// windows-1252, which is how older exports were written.
    pub fn parse(bytes: &[u8]) -> Result<SeedFile, SeedError> {
        let text = match std::str::from_utf8(bytes) {
            Ok(s) => Cow::Borrowed(s),
            Err(_) => {
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                decoded
            }
        };
        let seed: SeedFile = serde_json::from_str(&text)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn validate(&self) -> Result<(), SeedError> {
        for recipe in &self.recipes {
            recipe.validate()?;
        }
        for book in &self.books {
            let invalid = |reason: String| SeedError::InvalidEntry {
                kind: "book",
                name: book.name.clone(),
                reason,
            };
            require_text("name", &book.name, BOOK_TEXT_MAX_CHARS).map_err(invalid)?;
            require_text("author_name", &book.author_name, BOOK_TEXT_MAX_CHARS)
                .map_err(invalid)?;
            if !book.price.is_finite() || book.price < 0.0 {
                return Err(invalid(format!("invalid price {}", book.price)));
            }
        }
        for customer in &self.customers {
            require_text("name", &customer.name, PERSON_NAME_MAX_CHARS).map_err(|reason| {
                SeedError::InvalidEntry {
                    kind: "customer",
                    name: customer.name.clone(),
                    reason,
                }
            })?;
        }
        for person in &self.salespersons {
            let invalid = |reason: String| SeedError::InvalidEntry {
                kind: "salesperson",
                name: person.username.clone(),
                reason,
            };
            require_text("username", &person.username, PERSON_NAME_MAX_CHARS).map_err(invalid)?;
            require_text("name", &person.name, PERSON_NAME_MAX_CHARS).map_err(invalid)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str, max_chars: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is empty", field));
    }
    if value.chars().count() > max_chars {
        return Err(format!("{} is longer than {} characters", field, max_chars));
    }
    Ok(())
}

impl SeedRecipe {
    pub fn validate(&self) -> Result<(), SeedError> {
        let invalid = |reason: String| SeedError::InvalidRecipe {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty".to_string()));
        }
        if self.name.chars().count() > RECIPE_NAME_MAX_CHARS {
            return Err(invalid(format!(
                "name is longer than {} characters",
                RECIPE_NAME_MAX_CHARS
            )));
        }
        if self.cook_time_minutes < 1 {
            return Err(invalid(format!(
                "cook_time_minutes must be at least 1, got {}",
                self.cook_time_minutes
            )));
        }
        if i32::try_from(self.cook_time_minutes).is_err() {
            return Err(invalid("cook_time_minutes is too large".to_string()));
        }
        for item in &self.ingredients {
            if item.name.trim().is_empty() {
                return Err(invalid("ingredient with empty name".to_string()));
            }
            if item.name.chars().count() > INGREDIENT_NAME_MAX_CHARS {
                return Err(invalid(format!("ingredient {:?} name is too long", item.name)));
            }
            if !item.quantity.is_finite() || item.quantity < 0.0 {
                return Err(invalid(format!(
                    "ingredient {:?} has invalid quantity {}",
                    item.name, item.quantity
                )));
            }
            if item.unit.chars().count() > UNIT_MAX_CHARS {
                return Err(invalid(format!(
                    "ingredient {:?} unit is longer than {} characters",
                    item.name, UNIT_MAX_CHARS
                )));
            }
        }
        Ok(())
    }
}

/// Find the existing ingredient a seed name refers to.
///
/// Tries the exact name, then the alias target, then the name with a trailing
/// `s` removed or added. Returns `None` when nothing matches.
pub fn resolve_ingredient_name(
    name: &str,
    aliases: &HashMap<String, String>,
    exists: impl Fn(&str) -> bool,
) -> Option<String> {
    if exists(name) {
        return Some(name.to_string());
    }

    if let Some(target) = aliases.get(name) {
        if exists(target) {
            return Some(target.clone());
        }
    }

    let swapped = match name.strip_suffix('s') {
        Some(singular) => singular.to_string(),
        None => format!("{}s", name),
    };
    exists(&swapped).then_some(swapped)
}
