//! Loads recipes and their ingredient lines out of SQLite.

use crate::models::{IngredientLineRow, RecipeRow};
use crate::schema::{ingredients, recipe_ingredients, recipes};
use diesel::prelude::*;
use larder_core::{Recipe, RecipeCatalog, RecipeIngredient};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// [`RecipeCatalog`] over a checked-out connection.
pub struct DieselCatalog<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> DieselCatalog<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        DieselCatalog { conn }
    }
}

impl RecipeCatalog for DieselCatalog<'_> {
    type Error = StoreError;

    fn all_recipes(&mut self) -> Result<Vec<Recipe>, StoreError> {
        let rows: Vec<RecipeRow> = recipes::table
            .select(RecipeRow::as_select())
            .order((recipes::name.asc(), recipes::id.asc()))
            .load(self.conn)?;

        let mut lines = load_ingredient_lines(self.conn, None)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let ingredients = lines.remove(&row.id).unwrap_or_default();
                row.into_recipe(ingredients)
            })
            .collect())
    }
}

/// Ingredient lines grouped by recipe id, ordered by ingredient name.
fn load_ingredient_lines(
    conn: &mut SqliteConnection,
    recipe_id: Option<i32>,
) -> QueryResult<HashMap<i32, Vec<RecipeIngredient>>> {
    let mut query = recipe_ingredients::table
        .inner_join(ingredients::table)
        .select((
            recipe_ingredients::recipe_id,
            ingredients::id,
            ingredients::name,
            recipe_ingredients::quantity,
            recipe_ingredients::unit,
        ))
        .order((recipe_ingredients::recipe_id.asc(), ingredients::name.asc()))
        .into_boxed();

    if let Some(id) = recipe_id {
        query = query.filter(recipe_ingredients::recipe_id.eq(id));
    }

    let rows: Vec<IngredientLineRow> = query.load(conn)?;

    let mut grouped: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.recipe_id)
            .or_default()
            .push(row.into_recipe_ingredient());
    }
    Ok(grouped)
}

pub fn load_recipe(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Recipe>> {
    let Some(row) = recipes::table
        .filter(recipes::id.eq(id))
        .select(RecipeRow::as_select())
        .first(conn)
        .optional()?
    else {
        return Ok(None);
    };

    let ingredients = load_ingredient_lines(conn, Some(id))?
        .remove(&id)
        .unwrap_or_default();
    Ok(Some(row.into_recipe(ingredients)))
}

pub fn count_recipes(conn: &mut SqliteConnection) -> QueryResult<i64> {
    recipes::table.count().get_result(conn)
}
