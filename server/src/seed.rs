//! Bulk import of seed files into the catalog.

use crate::bookshop::{create_book, create_customer};
use crate::models::{
    NewBook, NewCustomer, NewIngredient, NewRecipe, NewRecipeIngredient, NewSalesperson,
};
use crate::schema::{books, customers, ingredients, recipe_ingredients, recipes, salespersons};
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use larder_core::seed::SeedRecipe;
use larder_core::{resolve_ingredient_name, SeedFile};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub recipes_created: usize,
    pub recipes_existing: usize,
    pub ingredients_created: usize,
    pub links_written: usize,
    pub books_created: usize,
    pub customers_created: usize,
    pub salespersons_written: usize,
}

/// Write every recipe in `seed` to the catalog in one transaction.
///
/// Recipes are matched by exact name; ingredient names go through
/// [`resolve_ingredient_name`] and are created when nothing resolves.
/// Books match on name and author, customers on name, and salespeople
/// on username, whose name and bio are overwritten.
pub fn import_seed(conn: &mut SqliteConnection, seed: &SeedFile) -> QueryResult<ImportReport> {
    conn.transaction(|conn| {
        let mut report = ImportReport::default();

        let mut known: HashMap<String, i32> = ingredients::table
            .select((ingredients::name, ingredients::id))
            .load::<(String, i32)>(conn)?
            .into_iter()
            .collect();

        for recipe in &seed.recipes {
            let recipe_id = match find_recipe(conn, recipe.name.trim())? {
                Some(id) => {
                    report.recipes_existing += 1;
                    id
                }
                None => {
                    report.recipes_created += 1;
                    insert_recipe(conn, recipe)?
                }
            };

            let mut linked: HashSet<i32> = HashSet::new();
            for item in &recipe.ingredients {
                let name = item.name.trim();
                let resolved =
                    resolve_ingredient_name(name, &seed.aliases, |n| known.contains_key(n));

                let ingredient_id = match resolved.and_then(|n| known.get(&n).copied()) {
                    Some(id) => id,
                    None => {
                        // An aliased spelling is stored under its canonical name
                        let canonical = seed
                            .aliases
                            .get(name)
                            .map(|target| target.trim())
                            .filter(|target| !target.is_empty())
                            .unwrap_or(name);
                        let id = diesel::insert_into(ingredients::table)
                            .values(&NewIngredient { name: canonical })
                            .returning(ingredients::id)
                            .get_result::<i32>(conn)?;
                        tracing::debug!(ingredient = %canonical, id, "created ingredient");
                        known.insert(canonical.to_string(), id);
                        report.ingredients_created += 1;
                        id
                    }
                };

                // Two seed lines that resolve to the same ingredient: last one wins.
                linked.insert(ingredient_id);
                diesel::insert_into(recipe_ingredients::table)
                    .values(&NewRecipeIngredient {
                        recipe_id,
                        ingredient_id,
                        quantity: item.quantity,
                        unit: item.unit.trim(),
                    })
                    .on_conflict((
                        recipe_ingredients::recipe_id,
                        recipe_ingredients::ingredient_id,
                    ))
                    .do_update()
                    .set((
                        recipe_ingredients::quantity.eq(excluded(recipe_ingredients::quantity)),
                        recipe_ingredients::unit.eq(excluded(recipe_ingredients::unit)),
                    ))
                    .execute(conn)?;
            }
            report.links_written += linked.len();
        }

        import_bookshop(conn, seed, &mut report)?;

        tracing::info!(
            recipes_created = report.recipes_created,
            recipes_existing = report.recipes_existing,
            ingredients_created = report.ingredients_created,
            links_written = report.links_written,
            books_created = report.books_created,
            customers_created = report.customers_created,
            salespersons_written = report.salespersons_written,
            "seed import complete"
        );
        Ok(report)
    })
}

fn import_bookshop(
    conn: &mut SqliteConnection,
    seed: &SeedFile,
    report: &mut ImportReport,
) -> QueryResult<()> {
    for book in &seed.books {
        let (name, author_name) = (book.name.trim(), book.author_name.trim());
        let existing = books::table
            .filter(books::name.eq(name))
            .filter(books::author_name.eq(author_name))
            .select(books::id)
            .first::<i32>(conn)
            .optional()?;
        if existing.is_none() {
            create_book(
                conn,
                &NewBook {
                    name,
                    author_name,
                    price: book.price,
                    genre: book.genre.map(|g| g.as_str()),
                    book_type: book.book_type.map(|t| t.as_str()),
                },
            )?;
            report.books_created += 1;
        }
    }

    for customer in &seed.customers {
        let name = customer.name.trim();
        let existing = customers::table
            .filter(customers::name.eq(name))
            .select(customers::id)
            .first::<i32>(conn)
            .optional()?;
        if existing.is_none() {
            create_customer(
                conn,
                &NewCustomer {
                    name,
                    notes: &customer.notes,
                },
            )?;
            report.customers_created += 1;
        }
    }

    for person in &seed.salespersons {
        diesel::insert_into(salespersons::table)
            .values(&NewSalesperson {
                username: person.username.trim(),
                name: person.name.trim(),
                bio: &person.bio,
            })
            .on_conflict(salespersons::username)
            .do_update()
            .set((
                salespersons::name.eq(excluded(salespersons::name)),
                salespersons::bio.eq(excluded(salespersons::bio)),
            ))
            .execute(conn)?;
        report.salespersons_written += 1;
    }
    Ok(())
}

fn find_recipe(conn: &mut SqliteConnection, name: &str) -> QueryResult<Option<i32>> {
    recipes::table
        .filter(recipes::name.eq(name))
        .select(recipes::id)
        .order(recipes::id.asc())
        .first(conn)
        .optional()
}

fn insert_recipe(conn: &mut SqliteConnection, recipe: &SeedRecipe) -> QueryResult<i32> {
    // Seed validation bounds cook time to i32 already
    let cook_time_minutes = i32::try_from(recipe.cook_time_minutes).unwrap_or(i32::MAX);

    diesel::insert_into(recipes::table)
        .values(&NewRecipe {
            name: recipe.name.trim(),
            description: &recipe.description,
            cook_time_minutes,
            difficulty: recipe.difficulty.map(|d| d.as_str()),
            image: recipe.image.as_deref(),
            created_at: Utc::now().naive_utc(),
        })
        .returning(recipes::id)
        .get_result(conn)
}
