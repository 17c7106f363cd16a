//! Template catalog schema and operations

use anyhow::Result;
use rusqlite::Connection;
use thiserror::Error;

use crate::models::{
    Ingredient, IngredientTemplate, RecipeIngredient, RecipeTemplate, ResolvedRecipe,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("recipe '{0}' not found in the catalog")]
    UnknownRecipe(String),
    #[error("ingredient '{0}' not found in the catalog")]
    UnknownIngredient(String),
}

/// Initialize the catalog schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Ingredient templates: figures for a named bottle/juice/syrup
        CREATE TABLE IF NOT EXISTS ingredients (
            name TEXT PRIMARY KEY,
            category TEXT NOT NULL,
            abv REAL NOT NULL,
            density_g_per_l REAL NOT NULL,
            sugar_g_per_l REAL
        );

        -- Recipe templates with suggested dilution and serving size
        CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            dilution_percent REAL,
            serving_size_ml REAL
        );

        -- Ratio lines of a recipe; position preserves pour order
        CREATE TABLE IF NOT EXISTS recipe_ingredients (
            recipe_id INTEGER,
            ingredient_name TEXT,
            ratio REAL NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY (recipe_id, position)
        );

        CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe
            ON recipe_ingredients(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_ingredients_category
            ON ingredients(category);
        "#,
    )?;
    Ok(())
}

/// Clear all template data (for re-seeding)
pub fn clear_templates(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM recipe_ingredients;
        DELETE FROM recipes;
        DELETE FROM ingredients;
        "#,
    )?;
    Ok(())
}

/// Insert or replace an ingredient template
pub fn upsert_ingredient(conn: &Connection, template: &IngredientTemplate) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO ingredients (name, category, abv, density_g_per_l, sugar_g_per_l)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &template.name,
            &template.category,
            template.abv,
            template.density_g_per_l,
            template.sugar_g_per_l,
        ),
    )?;
    Ok(())
}

/// Insert a recipe template, returning its id
pub fn insert_recipe(
    conn: &Connection,
    name: &str,
    dilution_percent: Option<f64>,
    serving_size_ml: Option<f64>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO recipes (name, dilution_percent, serving_size_ml) VALUES (?1, ?2, ?3)",
        (name, dilution_percent, serving_size_ml),
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert one ratio line of a recipe
pub fn insert_recipe_ingredient(
    conn: &Connection,
    line: &RecipeIngredient,
    position: usize,
) -> Result<()> {
    conn.execute(
        "INSERT INTO recipe_ingredients (recipe_id, ingredient_name, ratio, position)
         VALUES (?1, ?2, ?3, ?4)",
        (
            line.recipe_id,
            &line.ingredient_name,
            line.ratio,
            position as i64,
        ),
    )?;
    Ok(())
}

fn row_to_template(row: &rusqlite::Row<'_>) -> rusqlite::Result<IngredientTemplate> {
    Ok(IngredientTemplate {
        name: row.get(0)?,
        category: row.get(1)?,
        abv: row.get(2)?,
        density_g_per_l: row.get(3)?,
        sugar_g_per_l: row.get(4)?,
    })
}

/// List ingredient templates, optionally restricted to one category
pub fn list_ingredients(
    conn: &Connection,
    category: Option<&str>,
) -> Result<Vec<IngredientTemplate>> {
    let mut results = Vec::new();
    match category {
        Some(cat) => {
            let mut stmt = conn.prepare(
                "SELECT name, category, abv, density_g_per_l, sugar_g_per_l
                 FROM ingredients WHERE category = ?1 ORDER BY name",
            )?;
            let rows = stmt.query_map([cat], row_to_template)?;
            for row in rows {
                results.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT name, category, abv, density_g_per_l, sugar_g_per_l
                 FROM ingredients ORDER BY category, name",
            )?;
            let rows = stmt.query_map([], row_to_template)?;
            for row in rows {
                results.push(row?);
            }
        }
    }
    Ok(results)
}

/// Look up a single ingredient template by name
pub fn get_ingredient(conn: &Connection, name: &str) -> Result<Option<IngredientTemplate>> {
    let mut stmt = conn.prepare(
        "SELECT name, category, abv, density_g_per_l, sugar_g_per_l
         FROM ingredients WHERE name = ?1",
    )?;

    let mut rows = stmt.query_map([name], row_to_template)?;

    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// List all recipe templates
pub fn list_recipes(conn: &Connection) -> Result<Vec<RecipeTemplate>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dilution_percent, serving_size_ml FROM recipes ORDER BY name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(RecipeTemplate {
            id: row.get(0)?,
            name: row.get(1)?,
            dilution_percent: row.get(2)?,
            serving_size_ml: row.get(3)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Resolve a recipe template into full `Ingredient` records by looking up
/// each ratio line's figures in the ingredient catalog. The returned list
/// keeps the recipe's pour order.
pub fn resolve_recipe(conn: &Connection, name: &str) -> Result<ResolvedRecipe> {
    let mut stmt = conn.prepare(
        "SELECT id, name, dilution_percent, serving_size_ml FROM recipes WHERE name = ?1",
    )?;
    let mut rows = stmt.query_map([name], |row| {
        Ok(RecipeTemplate {
            id: row.get(0)?,
            name: row.get(1)?,
            dilution_percent: row.get(2)?,
            serving_size_ml: row.get(3)?,
        })
    })?;
    let recipe = match rows.next() {
        Some(row) => row?,
        None => return Err(CatalogError::UnknownRecipe(name.to_string()).into()),
    };

    let mut stmt = conn.prepare(
        "SELECT ingredient_name, ratio FROM recipe_ingredients
         WHERE recipe_id = ?1 ORDER BY position",
    )?;
    let lines = stmt.query_map([recipe.id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
    })?;

    let mut ingredients = Vec::new();
    for line in lines {
        let (ingredient_name, ratio) = line?;
        let template = get_ingredient(conn, &ingredient_name)?
            .ok_or_else(|| CatalogError::UnknownIngredient(ingredient_name.clone()))?;
        ingredients.push(Ingredient {
            id: template.name.to_lowercase().replace(' ', "-"),
            name: template.name,
            ratio,
            abv: template.abv,
            density_g_per_l: template.density_g_per_l,
            sugar_g_per_l: template.sugar_g_per_l,
        });
    }

    Ok(ResolvedRecipe {
        name: recipe.name,
        ingredients,
        dilution_percent: recipe.dilution_percent,
        serving_size_ml: recipe.serving_size_ml,
    })
}
