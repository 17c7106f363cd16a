//! Built-in ingredient and recipe templates

use anyhow::Result;
use rusqlite::Connection;

use crate::db;
use crate::models::{IngredientTemplate, RecipeIngredient};

/// (name, category, abv, density g/L, sugar g/L). Sugar is `None` where no
/// data exists for the ingredient, not a measured zero.
const INGREDIENTS: &[(&str, &str, f64, f64, Option<f64>)] = &[
    // Spirits (40% ABV standard)
    ("Gin", "Spirits", 40.0, 940.0, None),
    ("Vodka", "Spirits", 40.0, 940.0, None),
    ("White Rum", "Spirits", 40.0, 940.0, None),
    ("Dark Rum", "Spirits", 40.0, 940.0, None),
    ("Tequila", "Spirits", 40.0, 940.0, None),
    ("Mezcal", "Spirits", 40.0, 940.0, None),
    ("Whisky", "Spirits", 40.0, 940.0, None),
    ("Whiskey", "Spirits", 45.0, 940.0, None),
    ("Cognac", "Spirits", 40.0, 940.0, None),
    ("Brandy", "Spirits", 40.0, 940.0, None),
    ("Pisco", "Spirits", 40.0, 940.0, None),
    // Liqueurs
    ("Cointreau", "Liqueurs", 40.0, 1040.0, Some(240.0)),
    ("Triple Sec", "Liqueurs", 30.0, 1050.0, Some(250.0)),
    ("Grand Marnier", "Liqueurs", 40.0, 1050.0, Some(230.0)),
    ("Campari", "Liqueurs", 25.0, 1070.0, Some(250.0)),
    ("Aperol", "Liqueurs", 11.0, 1090.0, Some(300.0)),
    ("Green Chartreuse", "Liqueurs", 55.0, 1050.0, Some(250.0)),
    ("Yellow Chartreuse", "Liqueurs", 40.0, 1070.0, Some(300.0)),
    ("Maraschino Liqueur", "Liqueurs", 32.0, 1060.0, Some(280.0)),
    ("Crème de Violette", "Liqueurs", 20.0, 1100.0, Some(350.0)),
    ("Crème de Cacao", "Liqueurs", 25.0, 1100.0, Some(350.0)),
    ("Crème de Cassis", "Liqueurs", 20.0, 1100.0, Some(350.0)),
    ("Amaretto", "Liqueurs", 28.0, 1080.0, Some(320.0)),
    ("Kahlúa", "Liqueurs", 20.0, 1100.0, Some(350.0)),
    ("St-Germain", "Liqueurs", 20.0, 1090.0, Some(320.0)),
    ("Benedictine", "Liqueurs", 40.0, 1070.0, Some(280.0)),
    ("Drambuie", "Liqueurs", 40.0, 1070.0, Some(280.0)),
    ("Fernet-Branca", "Liqueurs", 39.0, 1000.0, Some(100.0)),
    ("Cynar", "Liqueurs", 16.5, 1070.0, Some(250.0)),
    ("Amaro Nonino", "Liqueurs", 35.0, 1050.0, Some(200.0)),
    // Fortified wines
    ("Dry Vermouth", "Fortified Wine", 18.0, 1020.0, Some(40.0)),
    ("Sweet Vermouth", "Fortified Wine", 18.0, 1060.0, Some(150.0)),
    ("Blanc Vermouth", "Fortified Wine", 16.0, 1050.0, Some(130.0)),
    ("Lillet Blanc", "Fortified Wine", 17.0, 1040.0, Some(100.0)),
    ("Fino Sherry", "Fortified Wine", 15.0, 1010.0, Some(10.0)),
    ("Oloroso Sherry", "Fortified Wine", 18.0, 1020.0, Some(50.0)),
    ("Port", "Fortified Wine", 20.0, 1050.0, Some(130.0)),
    // Bitters
    ("Angostura Bitters", "Bitters", 44.7, 950.0, None),
    ("Orange Bitters", "Bitters", 40.0, 950.0, None),
    // Syrups
    ("Simple Syrup (1:1)", "Syrup", 0.0, 1200.0, Some(500.0)),
    ("Rich Simple Syrup (2:1)", "Syrup", 0.0, 1330.0, Some(667.0)),
    ("Demerara Syrup", "Syrup", 0.0, 1200.0, Some(500.0)),
    ("Honey Syrup", "Syrup", 0.0, 1200.0, Some(500.0)),
    ("Agave Syrup", "Syrup", 0.0, 1350.0, Some(680.0)),
    ("Grenadine", "Syrup", 0.0, 1300.0, Some(600.0)),
    ("Orgeat", "Syrup", 0.0, 1250.0, Some(550.0)),
    ("Falernum", "Syrup", 11.0, 1150.0, Some(450.0)),
    // Juices
    ("Lime Juice", "Juice", 0.0, 1020.0, Some(10.0)),
    ("Lemon Juice", "Juice", 0.0, 1020.0, Some(12.0)),
    ("Orange Juice", "Juice", 0.0, 1045.0, Some(85.0)),
    ("Grapefruit Juice", "Juice", 0.0, 1040.0, Some(70.0)),
    ("Pineapple Juice", "Juice", 0.0, 1055.0, Some(100.0)),
    ("Cranberry Juice", "Juice", 0.0, 1045.0, Some(100.0)),
    ("Tomato Juice", "Juice", 0.0, 1020.0, Some(35.0)),
    // Wine & bubbles
    ("Prosecco", "Wine & Bubbles", 11.0, 990.0, Some(15.0)),
    ("Champagne", "Wine & Bubbles", 12.0, 990.0, Some(10.0)),
    ("Dry White Wine", "Wine & Bubbles", 12.0, 990.0, Some(5.0)),
    // Non-alcoholic mixers
    ("Soda Water", "Mixer", 0.0, 1000.0, Some(0.0)),
    ("Tonic Water", "Mixer", 0.0, 1040.0, Some(85.0)),
    ("Ginger Beer", "Mixer", 0.0, 1040.0, Some(100.0)),
    ("Cola", "Mixer", 0.0, 1040.0, Some(105.0)),
    ("Espresso", "Mixer", 0.0, 1000.0, Some(0.0)),
];

struct BuiltinRecipe {
    name: &'static str,
    ingredients: &'static [(&'static str, f64)],
    dilution_percent: Option<f64>,
    serving_size_ml: Option<f64>,
}

const RECIPES: &[BuiltinRecipe] = &[
    BuiltinRecipe {
        name: "Negroni",
        ingredients: &[("Gin", 1.0), ("Campari", 1.0), ("Sweet Vermouth", 1.0)],
        dilution_percent: Some(10.0), // rocks cocktail
        serving_size_ml: Some(120.0),
    },
    BuiltinRecipe {
        name: "Martini",
        ingredients: &[("Gin", 3.0), ("Dry Vermouth", 1.0)],
        dilution_percent: Some(5.0), // stirred, served up
        serving_size_ml: Some(90.0),
    },
    BuiltinRecipe {
        name: "Old Fashioned",
        ingredients: &[
            ("Whiskey", 2.0),
            ("Demerara Syrup", 0.25),
            ("Angostura Bitters", 0.05),
        ],
        dilution_percent: Some(10.0),
        serving_size_ml: Some(90.0),
    },
    BuiltinRecipe {
        name: "Manhattan",
        ingredients: &[
            ("Whiskey", 2.0),
            ("Sweet Vermouth", 1.0),
            ("Angostura Bitters", 0.05),
        ],
        dilution_percent: Some(5.0),
        serving_size_ml: Some(90.0),
    },
];

/// Seed the catalog with the built-in templates, replacing any
/// previously loaded data.
pub fn load_builtin_templates(conn: &Connection) -> Result<()> {
    db::clear_templates(conn)?;

    for &(name, category, abv, density_g_per_l, sugar_g_per_l) in INGREDIENTS {
        db::upsert_ingredient(
            conn,
            &IngredientTemplate {
                name: name.to_string(),
                category: category.to_string(),
                abv,
                density_g_per_l,
                sugar_g_per_l,
            },
        )?;
    }

    for recipe in RECIPES {
        let recipe_id = db::insert_recipe(
            conn,
            recipe.name,
            recipe.dilution_percent,
            recipe.serving_size_ml,
        )?;
        for (position, &(ingredient_name, ratio)) in recipe.ingredients.iter().enumerate() {
            db::insert_recipe_ingredient(
                conn,
                &RecipeIngredient {
                    recipe_id,
                    ingredient_name: ingredient_name.to_string(),
                    ratio,
                },
                position,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_recipe_line_names_a_known_ingredient() {
        for recipe in RECIPES {
            for (name, ratio) in recipe.ingredients {
                assert!(
                    INGREDIENTS.iter().any(|(n, ..)| n == name),
                    "recipe '{}' references unknown ingredient '{}'",
                    recipe.name,
                    name
                );
                assert!(*ratio > 0.0);
            }
        }
    }

    #[test]
    fn loading_twice_does_not_duplicate() {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        load_builtin_templates(&conn).unwrap();
        load_builtin_templates(&conn).unwrap();

        let recipes = db::list_recipes(&conn).unwrap();
        assert_eq!(recipes.len(), RECIPES.len());
        let ingredients = db::list_ingredients(&conn, None).unwrap();
        assert_eq!(ingredients.len(), INGREDIENTS.len());
    }
}
