//! Batch Cocktail Calculator
//!
//! Scales cocktail recipes up to batches: per-ingredient volumes and
//! weights, dilution water, final ABV and sugar, and per-serving breakdowns.

mod calculator;
mod db;
mod models;
mod serving;
mod templates;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::models::BatchConfig;

#[derive(Parser)]
#[command(name = "batch-calculator")]
#[command(about = "Batch cocktail calculator with dilution and per-serving breakdowns")]
struct Cli {
    /// Path to the SQLite template catalog
    #[arg(short, long, default_value = "batch_templates.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize an empty template catalog
    Init,

    /// Load the built-in ingredient and recipe templates
    LoadTemplates,

    /// List ingredient templates
    ListIngredients {
        /// Restrict to one category (e.g., "Spirits", "Syrup")
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List recipe templates
    ListRecipes,

    /// Show details for a single ingredient template
    Ingredient {
        /// Template name (e.g., "Gin")
        name: String,
    },

    /// Calculate a batch for a recipe template
    Calc {
        /// Recipe name (e.g., "Negroni", "Martini")
        recipe: String,

        /// Target batch size in mL
        #[arg(short, long, default_value = "750.0")]
        batch_size: f64,

        /// Dilution in parts of water per 100 parts of base mixture;
        /// defaults to the recipe's suggestion
        #[arg(short, long)]
        dilution: Option<f64>,

        /// Show the per-ingredient table
        #[arg(short, long)]
        verbose: bool,
    },

    /// Calculate a batch and break it down per serving
    Serve {
        /// Recipe name (e.g., "Negroni", "Martini")
        recipe: String,

        /// Target batch size in mL
        #[arg(short, long, default_value = "750.0")]
        batch_size: f64,

        /// Base serving volume in mL; defaults to the recipe's suggestion
        /// or a 3-unit pour
        #[arg(short, long)]
        serving_volume: Option<f64>,

        /// Melt from stirring/shaking at serve time, percent of the base pour
        #[arg(short, long, default_value = "0.0")]
        prep_dilution: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let conn = Connection::open(&cli.database)?;
    db::init_schema(&conn)?;

    match cli.command {
        Commands::Init => {
            println!("Catalog initialized at: {}", cli.database.display());
        }

        Commands::LoadTemplates => {
            templates::load_builtin_templates(&conn)?;
            let ingredients = db::list_ingredients(&conn, None)?;
            let recipes = db::list_recipes(&conn)?;
            println!(
                "Loaded {} ingredient templates and {} recipes",
                ingredients.len(),
                recipes.len()
            );
        }

        Commands::ListIngredients { category } => {
            let ingredients = db::list_ingredients(&conn, category.as_deref())?;
            if ingredients.is_empty() {
                println!("No ingredient templates found. Run 'load-templates' first.");
            } else {
                println!(
                    "{:<28} {:<16} {:>8} {:>12} {:>12}",
                    "Ingredient", "Category", "ABV (%)", "Dens. (g/L)", "Sugar (g/L)"
                );
                println!("{}", "-".repeat(80));
                for t in ingredients {
                    let sugar = match t.sugar_g_per_l {
                        Some(g) => format!("{:.0}", g),
                        None => "-".to_string(),
                    };
                    println!(
                        "{:<28} {:<16} {:>8.1} {:>12.0} {:>12}",
                        t.name, t.category, t.abv, t.density_g_per_l, sugar
                    );
                }
            }
        }

        Commands::ListRecipes => {
            let recipes = db::list_recipes(&conn)?;
            if recipes.is_empty() {
                println!("No recipe templates found. Run 'load-templates' first.");
            } else {
                println!(
                    "{:<20} {:>14} {:>14}",
                    "Recipe", "Dilution (%)", "Serving (mL)"
                );
                println!("{}", "-".repeat(50));
                for r in recipes {
                    let dilution = r
                        .dilution_percent
                        .map_or("-".to_string(), |d| format!("{:.0}", d));
                    let serving = r
                        .serving_size_ml
                        .map_or("-".to_string(), |s| format!("{:.0}", s));
                    println!("{:<20} {:>14} {:>14}", r.name, dilution, serving);
                }
            }
        }

        Commands::Ingredient { name } => {
            match db::get_ingredient(&conn, &name)? {
                Some(t) => {
                    println!("Ingredient: {}", t.name);
                    println!("  Category: {}", t.category);
                    println!("  ABV:      {}%", t.abv);
                    println!("  Density:  {} g/L", t.density_g_per_l);
                    match t.sugar_g_per_l {
                        Some(g) => println!("  Sugar:    {} g/L", g),
                        None => println!("  Sugar:    no data"),
                    }
                }
                None => println!("Ingredient '{}' not found", name),
            }
        }

        Commands::Calc {
            recipe,
            batch_size,
            dilution,
            verbose,
        } => {
            let resolved = db::resolve_recipe(&conn, &recipe)?;
            let config = BatchConfig {
                batch_size_ml: batch_size,
                dilution_percent: dilution.or(resolved.dilution_percent).unwrap_or(0.0),
            };
            let result = calculator::calculate_batch(&resolved.ingredients, &config);

            if verbose {
                println!("{}", calculator::format_batch_table(&result));
            }
            println!("{}", calculator::summarize_batch(&resolved.name, &result));
        }

        Commands::Serve {
            recipe,
            batch_size,
            serving_volume,
            prep_dilution,
        } => {
            let resolved = db::resolve_recipe(&conn, &recipe)?;
            let config = BatchConfig {
                batch_size_ml: batch_size,
                dilution_percent: resolved.dilution_percent.unwrap_or(0.0),
            };
            let result = calculator::calculate_batch(&resolved.ingredients, &config);

            let base_volume = serving_volume
                .or(resolved.serving_size_ml)
                .unwrap_or_else(|| serving::default_serving_volume_ml(result.final_abv));
            let breakdown = serving::project_serving(&result, base_volume, prep_dilution);

            println!("{}", calculator::summarize_batch(&resolved.name, &result));
            println!("{}", serving::format_serving_breakdown(&breakdown));

            if !breakdown.lines.is_empty() {
                let pour: Vec<String> = breakdown
                    .lines
                    .iter()
                    .map(|line| format!("{} {} oz", line.name, format_oz_fraction(line.volume_oz)))
                    .collect();
                println!("Pour: {}", pour.join(", "));
            }
        }
    }

    Ok(())
}

/// Format an ounce figure as a bartender's fraction, to the nearest
/// quarter ounce: 0.75 -> "¾", 3.5 -> "3 ½", 3.0 -> "3".
fn format_oz_fraction(oz: f64) -> String {
    let rounded = (oz / 0.25).round() * 0.25;
    let whole = rounded.floor();
    let fraction = match ((rounded - whole) * 100.0).round() as u32 {
        25 => "¼",
        50 => "½",
        75 => "¾",
        _ => "",
    };

    if rounded == 0.0 {
        return "0".to_string();
    }
    if fraction.is_empty() {
        return format!("{}", whole as i64);
    }
    if whole == 0.0 {
        return fraction.to_string();
    }
    format!("{} {}", whole as i64, fraction)
}

#[cfg(test)]
mod tests {
    use super::format_oz_fraction;

    #[test]
    fn quarter_ounce_fractions() {
        assert_eq!(format_oz_fraction(0.0), "0");
        assert_eq!(format_oz_fraction(0.75), "¾");
        assert_eq!(format_oz_fraction(3.0), "3");
        assert_eq!(format_oz_fraction(3.5), "3 ½");
        assert_eq!(format_oz_fraction(3.02), "3");
        assert_eq!(format_oz_fraction(1.13), "1 ¼");
    }
}
