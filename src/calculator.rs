//! Batch calculation logic

use crate::models::{
    BatchConfig, BatchResult, DilutionSuggestion, Ingredient, IngredientCalculation,
};

pub(crate) const ML_TO_OZ: f64 = 0.033814;

/// Freezer-batch sweet spot is 30-33% ABV; suggestions aim for the midpoint.
const SUGGESTION_THRESHOLD_ABV: f64 = 33.0;
const SUGGESTION_TARGET_ABV: f64 = 31.5;

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Synthetic water used for dilution lines. Sugar is left unset so the
/// display layer can render "no data" rather than a measured zero.
pub(crate) fn water_ingredient(name: &str) -> Ingredient {
    Ingredient {
        id: "water".to_string(),
        name: name.to_string(),
        ratio: 0.0,
        abv: 0.0,
        density_g_per_l: 1000.0,
        sugar_g_per_l: None,
    }
}

fn derive_calculation(ingredient: Ingredient, volume_ml: f64) -> IngredientCalculation {
    let sugar_g = ingredient
        .sugar_g_per_l
        .map(|sugar| round1(volume_ml / 1000.0 * sugar));
    IngredientCalculation {
        volume_ml: round1(volume_ml),
        volume_oz: round2(volume_ml * ML_TO_OZ),
        weight_g: round1(volume_ml * ingredient.density_g_per_l / 1000.0),
        sugar_g,
        ingredient,
    }
}

/// Calculate per-ingredient volumes, weights, and sugar for a batch,
/// along with the final ABV and sugar concentration after dilution.
///
/// Dilution uses the parts model: the undiluted mixture is 100 parts and
/// `dilution_percent` is additional parts of water, so the water share of
/// the final volume is `dilution / (100 + dilution)`. Concentrations (ABV,
/// sugar g/L) are computed from ratios alone before any volume is assigned,
/// so they hold for any batch size.
///
/// Empty input or an all-zero ratio sum is not an error; it yields an empty
/// calculation list with zero ABV and water.
pub fn calculate_batch(ingredients: &[Ingredient], config: &BatchConfig) -> BatchResult {
    let total_ratio: f64 = ingredients.iter().map(|ing| ing.ratio).sum();

    if ingredients.is_empty() || total_ratio == 0.0 {
        return BatchResult {
            ingredients: Vec::new(),
            final_abv: 0.0,
            water_ml: 0.0,
            total_volume_ml: config.batch_size_ml,
            total_sugar_g: None,
            sugar_g_per_l: None,
        };
    }

    // Intensive quantities first: weighted averages over ratio proportions,
    // independent of batch size.
    let undiluted_abv: f64 = ingredients
        .iter()
        .map(|ing| ing.ratio / total_ratio * ing.abv)
        .sum();
    let undiluted_sugar_g_per_l: f64 = ingredients
        .iter()
        .map(|ing| ing.ratio / total_ratio * ing.sugar_g_per_l.unwrap_or(0.0))
        .sum();

    let total_parts = 100.0 + config.dilution_percent;
    let ingredients_fraction = 100.0 / total_parts;
    let water_fraction = config.dilution_percent / total_parts;

    let final_abv = round1(undiluted_abv * ingredients_fraction);
    let final_sugar_g_per_l = round1(undiluted_sugar_g_per_l * ingredients_fraction);

    // Extensive quantities only exist once a batch size is given.
    let mut water_ml = 0.0;
    let mut ingredients_volume_ml = 0.0;
    if config.batch_size_ml > 0.0 {
        if config.dilution_percent > 0.0 {
            water_ml = round1(config.batch_size_ml * water_fraction);
        }
        ingredients_volume_ml = config.batch_size_ml - water_ml;
    }

    let mut calculations: Vec<IngredientCalculation> = Vec::with_capacity(ingredients.len() + 1);
    let mut total_sugar_g = 0.0;
    for ing in ingredients {
        let volume_ml = ing.ratio / total_ratio * ingredients_volume_ml;
        let calc = derive_calculation(ing.clone(), volume_ml);
        if let Some(sugar) = calc.sugar_g {
            total_sugar_g += sugar;
        }
        calculations.push(calc);
    }

    if water_ml > 0.0 {
        calculations.push(derive_calculation(water_ingredient("Water"), water_ml));
    }

    BatchResult {
        ingredients: calculations,
        final_abv,
        water_ml,
        total_volume_ml: config.batch_size_ml,
        total_sugar_g: Some(round1(total_sugar_g)),
        sugar_g_per_l: (final_sugar_g_per_l > 0.0).then_some(final_sugar_g_per_l),
    }
}

/// Suggest how much water would bring an over-proof batch down to the
/// freezer target. Returns `None` when the batch is already at or below
/// the 33% threshold.
pub fn suggest_dilution(current_abv: f64, current_volume_ml: f64) -> Option<DilutionSuggestion> {
    if current_abv <= SUGGESTION_THRESHOLD_ABV {
        return None;
    }
    let water_ml =
        (current_abv - SUGGESTION_TARGET_ABV) / SUGGESTION_TARGET_ABV * current_volume_ml;
    Some(DilutionSuggestion {
        water_ml: water_ml.round(),
        target_abv: SUGGESTION_TARGET_ABV,
    })
}

/// Format the per-ingredient batch table as a readable string
pub fn format_batch_table(result: &BatchResult) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<28} {:>12} {:>12} {:>11} {:>10}\n",
        "Ingredient", "Volume (mL)", "Volume (oz)", "Weight (g)", "Sugar (g)"
    ));
    output.push_str(&format!("{}\n", "-".repeat(77)));

    for calc in &result.ingredients {
        let sugar = match calc.sugar_g {
            Some(g) => format!("{:.1}", g),
            None => "-".to_string(),
        };
        output.push_str(&format!(
            "{:<28} {:>12.1} {:>12.2} {:>11.1} {:>10}\n",
            calc.ingredient.name, calc.volume_ml, calc.volume_oz, calc.weight_g, sugar
        ));
    }

    output
}

/// Aggregate figures for a calculated batch
#[derive(Debug)]
pub struct BatchSummary {
    pub recipe_name: String,
    pub final_abv: f64,
    pub water_ml: f64,
    pub total_volume_ml: f64,
    pub total_sugar_g: Option<f64>,
    pub sugar_g_per_l: Option<f64>,
    pub suggestion: Option<DilutionSuggestion>,
}

/// Summarize a batch result for display
pub fn summarize_batch(recipe_name: &str, result: &BatchResult) -> BatchSummary {
    BatchSummary {
        recipe_name: recipe_name.to_string(),
        final_abv: result.final_abv,
        water_ml: result.water_ml,
        total_volume_ml: result.total_volume_ml,
        total_sugar_g: result.total_sugar_g,
        sugar_g_per_l: result.sugar_g_per_l,
        suggestion: suggest_dilution(result.final_abv, result.total_volume_ml),
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Batch Summary ===")?;
        writeln!(f, "Recipe: {}", self.recipe_name)?;
        writeln!(f, "Total volume: {:.1} mL", self.total_volume_ml)?;
        writeln!(f, "Final ABV:    {:.1}%", self.final_abv)?;
        writeln!(f, "Added water:  {:.1} mL", self.water_ml)?;
        if let Some(sugar) = self.total_sugar_g {
            writeln!(f, "Total sugar:  {:.1} g", sugar)?;
        }
        if let Some(concentration) = self.sugar_g_per_l {
            writeln!(f, "Sugar conc.:  {:.1} g/L", concentration)?;
        }
        if let Some(suggestion) = &self.suggestion {
            writeln!(
                f,
                "Hint: add {:.0} mL water to reach ~{:.1}% ABV (freezer range 30-33%)",
                suggestion.water_ml, suggestion.target_abv
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spirit(name: &str, ratio: f64, abv: f64, density: f64) -> Ingredient {
        Ingredient {
            id: name.to_lowercase(),
            name: name.to_string(),
            ratio,
            abv,
            density_g_per_l: density,
            sugar_g_per_l: None,
        }
    }

    fn martini() -> Vec<Ingredient> {
        vec![
            spirit("Gin", 3.0, 40.0, 940.0),
            spirit("Dry Vermouth", 1.0, 18.0, 980.0),
        ]
    }

    #[test]
    fn undiluted_batch_splits_by_ratio() {
        let config = BatchConfig {
            batch_size_ml: 750.0,
            dilution_percent: 0.0,
        };
        let result = calculate_batch(&martini(), &config);

        // 3:1 at 40/18 ABV -> weighted average 34.5, no dilution to scale it
        assert_eq!(result.final_abv, 34.5);
        assert_eq!(result.water_ml, 0.0);
        assert_eq!(result.ingredients.len(), 2);
        assert_eq!(result.ingredients[0].volume_ml, 562.5);
        assert_eq!(result.ingredients[1].volume_ml, 187.5);
        // weight = volume * density/1000, rounded independently
        assert_eq!(result.ingredients[0].weight_g, 528.8);
        assert_eq!(result.ingredients[1].weight_g, 183.8);
    }

    #[test]
    fn parts_model_dilution() {
        let config = BatchConfig {
            batch_size_ml: 750.0,
            dilution_percent: 5.0,
        };
        let result = calculate_batch(&martini(), &config);

        // 105 total parts: 100/105 of the ABV survives, 5/105 of the volume is water
        assert_eq!(result.final_abv, 32.9);
        assert_eq!(result.water_ml, 35.7);

        // synthetic water line appended after the real ingredients
        assert_eq!(result.ingredients.len(), 3);
        let water = &result.ingredients[2];
        assert_eq!(water.ingredient.name, "Water");
        assert_eq!(water.volume_ml, 35.7);
        assert_eq!(water.weight_g, 35.7); // 1000 g/L
        assert!(water.sugar_g.is_none(), "water has no sugar data, not zero");
    }

    #[test]
    fn sugar_per_ingredient() {
        let mut ingredients = vec![
            spirit("Vodka", 3.0, 40.0, 940.0),
            spirit("Triple Sec", 1.0, 30.0, 1050.0),
        ];
        ingredients[1].sugar_g_per_l = Some(40.0);
        let config = BatchConfig {
            batch_size_ml: 750.0,
            dilution_percent: 0.0,
        };
        let result = calculate_batch(&ingredients, &config);

        // 187.5 mL at 40 g/L -> 7.5 g
        assert_eq!(result.ingredients[1].sugar_g, Some(7.5));
        assert_eq!(result.total_sugar_g, Some(7.5));
        // 10 g/L over the whole batch: 1/4 proportion of 40 g/L
        assert_eq!(result.sugar_g_per_l, Some(10.0));
        assert!(result.ingredients[0].sugar_g.is_none());
    }

    #[test]
    fn empty_ingredients_is_a_defined_state() {
        let config = BatchConfig {
            batch_size_ml: 750.0,
            dilution_percent: 10.0,
        };
        let result = calculate_batch(&[], &config);

        assert!(result.ingredients.is_empty());
        assert_eq!(result.final_abv, 0.0);
        assert_eq!(result.water_ml, 0.0);
        assert_eq!(result.total_volume_ml, 750.0);
        assert!(result.total_sugar_g.is_none());
        assert!(result.sugar_g_per_l.is_none());
    }

    #[test]
    fn zero_total_ratio_is_a_defined_state() {
        let ingredients = vec![spirit("Gin", 0.0, 40.0, 940.0)];
        let config = BatchConfig {
            batch_size_ml: 500.0,
            dilution_percent: 0.0,
        };
        let result = calculate_batch(&ingredients, &config);

        assert!(result.ingredients.is_empty());
        assert_eq!(result.final_abv, 0.0);
        assert_eq!(result.total_volume_ml, 500.0);
    }

    #[test]
    fn zero_ratio_ingredient_still_appears() {
        let ingredients = vec![
            spirit("Gin", 2.0, 40.0, 940.0),
            spirit("Angostura Bitters", 0.0, 44.7, 950.0),
        ];
        let config = BatchConfig {
            batch_size_ml: 500.0,
            dilution_percent: 0.0,
        };
        let result = calculate_batch(&ingredients, &config);

        assert_eq!(result.ingredients.len(), 2);
        assert_eq!(result.ingredients[1].volume_ml, 0.0);
    }

    #[test]
    fn hundred_percent_dilution_halves_everything() {
        // 100 parts water on 100 parts base: legal, half the final volume
        // is water. A percent-of-final model would blow up here.
        let config = BatchConfig {
            batch_size_ml: 1000.0,
            dilution_percent: 100.0,
        };
        let result = calculate_batch(&martini(), &config);

        assert_eq!(result.water_ml, 500.0);
        assert_eq!(result.final_abv, round1(34.5 * 0.5));
    }

    #[test]
    fn zero_batch_size_yields_zero_volumes_but_real_abv() {
        let config = BatchConfig {
            batch_size_ml: 0.0,
            dilution_percent: 5.0,
        };
        let result = calculate_batch(&martini(), &config);

        // ABV is intensive; it holds even with no volume assigned
        assert_eq!(result.final_abv, 32.9);
        assert_eq!(result.water_ml, 0.0);
        assert!(result.ingredients.iter().all(|c| c.volume_ml == 0.0));
    }

    #[test]
    fn calculation_is_deterministic() {
        let config = BatchConfig {
            batch_size_ml: 700.0,
            dilution_percent: 12.5,
        };
        let a = calculate_batch(&martini(), &config);
        let b = calculate_batch(&martini(), &config);

        assert_eq!(a.final_abv, b.final_abv);
        assert_eq!(a.water_ml, b.water_ml);
        for (x, y) in a.ingredients.iter().zip(&b.ingredients) {
            assert_eq!(x.volume_ml, y.volume_ml);
            assert_eq!(x.weight_g, y.weight_g);
        }
    }

    #[test]
    fn rounded_volumes_sum_close_to_batch_size() {
        let ingredients = vec![
            spirit("Whiskey", 2.0, 45.0, 940.0),
            spirit("Sweet Vermouth", 1.0, 18.0, 1060.0),
            spirit("Angostura Bitters", 0.05, 44.7, 950.0),
        ];
        let config = BatchConfig {
            batch_size_ml: 750.0,
            dilution_percent: 10.0,
        };
        let result = calculate_batch(&ingredients, &config);

        let sum: f64 = result.ingredients.iter().map(|c| c.volume_ml).sum();
        // each line rounds independently, so allow 0.05 mL drift per line
        let tolerance = result.ingredients.len() as f64 * 0.05;
        assert!(
            (sum - 750.0).abs() <= tolerance,
            "sum {} not within {} of 750",
            sum,
            tolerance
        );
    }

    #[test]
    fn dilution_suggestion_only_above_threshold() {
        assert!(suggest_dilution(33.0, 750.0).is_none());
        assert!(suggest_dilution(20.0, 750.0).is_none());

        let suggestion = suggest_dilution(40.0, 750.0).unwrap();
        assert_eq!(suggestion.target_abv, 31.5);
        // (40 - 31.5) / 31.5 * 750 = 202.38... -> 202
        assert_eq!(suggestion.water_ml, 202.0);
    }
}
