//! Per-serving projection of a calculated batch

use crate::calculator::{ML_TO_OZ, round1, round2, water_ingredient};
use crate::models::{BatchResult, ServingBreakdown, ServingLine};

/// One UK alcohol unit is 10 mL of pure ethanol.
const ML_PER_ALCOHOL_UNIT: f64 = 10.0;

/// Project a batch result down to a single serving.
///
/// The batch is split into `round(batch / base_serving)` servings, then each
/// line is rescaled so the reported serving sums to `base_serving_volume_ml`
/// exactly instead of carrying the servings-count rounding drift.
/// `preparation_dilution_percent` models melt from stirring or shaking at
/// serve time: that much of the base volume is appended as a water line, and
/// the serving-level ABV and sugar concentration are recomputed over the
/// diluted pour. This is a second dilution stage on top of any batch
/// dilution, so the serving ABV can sit below the batch `final_abv`.
pub fn project_serving(
    batch: &BatchResult,
    base_serving_volume_ml: f64,
    preparation_dilution_percent: f64,
) -> ServingBreakdown {
    let servings_count = if base_serving_volume_ml > 0.0 {
        (batch.total_volume_ml / base_serving_volume_ml).round()
    } else {
        0.0
    };

    let batch_volume_ml: f64 = batch.ingredients.iter().map(|c| c.volume_ml).sum();

    if batch.ingredients.is_empty() || servings_count == 0.0 || batch_volume_ml == 0.0 {
        return ServingBreakdown {
            lines: Vec::new(),
            servings_count: 0.0,
            serving_volume_ml: base_serving_volume_ml,
            final_abv: 0.0,
            sugar_g_per_l: None,
            pure_alcohol_ml: 0.0,
            alcohol_units: 0.0,
        };
    }

    // Scale down by servings, then correct so one serving's lines sum to
    // the base volume exactly.
    let scaled_base_volume_ml = batch_volume_ml / servings_count;
    let correction = base_serving_volume_ml / scaled_base_volume_ml;
    let factor = correction / servings_count;

    let mut lines: Vec<ServingLine> = Vec::with_capacity(batch.ingredients.len() + 1);
    let mut alcohol_ml = 0.0;
    let mut sugar_g = 0.0;
    for calc in &batch.ingredients {
        let volume_ml = calc.volume_ml * factor;
        alcohol_ml += volume_ml * calc.ingredient.abv / 100.0;
        let line_sugar = calc.sugar_g.map(|g| round1(g * factor));
        if let Some(g) = line_sugar {
            sugar_g += g;
        }
        lines.push(ServingLine {
            name: calc.ingredient.name.clone(),
            volume_ml: round1(volume_ml),
            volume_oz: round2(volume_ml * ML_TO_OZ),
            weight_g: round1(calc.weight_g * factor),
            sugar_g: line_sugar,
        });
    }

    let mut poured_volume_ml = base_serving_volume_ml;
    if preparation_dilution_percent > 0.0 {
        let prep_ml = base_serving_volume_ml * preparation_dilution_percent / 100.0;
        let water = water_ingredient("Water (preparation)");
        lines.push(ServingLine {
            name: water.name,
            volume_ml: round1(prep_ml),
            volume_oz: round2(prep_ml * ML_TO_OZ),
            weight_g: round1(prep_ml * water.density_g_per_l / 1000.0),
            sugar_g: None,
        });
        poured_volume_ml += prep_ml;
    }

    let final_abv = round1(alcohol_ml / poured_volume_ml * 100.0);
    let sugar_g_per_l = round1(sugar_g / (poured_volume_ml / 1000.0));

    // Units are quoted for the base pour; preparation water adds volume
    // but no alcohol.
    let pure_alcohol_ml = round1(base_serving_volume_ml * batch.final_abv / 100.0);
    let alcohol_units = round1(pure_alcohol_ml / ML_PER_ALCOHOL_UNIT);

    ServingBreakdown {
        lines,
        servings_count,
        serving_volume_ml: base_serving_volume_ml,
        final_abv,
        sugar_g_per_l: (sugar_g_per_l > 0.0).then_some(sugar_g_per_l),
        pure_alcohol_ml,
        alcohol_units,
    }
}

/// Serving volume that holds roughly 3 UK units at the given ABV,
/// rounded to the nearest 5 mL and clamped to a 50-200 mL pour.
pub fn default_serving_volume_ml(final_abv: f64) -> f64 {
    if final_abv <= 0.0 {
        return 200.0;
    }
    let ideal = 3.0 * ML_PER_ALCOHOL_UNIT * 100.0 / final_abv;
    let rounded = (ideal / 5.0).round() * 5.0;
    rounded.clamp(50.0, 200.0)
}

/// Format a serving breakdown as a readable report
pub fn format_serving_breakdown(breakdown: &ServingBreakdown) -> String {
    let mut output = String::new();
    output.push_str("=== Serving Breakdown ===\n");
    output.push_str(&format!(
        "Serving volume: {:.0} mL ({:.0} servings in batch)\n",
        breakdown.serving_volume_ml, breakdown.servings_count
    ));
    output.push_str(&format!(
        "{:.1} UK alcohol units per serving ({:.1} mL pure alcohol)\n",
        breakdown.alcohol_units, breakdown.pure_alcohol_ml
    ));
    output.push_str(&format!("ABV in the glass: {:.1}%\n", breakdown.final_abv));
    if let Some(concentration) = breakdown.sugar_g_per_l {
        output.push_str(&format!("Sugar in the glass: {:.1} g/L\n", concentration));
    }
    output.push('\n');

    output.push_str(&format!(
        "{:<28} {:>12} {:>12} {:>11} {:>10}\n",
        "Ingredient", "Volume (mL)", "Volume (oz)", "Weight (g)", "Sugar (g)"
    ));
    output.push_str(&format!("{}\n", "-".repeat(77)));
    for line in &breakdown.lines {
        let sugar = match line.sugar_g {
            Some(g) => format!("{:.1}", g),
            None => "-".to_string(),
        };
        output.push_str(&format!(
            "{:<28} {:>12.1} {:>12.2} {:>11.1} {:>10}\n",
            line.name, line.volume_ml, line.volume_oz, line.weight_g, sugar
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate_batch;
    use crate::models::{BatchConfig, Ingredient};

    fn martini() -> Vec<Ingredient> {
        vec![
            Ingredient {
                id: "gin".to_string(),
                name: "Gin".to_string(),
                ratio: 3.0,
                abv: 40.0,
                density_g_per_l: 940.0,
                sugar_g_per_l: None,
            },
            Ingredient {
                id: "dry-vermouth".to_string(),
                name: "Dry Vermouth".to_string(),
                ratio: 1.0,
                abv: 18.0,
                density_g_per_l: 1020.0,
                sugar_g_per_l: Some(40.0),
            },
        ]
    }

    fn batch() -> crate::models::BatchResult {
        let config = BatchConfig {
            batch_size_ml: 750.0,
            dilution_percent: 0.0,
        };
        calculate_batch(&martini(), &config)
    }

    #[test]
    fn serving_lines_sum_to_base_volume() {
        let breakdown = project_serving(&batch(), 90.0, 0.0);

        // 750 / 90 rounds to 8 servings; the correction factor makes the
        // pour sum back to 90 regardless
        assert_eq!(breakdown.servings_count, 8.0);
        let sum: f64 = breakdown.lines.iter().map(|l| l.volume_ml).sum();
        let tolerance = breakdown.lines.len() as f64 * 0.05;
        assert!((sum - 90.0).abs() <= tolerance, "sum {} != 90", sum);
    }

    #[test]
    fn preparation_dilution_appends_water_and_lowers_abv() {
        let plain = project_serving(&batch(), 90.0, 0.0);
        let stirred = project_serving(&batch(), 90.0, 20.0);

        assert_eq!(stirred.lines.len(), plain.lines.len() + 1);
        let water = stirred.lines.last().unwrap();
        assert_eq!(water.name, "Water (preparation)");
        assert_eq!(water.volume_ml, 18.0); // 20% of 90
        assert!(water.sugar_g.is_none());
        assert!(stirred.final_abv < plain.final_abv);

        // units are quoted for the base pour, unaffected by prep water
        assert_eq!(stirred.alcohol_units, plain.alcohol_units);
    }

    #[test]
    fn undiluted_serving_matches_batch_abv() {
        let breakdown = project_serving(&batch(), 90.0, 0.0);
        // no prep water: the glass holds the same mixture as the batch
        assert_eq!(breakdown.final_abv, 34.5);
    }

    #[test]
    fn alcohol_units_from_base_pour() {
        let breakdown = project_serving(&batch(), 90.0, 0.0);
        // 90 mL at 34.5% -> 31.05 mL pure alcohol -> 3.1 units
        assert_eq!(breakdown.pure_alcohol_ml, 31.1);
        assert_eq!(breakdown.alcohol_units, 3.1);
    }

    #[test]
    fn serving_sugar_concentration() {
        let breakdown = project_serving(&batch(), 90.0, 0.0);
        // vermouth is 1/4 of the pour at 40 g/L -> 10 g/L overall
        let sugar = breakdown.sugar_g_per_l.unwrap();
        assert!((sugar - 10.0).abs() <= 0.5, "sugar {} not near 10", sugar);
    }

    #[test]
    fn empty_batch_projects_to_empty_breakdown() {
        let config = BatchConfig {
            batch_size_ml: 750.0,
            dilution_percent: 0.0,
        };
        let empty = calculate_batch(&[], &config);
        let breakdown = project_serving(&empty, 90.0, 10.0);

        assert!(breakdown.lines.is_empty());
        assert_eq!(breakdown.final_abv, 0.0);
        assert_eq!(breakdown.alcohol_units, 0.0);
    }

    #[test]
    fn default_serving_volume_targets_three_units() {
        // 3 units = 30 mL pure alcohol; at 34.5% that is ~87 mL -> 85
        assert_eq!(default_serving_volume_ml(34.5), 85.0);
        // weak drinks clamp at the 200 mL ceiling
        assert_eq!(default_serving_volume_ml(5.0), 200.0);
        assert_eq!(default_serving_volume_ml(0.0), 200.0);
        // strong spirits clamp at the 50 mL floor
        assert_eq!(default_serving_volume_ml(70.0), 50.0);
    }
}
