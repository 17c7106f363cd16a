//! Data models for ingredients, batches, and servings

/// One ingredient of the undiluted mixture.
///
/// `ratio` is the unitless relative proportion (3 for gin in a 3:1 martini).
/// An ingredient with ratio 0 contributes no volume but still appears in the
/// output. `sugar_g_per_l` is `None` when no sugar data exists for the
/// ingredient, which is distinct from a measured 0 g/L.
#[derive(Debug, Clone)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub ratio: f64,
    pub abv: f64,             // 0-100, percent alcohol by volume
    pub density_g_per_l: f64, // grams per liter
    pub sugar_g_per_l: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub batch_size_ml: f64,
    /// Parts of water added per 100 parts of base mixture, 0-100.
    /// Not a fraction of the final volume.
    pub dilution_percent: f64,
}

/// Derived figures for one line of the batch, including synthetic
/// water lines. Every derived field is rounded independently at the
/// point of computation: volumes and weights to 1 decimal, ounces to 2.
#[derive(Debug, Clone)]
pub struct IngredientCalculation {
    pub ingredient: Ingredient,
    pub volume_ml: f64,
    pub volume_oz: f64,
    pub weight_g: f64,
    pub sugar_g: Option<f64>,
}

/// Result of a batch calculation
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub ingredients: Vec<IngredientCalculation>,
    pub final_abv: f64,
    pub water_ml: f64,
    pub total_volume_ml: f64,
    pub total_sugar_g: Option<f64>,
    /// Final sugar concentration in g/L, present only when above zero.
    pub sugar_g_per_l: Option<f64>,
}

/// Water needed to bring an over-proof batch into the 30-33% freezer range.
#[derive(Debug, Clone)]
pub struct DilutionSuggestion {
    pub water_ml: f64,
    pub target_abv: f64,
}

/// One line of a per-serving breakdown.
#[derive(Debug, Clone)]
pub struct ServingLine {
    pub name: String,
    pub volume_ml: f64,
    pub volume_oz: f64,
    pub weight_g: f64,
    pub sugar_g: Option<f64>,
}

/// Result of projecting a batch down to a single serving.
#[derive(Debug, Clone)]
pub struct ServingBreakdown {
    pub lines: Vec<ServingLine>,
    pub servings_count: f64,
    pub serving_volume_ml: f64,
    /// ABV of the poured serving, after any preparation dilution.
    pub final_abv: f64,
    pub sugar_g_per_l: Option<f64>,
    pub pure_alcohol_ml: f64,
    pub alcohol_units: f64,
}

/// A named ingredient template from the catalog (no ratio yet).
#[derive(Debug, Clone)]
pub struct IngredientTemplate {
    pub name: String,
    pub category: String,
    pub abv: f64,
    pub density_g_per_l: f64,
    pub sugar_g_per_l: Option<f64>,
}

/// A named recipe template: ingredient names with ratios plus
/// suggested dilution and serving size.
#[derive(Debug, Clone)]
pub struct RecipeTemplate {
    pub id: i64,
    pub name: String,
    pub dilution_percent: Option<f64>,
    pub serving_size_ml: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_name: String,
    pub ratio: f64,
}

/// A recipe template with its ingredient names resolved against the
/// ingredient catalog, ready to hand to the calculator.
#[derive(Debug, Clone)]
pub struct ResolvedRecipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub dilution_percent: Option<f64>,
    pub serving_size_ml: Option<f64>,
}
