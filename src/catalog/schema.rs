use crate::error::{PlanError, Result};

/// Canonical catalog fields the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    Id,
    Name,
    Calories,
    Protein,
    Fat,
    Carbs,
    Fiber,
    GramsPerPortion,
    PortionUnit,
}

impl CatalogField {
    pub const ALL: [CatalogField; 9] = [
        CatalogField::Id,
        CatalogField::Name,
        CatalogField::Calories,
        CatalogField::Protein,
        CatalogField::Fat,
        CatalogField::Carbs,
        CatalogField::Fiber,
        CatalogField::GramsPerPortion,
        CatalogField::PortionUnit,
    ];

    /// Accepted column names, canonical first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CatalogField::Id => &["food_id", "id"],
            CatalogField::Name => &["food_name", "description", "name", "FoodName"],
            CatalogField::Calories => &["calories", "energy_kcal", "kcal", "Energy_kcal", "EnergyKcal"],
            CatalogField::Protein => &["protein", "protein_g", "Protein_g", "Protein"],
            CatalogField::Fat => &["fat", "fat_g", "total_fat", "TotalFat_g", "TotalFat"],
            CatalogField::Carbs => &[
                "carbs",
                "carbohydrate",
                "carbohydrate_g",
                "carb",
                "Carbohydrate_g",
                "Carbohydrate",
            ],
            CatalogField::Fiber => &[
                "fiber",
                "dietary_fiber",
                "fiber_g",
                "DietaryFiber_g",
                "DietaryFiber",
            ],
            CatalogField::GramsPerPortion => &["grams_per_portion"],
            CatalogField::PortionUnit => &["portion_unit"],
        }
    }

    /// Fields a non-empty catalog must provide a column for.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            CatalogField::Name
                | CatalogField::Calories
                | CatalogField::Protein
                | CatalogField::Fat
                | CatalogField::Carbs
        )
    }

    fn canonical(&self) -> &'static str {
        self.aliases()[0]
    }
}

/// Column positions for each canonical field, resolved once per catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMapping {
    columns: [Option<usize>; 9],
}

impl SchemaMapping {
    /// Match catalog headers against the alias table.
    ///
    /// For each field the first alias present in `headers` wins. Missing
    /// required fields fail with [`PlanError::Schema`].
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let mut mapping = Self::default();
        let mut missing = Vec::new();

        for (slot, field) in CatalogField::ALL.iter().enumerate() {
            let position = field
                .aliases()
                .iter()
                .find_map(|alias| headers.iter().position(|h| h.trim() == *alias));

            if position.is_none() && field.is_required() {
                missing.push(field.canonical());
            }
            mapping.columns[slot] = position;
        }

        if !missing.is_empty() {
            return Err(PlanError::Schema(format!(
                "no column found for {}",
                missing.join(", ")
            )));
        }

        Ok(mapping)
    }

    /// Column index for a field, if the catalog has one.
    pub fn column(&self, field: CatalogField) -> Option<usize> {
        let slot = CatalogField::ALL.iter().position(|f| *f == field)?;
        self.columns[slot]
    }
}
