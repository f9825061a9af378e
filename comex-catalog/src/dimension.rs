use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calc::{cubic_weight, volume};

/// A row in the `dimensoes` collection. Exactly one exists per
/// committed product (`produto_id` is unique in the collection).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimension {
    pub id: Uuid,
    pub produto_id: Uuid,
    /// Length in cm.
    pub comprimento: f64,
    /// Width in cm.
    pub largura: f64,
    /// Height in cm.
    pub altura: f64,
    /// Net weight in kg.
    pub peso_liquido: f64,
    /// Gross weight in kg, never below `peso_liquido`.
    pub peso_bruto: f64,
    /// Derived: (l * w * h) / 6000, kg.
    pub peso_cubico: f64,
    /// Derived: (l * w * h) / 1_000_000, m³.
    pub volume: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw dimension fields as gathered by the form collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DimensionInput {
    pub comprimento: f64,
    pub largura: f64,
    pub altura: f64,
    pub peso_liquido: f64,
    pub peso_bruto: f64,
}

impl DimensionInput {
    /// Build the full row for a product, recomputing the derived
    /// fields from the raw values.
    pub fn into_row(self, produto_id: Uuid, now: DateTime<Utc>) -> Dimension {
        Dimension {
            id: Uuid::new_v4(),
            produto_id,
            comprimento: self.comprimento,
            largura: self.largura,
            altura: self.altura,
            peso_liquido: self.peso_liquido,
            peso_bruto: self.peso_bruto,
            peso_cubico: cubic_weight(self.comprimento, self.largura, self.altura),
            volume: volume(self.comprimento, self.largura, self.altura),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Dimension {
    /// The raw fields, for feeding back into a fresh creation path.
    pub fn raw_input(&self) -> DimensionInput {
        DimensionInput {
            comprimento: self.comprimento,
            largura: self.largura,
            altura: self.altura,
            peso_liquido: self.peso_liquido,
            peso_bruto: self.peso_bruto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_row_recomputes_derived_fields() {
        let input = DimensionInput {
            comprimento: 100.0,
            largura: 50.0,
            altura: 40.0,
            peso_liquido: 10.0,
            peso_bruto: 12.0,
        };
        let row = input.into_row(Uuid::new_v4(), Utc::now());
        assert_eq!(row.peso_cubico, 33.333);
        assert_eq!(row.volume, 0.2);
        assert_eq!(row.peso_bruto, 12.0);
    }
}
