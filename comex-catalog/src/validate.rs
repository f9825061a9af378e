//! Pure input checks. Every rule produces a distinct field-level
//! error; nothing here touches the store.

use serde::Serialize;

use crate::dimension::DimensionInput;
use crate::product::ProductInput;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Validate raw dimension input. All violated rules are reported, one
/// error per field; the gross-vs-net comparison runs last and replaces
/// a bare "> 0" pass on the gross field.
pub fn validate_dimensions(input: &DimensionInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !positive(input.comprimento) {
        errors.push(FieldError::new(
            "comprimento",
            "comprimento deve ser maior que zero",
        ));
    }
    if !positive(input.largura) {
        errors.push(FieldError::new("largura", "largura deve ser maior que zero"));
    }
    if !positive(input.altura) {
        errors.push(FieldError::new("altura", "altura deve ser maior que zero"));
    }
    if !positive(input.peso_liquido) {
        errors.push(FieldError::new(
            "peso_liquido",
            "peso líquido deve ser maior que zero",
        ));
    }
    if !positive(input.peso_bruto) {
        errors.push(FieldError::new(
            "peso_bruto",
            "peso bruto deve ser maior que zero",
        ));
    } else if input.peso_bruto < input.peso_liquido {
        errors.push(FieldError::new(
            "peso_bruto",
            "peso bruto não pode ser menor que o peso líquido",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate product input against the row constraints: non-negative
/// unit value, NCM of at most 8 characters, EAN of exactly 13 digits
/// when present.
pub fn validate_product(input: &ProductInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !input.valor_unitario.is_finite() || input.valor_unitario < 0.0 {
        errors.push(FieldError::new(
            "valor_unitario",
            "valor unitário não pode ser negativo",
        ));
    }
    if input.ncm.chars().count() > 8 {
        errors.push(FieldError::new("ncm", "NCM deve ter no máximo 8 caracteres"));
    }
    if let Some(ean) = &input.ean {
        if ean.len() != 13 || !ean.chars().all(|c| c.is_ascii_digit()) {
            errors.push(FieldError::new("ean", "EAN deve ter exatamente 13 dígitos"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check category-code shape: exactly 4 letters.
pub fn valid_category_code(codigo: &str) -> bool {
    codigo.chars().count() == 4 && codigo.chars().all(|c| c.is_ascii_alphabetic())
}
