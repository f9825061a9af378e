use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dimension::Dimension;

/// A row in the `produtos` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub codigo_interno: String,
    pub categoria_id: Uuid,
    pub modelo: String,
    pub marca_comercial: String,
    pub descricao: String,
    /// Derived from `descricao`, never set by callers directly.
    pub descricao_resumida: String,
    /// Mercosul customs classification, at most 8 characters.
    pub ncm: String,
    /// 13-digit barcode, when the product carries one.
    pub ean: Option<String>,
    /// Whether units are tracked by serial number.
    pub serie: bool,
    pub unidade_medida: String,
    pub valor_unitario: f64,
    pub moeda: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new product. Identity, timestamps and
/// the short description are filled in by the aggregate writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub codigo_interno: String,
    pub categoria_id: Uuid,
    pub modelo: String,
    pub marca_comercial: String,
    pub descricao: String,
    pub ncm: String,
    pub ean: Option<String>,
    pub serie: bool,
    pub unidade_medida: String,
    pub valor_unitario: f64,
    pub moeda: String,
}

impl ProductInput {
    /// Build the full row, deriving the short description from the
    /// full one so the two can never disagree on a committed product.
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> Product {
        let descricao_resumida = crate::calc::short_description(&self.descricao);
        Product {
            id,
            codigo_interno: self.codigo_interno,
            categoria_id: self.categoria_id,
            modelo: self.modelo,
            marca_comercial: self.marca_comercial,
            descricao: self.descricao,
            descricao_resumida,
            ncm: self.ncm,
            ean: self.ean,
            serie: self.serie,
            unidade_medida: self.unidade_medida,
            valor_unitario: self.valor_unitario,
            moeda: self.moeda,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a product row. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub categoria_id: Option<Uuid>,
    pub modelo: Option<String>,
    pub marca_comercial: Option<String>,
    pub descricao: Option<String>,
    pub descricao_resumida: Option<String>,
    pub ncm: Option<String>,
    pub ean: Option<Option<String>>,
    pub serie: Option<bool>,
    pub unidade_medida: Option<String>,
    pub valor_unitario: Option<f64>,
    pub moeda: Option<String>,
}

impl ProductPatch {
    /// Apply the patch to an existing row, bumping `updated_at`.
    pub fn apply_to(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(v) = self.categoria_id {
            product.categoria_id = v;
        }
        if let Some(v) = &self.modelo {
            product.modelo = v.clone();
        }
        if let Some(v) = &self.marca_comercial {
            product.marca_comercial = v.clone();
        }
        if let Some(v) = &self.descricao {
            product.descricao = v.clone();
        }
        if let Some(v) = &self.descricao_resumida {
            product.descricao_resumida = v.clone();
        }
        if let Some(v) = &self.ncm {
            product.ncm = v.clone();
        }
        if let Some(v) = &self.ean {
            product.ean = v.clone();
        }
        if let Some(v) = self.serie {
            product.serie = v;
        }
        if let Some(v) = &self.unidade_medida {
            product.unidade_medida = v.clone();
        }
        if let Some(v) = self.valor_unitario {
            product.valor_unitario = v;
        }
        if let Some(v) = &self.moeda {
            product.moeda = v.clone();
        }
        product.updated_at = now;
    }
}

/// The product/dimension pair treated as one consistency unit.
/// `dimension` is `None` only for rows read back mid-creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductWithDimension {
    #[serde(flatten)]
    pub product: Product,
    pub dimension: Option<Dimension>,
}
