pub mod calc;
pub mod category;
pub mod dimension;
pub mod product;
pub mod validate;

pub use calc::{cubic_weight, short_description, volume};
pub use category::{Category, CategoryInput};
pub use dimension::{Dimension, DimensionInput};
pub use product::{Product, ProductInput, ProductPatch, ProductWithDimension};
pub use validate::{valid_category_code, validate_dimensions, validate_product, FieldError};
