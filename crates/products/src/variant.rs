use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, ProductId};

use crate::draft::Field;

/// Product variant discriminant (`type` on the wire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[default]
    #[serde(rename = "DVD")]
    Dvd,
    Book,
    Furniture,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [ProductType::Dvd, ProductType::Book, ProductType::Furniture];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Dvd => "DVD",
            ProductType::Book => "Book",
            ProductType::Furniture => "Furniture",
        }
    }

    /// Fields required by this variant on top of the common ones.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            ProductType::Dvd => &[Field::SizeMb],
            ProductType::Book => &[Field::WeightKg],
            ProductType::Furniture => &[Field::HeightCm, Field::WidthCm, Field::LengthCm],
        }
    }

    /// Whether `field` is considered for validation and payload construction
    /// when a draft has this type.
    pub fn covers(&self, field: Field) -> bool {
        field.is_common() || self.fields().contains(&field)
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    /// Case-insensitive, so "dvd", "DVD" and "Dvd" all name the same variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProductType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::unknown_product_type(s))
    }
}

/// Variant-specific attributes, tagged by `type`.
///
/// Exactly one group of measurements exists per product, so a DVD can never
/// carry furniture dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VariantAttributes {
    #[serde(rename = "DVD")]
    Dvd {
        #[serde(rename = "sizeMB")]
        size_mb: Decimal,
    },
    Book {
        #[serde(rename = "weightKG")]
        weight_kg: Decimal,
    },
    Furniture {
        #[serde(rename = "heightCM")]
        height_cm: Decimal,
        #[serde(rename = "widthCM")]
        width_cm: Decimal,
        #[serde(rename = "lengthCM")]
        length_cm: Decimal,
    },
}

impl VariantAttributes {
    pub fn product_type(&self) -> ProductType {
        match self {
            VariantAttributes::Dvd { .. } => ProductType::Dvd,
            VariantAttributes::Book { .. } => ProductType::Book,
            VariantAttributes::Furniture { .. } => ProductType::Furniture,
        }
    }

    /// One-line human description of the measurements.
    pub fn describe(&self) -> String {
        match self {
            VariantAttributes::Dvd { size_mb } => format!("Size: {size_mb} MB"),
            VariantAttributes::Book { weight_kg } => format!("Weight: {weight_kg} KG"),
            VariantAttributes::Furniture {
                height_cm,
                width_cm,
                length_cm,
            } => format!("Dimensions: {height_cm}x{width_cm}x{length_cm}"),
        }
    }
}

/// Outbound create payload: common fields plus the active variant's fields.
///
/// The `id` is absent; the catalog service assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    #[serde(flatten)]
    pub attributes: VariantAttributes,
}

impl NewProduct {
    pub fn product_type(&self) -> ProductType {
        self.attributes.product_type()
    }
}

/// A product as listed by the catalog service. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    #[serde(flatten)]
    pub attributes: VariantAttributes,
}

impl Product {
    pub fn product_type(&self) -> ProductType {
        self.attributes.product_type()
    }
}
