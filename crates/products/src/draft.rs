//! In-progress product draft held by the creation form.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult};

use crate::variant::ProductType;

/// Logical product fields, in form order.
///
/// Ordering follows declaration order, which keeps error listings stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "sku")]
    Sku,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "sizeMB")]
    SizeMb,
    #[serde(rename = "weightKG")]
    WeightKg,
    #[serde(rename = "heightCM")]
    HeightCm,
    #[serde(rename = "widthCM")]
    WidthCm,
    #[serde(rename = "lengthCM")]
    LengthCm,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Sku,
        Field::Name,
        Field::Price,
        Field::Type,
        Field::SizeMb,
        Field::WeightKg,
        Field::HeightCm,
        Field::WidthCm,
        Field::LengthCm,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Sku => "sku",
            Field::Name => "name",
            Field::Price => "price",
            Field::Type => "type",
            Field::SizeMb => "sizeMB",
            Field::WeightKg => "weightKG",
            Field::HeightCm => "heightCM",
            Field::WidthCm => "widthCM",
            Field::LengthCm => "lengthCM",
        }
    }

    /// Short logical name, unit suffix dropped ("size", "weight", ...).
    fn logical_name(&self) -> &'static str {
        match self {
            Field::SizeMb => "size",
            Field::WeightKg => "weight",
            Field::HeightCm => "height",
            Field::WidthCm => "width",
            Field::LengthCm => "length",
            other => other.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Sku => "SKU",
            Field::Name => "Name",
            Field::Price => "Price",
            Field::Type => "Type",
            Field::SizeMb => "Size",
            Field::WeightKg => "Weight",
            Field::HeightCm => "Height",
            Field::WidthCm => "Width",
            Field::LengthCm => "Length",
        }
    }

    /// Input hint shown next to measurement fields.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Field::SizeMb => Some("Please, provide size in MB."),
            Field::WeightKg => Some("Please, provide weight in KG."),
            Field::HeightCm => Some("Please, provide height in CM."),
            Field::WidthCm => Some("Please, provide width in CM."),
            Field::LengthCm => Some("Please, provide length in CM."),
            _ => None,
        }
    }

    /// Fields shared by every variant (sku, name, price, type).
    pub fn is_common(&self) -> bool {
        matches!(self, Field::Sku | Field::Name | Field::Price | Field::Type)
    }

    /// Whether the field holds a decimal quantity.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Field::Sku | Field::Name | Field::Type)
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = DomainError;

    /// Accepts the wire name or the short logical name, in any casing
    /// (`sizeMB`, `SIZEMB`, `size`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Field::ALL
            .into_iter()
            .find(|f| {
                f.as_str().eq_ignore_ascii_case(s) || f.logical_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| DomainError::unknown_field(s))
    }
}

/// A not-yet-created product, as the user is typing it.
///
/// Every value is raw text. Values of inactive variants are kept, so switching
/// `product_type` back and forth loses nothing; only the active variant's
/// fields are validated and projected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub product_type: ProductType,
    pub sku: String,
    pub name: String,
    pub price: String,
    pub size_mb: String,
    pub weight_kg: String,
    pub height_cm: String,
    pub width_cm: String,
    pub length_cm: String,
}

impl Draft {
    /// An empty DVD draft.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    /// Store a raw value. Setting `Field::Type` parses the variant name.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> DomainResult<()> {
        let value = value.into();
        match field {
            Field::Type => self.product_type = value.parse()?,
            Field::Sku => self.sku = value,
            Field::Name => self.name = value,
            Field::Price => self.price = value,
            Field::SizeMb => self.size_mb = value,
            Field::WeightKg => self.weight_kg = value,
            Field::HeightCm => self.height_cm = value,
            Field::WidthCm => self.width_cm = value,
            Field::LengthCm => self.length_cm = value,
        }
        Ok(())
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Type => self.product_type.as_str(),
            Field::Sku => &self.sku,
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::SizeMb => &self.size_mb,
            Field::WeightKg => &self.weight_kg,
            Field::HeightCm => &self.height_cm,
            Field::WidthCm => &self.width_cm,
            Field::LengthCm => &self.length_cm,
        }
    }

    /// Fields that are relevant for the current type, in form order.
    pub fn active_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.product_type.covers(*f))
    }
}
