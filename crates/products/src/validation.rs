//! Draft validation and create-payload projection.
//!
//! Both operations walk the same rules: the common fields are always checked,
//! then exactly the fields of the draft's current type. Fields belonging to
//! other variants are neither validated nor reported, and never projected.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::draft::{Draft, Field};
use crate::variant::{NewProduct, ProductType, VariantAttributes};

/// Per-field validation messages. Empty when the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Drop entries that are irrelevant to `product_type`.
    pub fn retain_for(&mut self, product_type: ProductType) {
        self.0.retain(|field, _| product_type.covers(*field));
    }
}

impl core::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (_, message) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validate `draft` against the requirements of its current type.
pub fn validate(draft: &Draft) -> ErrorMap {
    match to_create_payload(draft) {
        Ok(_) => ErrorMap::new(),
        Err(errors) => errors,
    }
}

/// Project a draft onto the outbound payload for its type.
///
/// Returns the full error map instead when any relevant field is missing or
/// malformed, so no partially valid payload can be produced.
pub fn to_create_payload(draft: &Draft) -> Result<NewProduct, ErrorMap> {
    let mut check = Checker {
        draft,
        errors: ErrorMap::new(),
    };

    let sku = check.text(Field::Sku);
    let name = check.text(Field::Name);
    let price = check.number(Field::Price);

    let attributes = match draft.product_type {
        ProductType::Dvd => check
            .number(Field::SizeMb)
            .map(|size_mb| VariantAttributes::Dvd { size_mb }),
        ProductType::Book => check
            .number(Field::WeightKg)
            .map(|weight_kg| VariantAttributes::Book { weight_kg }),
        ProductType::Furniture => {
            let height = check.number(Field::HeightCm);
            let width = check.number(Field::WidthCm);
            let length = check.number(Field::LengthCm);
            match (height, width, length) {
                (Some(height_cm), Some(width_cm), Some(length_cm)) => {
                    Some(VariantAttributes::Furniture {
                        height_cm,
                        width_cm,
                        length_cm,
                    })
                }
                _ => None,
            }
        }
    };

    match (sku, name, price, attributes) {
        (Some(sku), Some(name), Some(price), Some(attributes)) if check.errors.is_empty() => {
            Ok(NewProduct {
                sku,
                name,
                price,
                attributes,
            })
        }
        _ => Err(check.errors),
    }
}

struct Checker<'a> {
    draft: &'a Draft,
    errors: ErrorMap,
}

impl<'a> Checker<'a> {
    fn required(&mut self, field: Field) -> Option<&'a str> {
        let draft: &'a Draft = self.draft;
        let value = draft.get(field).trim();
        if value.is_empty() {
            self.errors.insert(field, format!("{} is required.", field.label()));
            return None;
        }
        Some(value)
    }

    fn text(&mut self, field: Field) -> Option<String> {
        self.required(field).map(str::to_string)
    }

    fn number(&mut self, field: Field) -> Option<Decimal> {
        let raw = self.required(field)?;
        let parsed = raw
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(raw));
        match parsed {
            Ok(value) if value.is_sign_negative() && !value.is_zero() => {
                self.errors.insert(field, format!("{} must not be negative.", field.label()));
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                self.errors.insert(field, format!("{} must be a number.", field.label()));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(product_type: ProductType, values: &[(Field, &str)]) -> Draft {
        let mut draft = Draft::new().with_type(product_type);
        for (field, value) in values {
            draft.set(*field, *value).unwrap();
        }
        draft
    }

    fn furniture_draft() -> Draft {
        draft(
            ProductType::Furniture,
            &[
                (Field::Sku, "A1"),
                (Field::Name, "Elm Desk"),
                (Field::Price, "120"),
                (Field::HeightCm, "75"),
                (Field::WidthCm, "60"),
                (Field::LengthCm, "110"),
            ],
        )
    }

    #[test]
    fn complete_furniture_draft_projects_to_seven_keys() {
        let draft = furniture_draft();
        assert!(validate(&draft).is_empty());

        let payload = to_create_payload(&draft).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 7);
        for key in ["sku", "name", "price", "type", "heightCM", "widthCM", "lengthCM"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object["type"], "Furniture");
        assert!(!object.contains_key("id"));
    }

    #[test]
    fn empty_dvd_draft_reports_four_errors() {
        let draft = Draft::new();
        let errors = validate(&draft);

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::Sku, Field::Name, Field::Price, Field::SizeMb]
        );
        assert_eq!(errors.get(Field::Sku), Some("SKU is required."));
        assert_eq!(errors.get(Field::SizeMb), Some("Size is required."));
    }

    #[test]
    fn other_variant_fields_are_ignored() {
        // Book fields are filled but the draft is a DVD missing its size.
        let draft = draft(
            ProductType::Dvd,
            &[
                (Field::Sku, "B1"),
                (Field::Name, "Novel"),
                (Field::Price, "9.99"),
                (Field::WeightKg, "1"),
            ],
        );

        let errors = validate(&draft);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::SizeMb]);
    }

    #[test]
    fn switching_type_does_not_leak_previous_errors() {
        let mut draft = furniture_draft();
        draft.set(Field::HeightCm, "").unwrap();
        draft.set(Field::WidthCm, "").unwrap();
        assert!(validate(&draft).contains(Field::HeightCm));

        draft.set(Field::Type, "Book").unwrap();
        draft.set(Field::WeightKg, "0.5").unwrap();
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn non_numeric_and_negative_values_are_rejected() {
        let draft = draft(
            ProductType::Dvd,
            &[
                (Field::Sku, "D1"),
                (Field::Name, "Disc"),
                (Field::Price, "cheap"),
                (Field::SizeMb, "-5"),
            ],
        );

        let errors = validate(&draft);
        assert_eq!(errors.get(Field::Price), Some("Price must be a number."));
        assert_eq!(errors.get(Field::SizeMb), Some("Size must not be negative."));
    }

    #[test]
    fn whitespace_counts_as_empty_and_values_are_trimmed() {
        let mut draft = draft(
            ProductType::Dvd,
            &[
                (Field::Sku, "  "),
                (Field::Name, " Disc "),
                (Field::Price, "1"),
                (Field::SizeMb, "700"),
            ],
        );
        assert_eq!(validate(&draft).fields().collect::<Vec<_>>(), vec![Field::Sku]);

        draft.set(Field::Sku, "D1").unwrap();
        let payload = to_create_payload(&draft).unwrap();
        assert_eq!(payload.name, "Disc");
    }

    #[test]
    fn retain_for_drops_entries_of_other_variants() {
        let mut draft = furniture_draft();
        draft.set(Field::LengthCm, "").unwrap();
        draft.set(Field::Sku, "").unwrap();
        let mut errors = validate(&draft);
        errors.retain_for(ProductType::Dvd);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Sku]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn product_type() -> impl Strategy<Value = ProductType> {
            prop_oneof![
                Just(ProductType::Dvd),
                Just(ProductType::Book),
                Just(ProductType::Furniture),
            ]
        }

        fn filled(product_type: ProductType, amount: u32) -> Draft {
            let value = amount.to_string();
            let mut draft = draft(product_type, &[(Field::Sku, "SKU-1"), (Field::Name, "Item")]);
            draft.set(Field::Price, value.clone()).unwrap();
            for field in product_type.fields() {
                draft.set(*field, value.clone()).unwrap();
            }
            draft
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a fully filled draft validates for every type.
            #[test]
            fn filled_drafts_are_valid(t in product_type(), amount in 0u32..100_000) {
                prop_assert!(validate(&filled(t, amount)).is_empty());
            }

            /// Property: blanking any relevant field yields an error for it.
            #[test]
            fn blank_required_field_is_reported(
                t in product_type(),
                amount in 0u32..1000,
                pick in 0usize..16,
            ) {
                let mut draft = filled(t, amount);
                let relevant: Vec<Field> =
                    draft.active_fields().filter(|f| *f != Field::Type).collect();
                let field = relevant[pick % relevant.len()];
                draft.set(field, "").unwrap();

                let errors = validate(&draft);
                prop_assert!(errors.contains(field));
            }

            /// Property: errors only ever name fields relevant to the current type.
            #[test]
            fn errors_stay_within_active_type(t in product_type(), other in product_type()) {
                // Fill the other variant completely, leave the active one empty.
                let draft = filled(other, 1).with_type(t);
                for field in validate(&draft).fields() {
                    prop_assert!(t.covers(field));
                }
            }

            /// Property: the payload carries only common keys and the active type's keys.
            #[test]
            fn payload_never_leaks_foreign_keys(t in product_type(), amount in 0u32..1000) {
                let mut draft = filled(t, amount);
                for field in Field::ALL {
                    if !field.is_common() && !t.covers(field) {
                        draft.set(field, "13").unwrap();
                    }
                }

                let json = serde_json::to_value(to_create_payload(&draft).unwrap()).unwrap();
                let object = json.as_object().unwrap();
                prop_assert_eq!(object.len(), 4 + t.fields().len());
                for key in object.keys() {
                    let field: Field = key.parse().unwrap();
                    prop_assert!(t.covers(field));
                }
            }
        }
    }
}
