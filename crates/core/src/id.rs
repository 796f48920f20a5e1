//! Product identifiers.
//!
//! Ids are assigned by the remote catalog service and never minted by the
//! client. The service may hand them out as JSON numbers (any sign, integral or
//! not) or strings; the exact wire form is preserved so an id can be sent back
//! verbatim in a delete request.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(Number),
    Text(String),
}

impl RawId {
    /// Canonical text of the id; two ids are equal exactly when these match.
    fn text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            RawId::Number(n) => n.to_string().into(),
            RawId::Text(s) => s.as_str().into(),
        }
    }
}

impl PartialEq for RawId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RawId {}

impl PartialOrd for RawId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Numbers sort before text, numbers by value with their text as tiebreak.
impl Ord for RawId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RawId::Number(a), RawId::Number(b)) => {
                let (x, y) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
                x.total_cmp(&y).then_with(|| self.text().cmp(&other.text()))
            }
            (RawId::Number(_), RawId::Text(_)) => Ordering::Less,
            (RawId::Text(_), RawId::Number(_)) => Ordering::Greater,
            (RawId::Text(a), RawId::Text(b)) => a.cmp(b),
        }
    }
}

impl Hash for RawId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        matches!(self, RawId::Number(_)).hash(state);
        self.text().hash(state);
    }
}

/// Opaque, stable identifier of a listed product.
///
/// This is the sole key used for selection and deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(RawId);

impl ProductId {
    /// Returns the numeric form if the service issued a non-negative integer id.
    pub fn as_number(&self) -> Option<u64> {
        match &self.0 {
            RawId::Number(n) => n.as_u64(),
            RawId::Text(_) => None,
        }
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.text())
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(RawId::Number(Number::from(value)))
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(RawId::Number(Number::from(value)))
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(RawId::Text(value))
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(RawId::Text(value.to_string()))
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    /// JSON number literals parse as numeric ids, anything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id("ProductId: empty"));
        }
        Ok(match serde_json::from_str::<Number>(s) {
            Ok(n) => Self(RawId::Number(n)),
            Err(_) => Self::from(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn numeric_ids_keep_their_wire_form() {
        let id: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_number(), Some(42));
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(id, ProductId::from(42u64));
    }

    #[test]
    fn string_ids_keep_their_wire_form() {
        let id: ProductId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.as_number(), None);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        assert_eq!(id.to_string(), "42");
        assert_ne!(id, ProductId::from(42u64));
    }

    #[test]
    fn negative_and_fractional_ids_round_trip() {
        for raw in ["-1", "1.5", "-0.25"] {
            let id: ProductId = serde_json::from_str(raw).unwrap();
            assert_eq!(id.as_number(), None);
            assert_eq!(serde_json::to_string(&id).unwrap(), raw);
            assert_eq!(id.to_string(), raw);
        }
    }

    #[test]
    fn ids_order_numbers_by_value_then_text() {
        let ids: BTreeSet<ProductId> = ["\"b\"", "10", "-1", "1.5", "2", "\"a\""]
            .into_iter()
            .map(|raw| serde_json::from_str(raw).unwrap())
            .collect();
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["-1", "1.5", "2", "10", "a", "b"]);
    }

    #[test]
    fn equal_ids_hash_alike() {
        let set: HashSet<ProductId> =
            [ProductId::from(7u64), serde_json::from_str("7").unwrap()].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn from_str_prefers_numbers() {
        assert_eq!("7".parse::<ProductId>().unwrap(), ProductId::from(7u64));
        assert_eq!("-3".parse::<ProductId>().unwrap(), ProductId::from(-3i64));
        assert_eq!("abc-1".parse::<ProductId>().unwrap(), ProductId::from("abc-1"));
    }

    #[test]
    fn from_str_rejects_blank() {
        let err = "  ".parse::<ProductId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
