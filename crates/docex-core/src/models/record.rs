//! Extracted record: the ordered field map produced by one extraction call.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Output field names.
pub mod fields {
    pub const TYPE_DOCUMENT: &str = "type_document";
    pub const TEXTE_BRUT: &str = "texte_brut";

    // ticket
    pub const DATE: &str = "date";
    pub const HEURE: &str = "heure";
    pub const MONTANT_TOTAL: &str = "montant_total";
    pub const COMMERCE: &str = "commerce";
    pub const NUMERO_TVA: &str = "numero_tva";
    pub const SIRET: &str = "siret";

    // facture
    pub const NUM_FACTURE: &str = "num_facture";
    pub const DATE_FACTURE: &str = "date_facture";
    pub const MONTANT_HT: &str = "montant_ht";
    pub const MONTANT_TVA: &str = "montant_tva";
    pub const MONTANT_TTC: &str = "montant_ttc";
    pub const EMETTEUR: &str = "emetteur";

    // releve
    pub const BANQUE: &str = "banque";
    pub const DATE_DEBUT: &str = "date_debut";
    pub const DATE_FIN: &str = "date_fin";
    pub const NUMERO_COMPTE: &str = "numero_compte";
    pub const SOLDE: &str = "solde";
}

/// Ordered mapping from field name to normalized string value.
///
/// A field that was not found is absent; there are no empty placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    entries: Vec<(String, String)>,
}

impl ExtractedRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == field)?;
        Some(self.entries.remove(pos).1)
    }

    /// Value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the field was populated.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `type_document` tag.
    pub fn document_type(&self) -> Option<&str> {
        self.get(fields::TYPE_DOCUMENT)
    }

    /// The verbatim input text.
    pub fn raw_text(&self) -> Option<&str> {
        self.get(fields::TEXTE_BRUT)
    }

    /// Parse a normalized amount field (e.g. `montant_ttc`) as a decimal.
    pub fn decimal(&self, field: &str) -> Option<Decimal> {
        self.get(field).and_then(|v| Decimal::from_str(v).ok())
    }
}

impl<'a> IntoIterator for &'a ExtractedRecord {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for ExtractedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtractedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ExtractedRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut record = ExtractedRecord::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    record.insert(k, v);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut record = ExtractedRecord::new();
        record.insert("a", "1");
        record.insert("b", "2");
        record.insert("a", "3");

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some("3"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut record = ExtractedRecord::new();
        record.insert("a", "1");
        assert_eq!(record.remove("a"), Some("1".to_string()));
        assert_eq!(record.remove("a"), None);
        assert!(record.is_empty());
    }

    #[test]
    fn test_decimal_accessor() {
        let mut record = ExtractedRecord::new();
        record.insert(fields::SOLDE, "-50.00");
        record.insert(fields::COMMERCE, "ABC");

        assert_eq!(record.decimal(fields::SOLDE), Some(Decimal::new(-5000, 2)));
        assert_eq!(record.decimal(fields::COMMERCE), None);
        assert_eq!(record.decimal(fields::MONTANT_TTC), None);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut record = ExtractedRecord::new();
        record.insert(fields::TYPE_DOCUMENT, "ticket");
        record.insert(fields::TEXTE_BRUT, "x");
        record.insert(fields::DATE, "12/05/2023");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"type_document":"ticket","texte_brut":"x","date":"12/05/2023"}"#
        );

        let back: ExtractedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
