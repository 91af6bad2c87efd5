use serde::{Deserialize, Serialize};

use crate::schema::field::{CanonicalField, Field};

/// One field and the header spellings that mean it, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVariants {
    pub field: Field,
    pub variants: Vec<String>,
}

/// Ordered header-variant table for one source.
///
/// Order is significant twice over: fields are resolved in declaration order
/// and, within a field, earlier variants win. A header already claimed by an
/// earlier field is not available to a later one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldVariantTable {
    entries: Vec<FieldVariants>,
}

impl FieldVariantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `field` with its variants. A repeated field extends its list.
    pub fn with(mut self, field: impl Into<Field>, variants: &[&str]) -> Self {
        let field = field.into();
        let variants = variants.iter().map(|v| v.to_string());
        match self.entries.iter_mut().find(|e| e.field == field) {
            Some(entry) => entry.variants.extend(variants),
            None => self.entries.push(FieldVariants {
                field,
                variants: variants.collect(),
            }),
        }
        self
    }

    /// `with` for every underlying slot: `pattern` contains `{n}`, replaced by 1..=`count`.
    pub fn with_underlyings(mut self, count: usize, patterns: &[&str]) -> Self {
        for (slot, field) in CanonicalField::UNDERLYINGS.iter().take(count).enumerate() {
            let spelled: Vec<String> = patterns
                .iter()
                .map(|p| p.replace("{n}", &(slot + 1).to_string()))
                .collect();
            let refs: Vec<&str> = spelled.iter().map(String::as_str).collect();
            self = self.with(*field, &refs);
        }
        self
    }

    /// Every canonical field under its own canonical name.
    pub fn identity() -> Self {
        CanonicalField::ALL
            .iter()
            .fold(Self::new(), |table, f| table.with(*f, &[f.as_str()]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldVariants> {
        self.entries.iter()
    }

    pub fn variants_for(&self, field: Field) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.variants.as_slice())
    }

    pub fn declares(&self, field: Field) -> bool {
        self.variants_for(field).map_or(false, |v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.variants.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let table = FieldVariantTable::new()
            .with(CanonicalField::Product, &["Product"])
            .with(CanonicalField::Coupon, &["Coupon p.a. (%)"])
            .with(CanonicalField::Product, &["Structure"]);
        let fields: Vec<Field> = table.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::from(CanonicalField::Product), Field::from(CanonicalField::Coupon)]
        );
        assert_eq!(
            table.variants_for(CanonicalField::Product.into()).unwrap(),
            ["Product".to_string(), "Structure".to_string()]
        );
    }

    #[test]
    fn underlying_slots_are_numbered() {
        let table = FieldVariantTable::new().with_underlyings(3, &["BBG Code {n}", "Underlying {n}"]);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.variants_for(CanonicalField::Underlying3.into()).unwrap(),
            ["BBG Code 3".to_string(), "Underlying 3".to_string()]
        );
        assert!(!table.declares(CanonicalField::Underlying4.into()));
    }

    #[test]
    fn identity_covers_every_canonical_field() {
        let table = FieldVariantTable::identity();
        assert_eq!(table.len(), CanonicalField::ALL.len());
        for f in CanonicalField::ALL {
            assert_eq!(table.variants_for(f.into()).unwrap(), [f.as_str().to_string()]);
        }
    }

    #[test]
    fn yaml_form_is_an_ordered_list() {
        let yaml = "- field: tenor\n  variants: [Term]\n- field: underlyings\n  variants: ['Underlying(s)']\n";
        let table: FieldVariantTable = serde_yaml::from_str(yaml).unwrap();
        let fields: Vec<Field> = table.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::from(CanonicalField::Tenor), Field::Underlyings]);
    }
}
