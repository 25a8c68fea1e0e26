use super::fields::{FieldMap, FieldValue};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMismatch {
    pub field: String,
    pub external: FieldValue,
    pub internal: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub mismatches: Vec<FieldMismatch>,
}

impl Comparison {
    pub fn is_reconciled(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compares every field of the external breakdown against the combined
/// scouting data. Fields only present on the internal side are ignored.
pub fn compare(external: &FieldMap, internal: &FieldMap) -> Comparison {
    let mismatches = external
        .iter()
        .filter_map(|(field, expected)| {
            let actual = internal.get(field);
            let matched = actual.is_some_and(|actual| values_match(expected, actual));

            (!matched).then(|| FieldMismatch {
                field: field.clone(),
                external: expected.clone(),
                internal: actual.cloned(),
            })
        })
        .collect();

    Comparison { mismatches }
}

fn values_match(expected: &FieldValue, actual: &FieldValue) -> bool {
    match (expected, actual) {
        (FieldValue::Number(_), FieldValue::Number(_)) => expected.truncated() == actual.truncated(),
        (FieldValue::Category(a), FieldValue::Category(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, FieldValue)]) -> FieldMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_identical_maps_reconcile() {
        let external = map(&[
            ("al4c", FieldValue::count(2)),
            ("endgame_robot1", FieldValue::category("DEEP")),
        ]);
        let comparison = compare(&external, &external.clone());
        assert!(comparison.is_reconciled());
    }

    #[test]
    fn test_fractional_noise_is_truncated() {
        let external = map(&[("net", FieldValue::Number(3.7))]);
        let internal = map(&[("net", FieldValue::count(3))]);
        assert!(compare(&external, &internal).is_reconciled());
    }

    #[test]
    fn test_no_tolerance_on_counts() {
        let external = map(&[("tl2c", FieldValue::count(4))]);
        let internal = map(&[("tl2c", FieldValue::count(5))]);
        let comparison = compare(&external, &internal);
        assert!(!comparison.is_reconciled());
        assert_eq!(comparison.mismatches[0].field, "tl2c");
        assert_eq!(comparison.mismatches[0].internal, Some(FieldValue::count(5)));
    }

    #[test]
    fn test_missing_internal_field_fails() {
        let external = map(&[
            ("al1c", FieldValue::count(0)),
            ("processor", FieldValue::count(1)),
        ]);
        let internal = map(&[("al1c", FieldValue::count(0))]);
        let comparison = compare(&external, &internal);
        assert_eq!(comparison.mismatches.len(), 1);
        assert_eq!(comparison.mismatches[0].field, "processor");
        assert_eq!(comparison.mismatches[0].internal, None);
    }

    #[test]
    fn test_categories_compare_by_identity() {
        let external = map(&[("endgame_robot2", FieldValue::category("PARK"))]);
        let internal = map(&[("endgame_robot2", FieldValue::category("SHALLOW"))]);
        assert!(!compare(&external, &internal).is_reconciled());
    }

    #[test]
    fn test_extra_internal_fields_are_ignored() {
        let external = map(&[("al4c", FieldValue::count(1))]);
        let internal = map(&[
            ("al4c", FieldValue::count(1)),
            ("defense", FieldValue::count(9)),
        ]);
        assert!(compare(&external, &internal).is_reconciled());
    }

    #[test]
    fn test_kind_mismatch_fails() {
        let external = map(&[("endgame_robot1", FieldValue::category("NONE"))]);
        let internal = map(&[("endgame_robot1", FieldValue::count(0))]);
        assert!(!compare(&external, &internal).is_reconciled());
    }
}
