//! Field discovery in arbitrarily nested documents.
//!
//! A canonical field is looked up in two passes:
//!
//! 1. **Alias search**: depth-first; at each object every alias is tried as a
//!    key (in priority order) before descending into children, so shallower
//!    and earlier-declared aliases win.
//! 2. **Content heuristic**: only when the alias search fails and the field
//!    declares a heuristic. The first leaf string, in the same traversal
//!    order, whose shape matches is taken.
//!
//! Both passes stop descending past [`MAX_DEPTH`] levels and treat anything
//! deeper as not found.

use crate::rules::ContentHeuristic;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

/// Deepest nesting level (root = 0) that is still inspected.
pub const MAX_DEPTH: usize = 64;

/// Find the value of `canonical` in `document`.
///
/// ## Example
///
/// ```rust
/// use payload_validate::locate::locate;
/// use serde_json::json;
///
/// let doc = json!({"person": {"dateOfBirth": "1990-01-01"}});
/// let found = locate(&doc, "birthDate", &["birthDate", "dateOfBirth", "dob"], None);
/// assert_eq!(found, Some(&json!("1990-01-01")));
/// ```
pub fn locate<'a, S: AsRef<str>>(
    document: &'a Value,
    canonical: &str,
    aliases: &[S],
    heuristic: Option<&dyn ContentHeuristic>,
) -> Option<&'a Value> {
    if let Some(found) = find_by_alias(document, aliases, MAX_DEPTH) {
        debug!(field = canonical, "located by key");
        return Some(found);
    }

    let found = find_by_shape(document, heuristic?, MAX_DEPTH);
    if found.is_some() {
        debug!(field = canonical, "located by content heuristic");
    }
    found
}

/// Depth-first key search, trying every alias at a level before descending.
pub fn find_by_alias<'a, S: AsRef<str>>(
    node: &'a Value,
    aliases: &[S],
    remaining: usize,
) -> Option<&'a Value> {
    match node {
        Value::Object(map) => {
            if let Some(found) = aliases.iter().find_map(|alias| map.get(alias.as_ref())) {
                return Some(found);
            }
            let remaining = descend(remaining)?;
            map.values()
                .find_map(|child| find_by_alias(child, aliases, remaining))
        }
        Value::Array(items) => {
            let remaining = descend(remaining)?;
            items
                .iter()
                .find_map(|item| find_by_alias(item, aliases, remaining))
        }
        _ => None,
    }
}

/// Depth-first scan for the first leaf string accepted by `heuristic`.
pub fn find_by_shape<'a>(
    node: &'a Value,
    heuristic: &dyn ContentHeuristic,
    remaining: usize,
) -> Option<&'a Value> {
    match node {
        Value::String(s) if heuristic.matches_shape(s) => Some(node),
        Value::Object(map) => {
            let remaining = descend(remaining)?;
            map.values()
                .find_map(|child| find_by_shape(child, heuristic, remaining))
        }
        Value::Array(items) => {
            let remaining = descend(remaining)?;
            items
                .iter()
                .find_map(|item| find_by_shape(item, heuristic, remaining))
        }
        _ => None,
    }
}

fn descend(remaining: usize) -> Option<usize> {
    let next = remaining.checked_sub(1);
    if next.is_none() {
        trace!(max_depth = MAX_DEPTH, "depth limit reached, not descending");
    }
    next
}

/// Per-call mapping from canonical field name to the value located for it.
///
/// Borrows from the document; the first value inserted for a name wins.
#[derive(Debug, Clone, Default)]
pub struct LookupTable<'a> {
    entries: IndexMap<String, &'a Value>,
}

impl<'a> LookupTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `field` unless the field already has one.
    ///
    /// Returns `true` if the value was recorded.
    pub fn insert(&mut self, field: &str, value: &'a Value) -> bool {
        if self.entries.contains_key(field) {
            return false;
        }
        self.entries.insert(field.to_string(), value);
        true
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.entries.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EmailRule, PhoneRule};
    use serde_json::json;

    const BIRTH: [&str; 3] = ["birthDate", "dateOfBirth", "dob"];
    const PHONE: [&str; 4] = ["phone", "phoneNumber", "mobile", "PrimaryPhone"];

    /// Wrap `{"target": 1}` in `levels` objects.
    fn nest(levels: usize) -> Value {
        (0..levels).fold(json!({"target": 1}), |inner, _| json!({"next": inner}))
    }

    #[test]
    fn nested_alias_found() {
        let doc = json!({"person": {"dateOfBirth": "1990-01-01"}});
        assert_eq!(
            locate(&doc, "birthDate", &BIRTH, None),
            Some(&json!("1990-01-01"))
        );
    }

    #[test]
    fn shallow_match_beats_deep_match() {
        let doc = json!({
            "profile": {"birthDate": "1980-01-01"},
            "dob": "1990-01-01"
        });
        assert_eq!(
            locate(&doc, "birthDate", &BIRTH, None),
            Some(&json!("1990-01-01"))
        );
    }

    #[test]
    fn alias_priority_at_same_level() {
        let doc = json!({"dob": "1990-01-01", "birthDate": "1980-01-01"});
        assert_eq!(
            locate(&doc, "birthDate", &BIRTH, None),
            Some(&json!("1980-01-01"))
        );
    }

    #[test]
    fn children_searched_in_insertion_order() {
        let doc = json!({
            "b": {"mobile": "111-111-1111"},
            "a": {"phone": "222-222-2222"}
        });
        assert_eq!(
            locate(&doc, "phone", &PHONE, None),
            Some(&json!("111-111-1111"))
        );
    }

    #[test]
    fn arrays_searched_in_index_order() {
        let doc = json!({"contacts": [{"name": "x"}, {"phoneNumber": "555 0100 123"}]});
        assert_eq!(
            locate(&doc, "phone", &PHONE, None),
            Some(&json!("555 0100 123"))
        );
    }

    #[test]
    fn null_value_counts_as_found() {
        let doc = json!({"email": null});
        assert_eq!(locate(&doc, "email", &["email"], None), Some(&Value::Null));
    }

    #[test]
    fn heuristic_fallback_for_phone() {
        let doc = json!({"contact": {"primary": "555-123-4567"}});
        let phone = PhoneRule::default();

        assert_eq!(locate(&doc, "phone", &PHONE, None), None);
        assert_eq!(
            locate(&doc, "phone", &PHONE, Some(&phone)),
            Some(&json!("555-123-4567"))
        );
    }

    #[test]
    fn heuristic_fallback_for_email() {
        let doc = json!({"owner": ["Ada", {"contact": "ada@example.org"}]});
        assert_eq!(
            locate(&doc, "email", &["email"], Some(&EmailRule::new())),
            Some(&json!("ada@example.org"))
        );
    }

    #[test]
    fn heuristic_ignores_non_strings() {
        let doc = json!({"id": 5551234567u64});
        assert_eq!(
            locate(&doc, "phone", &PHONE, Some(&PhoneRule::default())),
            None
        );
    }

    #[test]
    fn alias_match_preferred_over_heuristic() {
        let doc = json!({"ref": "555-000-1111", "nested": {"phone": "12"}});
        assert_eq!(
            locate(&doc, "phone", &PHONE, Some(&PhoneRule::default())),
            Some(&json!("12"))
        );
    }

    #[test]
    fn scalar_root_finds_nothing() {
        assert_eq!(locate(&json!(42), "phone", &PHONE, None), None);
        assert_eq!(locate(&Value::Null, "email", &["email"], None), None);
    }

    #[test]
    fn depth_limit_boundary() {
        assert_eq!(find_by_alias(&nest(MAX_DEPTH), &["target"], MAX_DEPTH), Some(&json!(1)));
        assert_eq!(find_by_alias(&nest(MAX_DEPTH + 1), &["target"], MAX_DEPTH), None);
    }

    #[test]
    fn deep_documents_are_not_found() {
        let doc = nest(200);
        assert_eq!(locate(&doc, "target", &["target"], None), None);
    }

    #[test]
    fn lookup_table_first_wins() {
        let first = json!("first");
        let second = json!("second");
        let mut lookup = LookupTable::new();

        assert!(lookup.insert("email", &first));
        assert!(!lookup.insert("email", &second));
        assert_eq!(lookup.get("email"), Some(&first));
        assert_eq!(lookup.len(), 1);
    }
}
