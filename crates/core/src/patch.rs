//! Partial-update field values.
//!
//! A [`Patch`] records whether the caller supplied a field at all, which is
//! different from supplying an empty value. Merging a patch onto the stored
//! value never inspects the new value's contents, so a legitimately empty
//! string replaces the old value instead of being treated as "not given".
//!
//! As a JSON field, a `Patch` is `Keep` when the key is absent (the field
//! needs `#[serde(default)]`) and `Set` when present, so for
//! `Patch<Option<T>>` an explicit `null` means "clear".

use serde::{Deserialize, Deserializer};

/// A single field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The caller omitted the field; keep the stored value.
    #[default]
    Keep,
    /// The caller supplied the field; overwrite the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Resolve the patch against the currently stored value.
    pub fn apply(self, current: T) -> T {
        match self {
            Patch::Keep => current,
            Patch::Set(value) => value,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    /// Borrow the supplied value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Keep => None,
            Patch::Set(value) => Some(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    /// `None` means "omitted", `Some(v)` means "set to `v`".
    fn from(value: Option<T>) -> Self {
        match value {
            None => Patch::Keep,
            Some(v) => Patch::Set(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        origin: Patch<Option<String>>,
    }

    #[test]
    fn json_absent_key_keeps_and_null_clears() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.origin, Patch::Keep);

        let null: Body = serde_json::from_str(r#"{"origin": null}"#).unwrap();
        assert_eq!(null.origin, Patch::Set(None));

        let value: Body = serde_json::from_str(r#"{"origin": "USA"}"#).unwrap();
        assert_eq!(value.origin, Patch::Set(Some("USA".to_string())));
    }

    #[test]
    fn keep_returns_current_value() {
        let patch: Patch<Option<String>> = Patch::Keep;
        assert_eq!(patch.apply(Some("octocat".into())), Some("octocat".into()));
    }

    #[test]
    fn set_overwrites_even_with_empty_string() {
        let patch = Patch::Set(Some(String::new()));
        assert_eq!(patch.apply(Some("old bio".into())), Some(String::new()));
    }

    #[test]
    fn set_none_clears_value() {
        let patch: Patch<Option<String>> = Patch::Set(None);
        assert_eq!(patch.apply(Some("old".into())), None);
    }

    #[test]
    fn from_option_distinguishes_omitted() {
        assert_eq!(Patch::<String>::from(None), Patch::Keep);
        assert_eq!(Patch::from(Some("x".to_string())), Patch::Set("x".to_string()));
    }

    #[test]
    fn map_preserves_keep() {
        let patch: Patch<String> = Patch::Keep;
        assert_eq!(patch.map(|s| s.len()), Patch::Keep);
        assert_eq!(Patch::Set("abc".to_string()).map(|s| s.len()), Patch::Set(3));
    }

    #[test]
    fn as_set_and_is_set() {
        let patch = Patch::Set(5);
        assert!(patch.is_set());
        assert_eq!(patch.as_set(), Some(&5));
        assert!(!Patch::<i32>::Keep.is_set());
    }
}
