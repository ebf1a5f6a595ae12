use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which locator field a capture carries.
///
/// Older captures describe geometry as a rectangle (`bounds`), newer ones as a
/// center point (`position`). A session works with exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    #[default]
    Bounds,
    Position,
}

impl LocatorKind {
    /// Name of the field in the wire record.
    pub fn field_name(self) -> &'static str {
        match self {
            LocatorKind::Bounds => "bounds",
            LocatorKind::Position => "position",
        }
    }

    /// Label used when presenting the locator to the operator.
    pub fn label(self) -> &'static str {
        match self {
            LocatorKind::Bounds => "Bounds",
            LocatorKind::Position => "Position",
        }
    }

    pub fn wrap(self, value: String) -> Locator {
        match self {
            LocatorKind::Bounds => Locator::Bounds(value),
            LocatorKind::Position => Locator::Position(value),
        }
    }
}

impl FromStr for LocatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounds" => Ok(LocatorKind::Bounds),
            "position" => Ok(LocatorKind::Position),
            other => Err(format!("Unknown locator kind: {}", other)),
        }
    }
}

/// Geometry of an element: `[x1,y1][x2,y2]` or `x:y`.
///
/// Serialized flattened into the element, so the wire field name follows the
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    Bounds(String),
    Position(String),
}

impl Locator {
    pub fn kind(&self) -> LocatorKind {
        match self {
            Locator::Bounds(_) => LocatorKind::Bounds,
            Locator::Position(_) => LocatorKind::Position,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Locator::Bounds(s) | Locator::Position(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical UI-inspection record. Only the normalizer builds these from
/// external input, so every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub class: String,
    pub id: String,
    pub text: String,
    pub description: String,
    #[serde(flatten)]
    pub locator: Locator,
    pub clickable: bool,
    pub editable: bool,
    pub checkable: bool,
}

impl Element {
    pub fn new(class: impl Into<String>, locator: Locator) -> Self {
        Self {
            class: class.into(),
            id: String::new(),
            text: String::new(),
            description: String::new(),
            locator,
            clickable: false,
            editable: false,
            checkable: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn widget_type(&self) -> &str {
        widget_type(&self.class)
    }
}

/// Leaf segment of a dotted class name (`android.widget.Button` -> `Button`).
/// Falls back to the whole name when the leaf is empty.
pub fn widget_type(class: &str) -> &str {
    match class.rsplit('.').next() {
        Some(leaf) if !leaf.is_empty() => leaf,
        _ => class,
    }
}

/// Opaque identity handed out when an element enters the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementKey(Uuid);

impl ElementKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An element as held by the store.
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: ElementKey,
    pub added_at: DateTime<Utc>,
    pub element: Element,
}

impl Entry {
    pub fn new(element: Element) -> Self {
        Self {
            key: ElementKey::new(),
            added_at: Utc::now(),
            element,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_type_takes_last_segment() {
        assert_eq!(widget_type("android.widget.SeekBar"), "SeekBar");
        assert_eq!(widget_type("NoDotsHere"), "NoDotsHere");
    }

    #[test]
    fn widget_type_keeps_class_when_leaf_is_empty() {
        assert_eq!(widget_type("android.widget."), "android.widget.");
        assert_eq!(widget_type(""), "");
    }

    #[test]
    fn locator_kind_parses_case_insensitively() {
        assert_eq!("Position".parse::<LocatorKind>(), Ok(LocatorKind::Position));
        assert_eq!("bounds".parse::<LocatorKind>(), Ok(LocatorKind::Bounds));
        assert!("center".parse::<LocatorKind>().is_err());
    }

    #[test]
    fn element_serializes_to_wire_shape() {
        let el = Element::new("a.B", Locator::Position("5:5".into())).with_text("OK");
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["position"], "5:5");
        assert_eq!(json["text"], "OK");
        assert_eq!(json["clickable"], false);
        assert!(json.get("bounds").is_none());
        assert!(json.get("locator").is_none());
    }

    #[test]
    fn entries_get_distinct_keys() {
        let el = Element::new("a.B", Locator::Bounds("[0,0][1,1]".into()));
        let a = Entry::new(el.clone());
        let b = Entry::new(el);
        assert_ne!(a.key, b.key);
    }
}
