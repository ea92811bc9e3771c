/// The scope a [`SelectionKey`] is rooted in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub enum SelectionKeyType {
    /// Rooted at an operation.
    Query,

    /// Rooted at a named fragment (or its default implementation).
    Fragment,
}

/// Identifies one logical path through which a [`Field`](crate::ir::Field)
/// or [`Fragment`](crate::ir::Fragment) is reachable.
///
/// A key is an ordered, non-empty list of path segments (the first being
/// the root) plus a [`SelectionKeyType`]. The same selection is frequently
/// reachable through several paths at once (e.g. through an operation and
/// through a named fragment spread into it); the set of keys on a node tells
/// the code generator which generated interfaces its model must implement.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase", try_from = "SelectionKeyData")]
pub struct SelectionKey {
    key_type: SelectionKeyType,
    segments: Vec<String>,
}
impl SelectionKey {
    pub fn new(root: impl Into<String>, key_type: SelectionKeyType) -> Self {
        Self {
            key_type,
            segments: vec![root.into()],
        }
    }

    pub fn key_type(&self) -> SelectionKeyType {
        self.key_type
    }

    pub fn root(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// All path segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether `prefix` is this key's type and a leading run of its segments.
    pub fn starts_with(&self, prefix: &SelectionKey) -> bool {
        self.key_type == prefix.key_type
            && self.segments.starts_with(&prefix.segments)
    }

    /// If this key [starts with](Self::starts_with) `prefix`, a new key made
    /// of `replacement` followed by the rest of this key's segments.
    pub fn with_prefix_replaced(
        &self,
        prefix: &SelectionKey,
        replacement: &SelectionKey,
    ) -> Option<Self> {
        if !self.starts_with(prefix) {
            return None;
        }
        let mut segments = replacement.segments.to_owned();
        segments.extend_from_slice(&self.segments[prefix.segments.len()..]);
        Some(Self {
            key_type: replacement.key_type,
            segments,
        })
    }

    /// A new key with only the root segment replaced.
    pub fn with_root_replaced(&self, root: impl Into<String>) -> Self {
        let mut segments = self.segments.to_owned();
        if let Some(first) = segments.first_mut() {
            *first = root.into();
        }
        Self {
            key_type: self.key_type,
            segments,
        }
    }

    /// A new key one step deeper.
    pub fn with_segment(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.to_owned();
        segments.push(segment.into());
        Self {
            key_type: self.key_type,
            segments,
        }
    }
}
impl std::fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}:{}", self.key_type, self.segments.join("."))
    }
}

/// Unchecked wire form of a [`SelectionKey`].
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionKeyData {
    key_type: SelectionKeyType,
    segments: Vec<String>,
}
impl TryFrom<SelectionKeyData> for SelectionKey {
    type Error = String;

    fn try_from(data: SelectionKeyData) -> Result<Self, Self::Error> {
        if data.segments.is_empty() {
            return Err("a selection key needs at least a root segment".to_string());
        }
        Ok(Self {
            key_type: data.key_type,
            segments: data.segments,
        })
    }
}
