//! Tagged entity identifiers.
//!
//! Every node of a layout tree carries an id of the form `<tag>_<suffix>`. The suffix is the
//! creation time in milliseconds (12 hex digits) followed by 64 random bits, so ids sort
//! roughly by creation time and collide only with negligible probability. They are not meant
//! to be unguessable.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Something with a type tag and a unique id.
pub trait Entity {
    /// Type tag, also the prefix of every id of this type.
    const TAG: &'static str;

    fn id(&self) -> &EntityId;
}

/// Unique, tagged identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh id for an entity of type `tag`.
    pub fn generate(tag: &str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis());
        // 48 bits of milliseconds last until the year 10889.
        let millis = (millis & 0xffff_ffff_ffff) as u64;
        Self(format!("{tag}_{millis:012x}{:016x}", fastrand::u64(..)))
    }

    /// Accepts `raw` if it is a well-formed id for an entity of type `tag`.
    pub fn parse(tag: &str, raw: &str) -> Option<Self> {
        let suffix = raw.strip_prefix(tag)?.strip_prefix('_')?;
        if suffix.is_empty() {
            return None;
        }
        Some(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag prefix of this id.
    pub fn tag(&self) -> &str {
        self.0.split_once('_').map_or(&*self.0, |(tag, _)| tag)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_carry_their_tag() {
        let id = EntityId::generate("window");
        assert!(id.as_str().starts_with("window_"), "{id}");
        assert_eq!(id.tag(), "window");
        assert_eq!(id.as_str().len(), "window_".len() + 12 + 16);
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<_> = (0..10_000).map(|_| EntityId::generate("stack")).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn generated_ids_parse_back() {
        let id = EntityId::generate("tree");
        assert_eq!(EntityId::parse("tree", id.as_str()), Some(id));
    }

    #[test]
    fn parse_rejects_foreign_or_empty_ids() {
        assert_eq!(EntityId::parse("window", "stack_abc"), None);
        assert_eq!(EntityId::parse("window", "window_"), None);
        assert_eq!(EntityId::parse("window", "window"), None);
        assert_eq!(EntityId::parse("window", "windowed_abc"), None);
        assert!(EntityId::parse("window", "window_abc").is_some());
    }
}
