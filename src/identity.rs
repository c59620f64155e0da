// 🔑 Identity Resolver - content-addressed identifiers
//
// id = SHA-256("{normalized name} - {discriminator}")
//
// There is no registry: two tables that mention the same normalized name with
// the same discriminator compute the same id and meet on one graph node.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

// ============================================================================
// DISCRIMINATOR
// ============================================================================

/// Category token mixed into every entity hash so that a person and an
/// exhibition that share a name never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Discriminator {
    Person,
    Group,
    HumanActant,
    Institution,
    WorkManifestation,
    Exhibition,
    Catalog,
    Company,
    Settlement,
    Region,
    Country,
    Place,
}

impl Discriminator {
    pub fn token(&self) -> &'static str {
        match self {
            Discriminator::Person => "person",
            Discriminator::Group => "group",
            Discriminator::HumanActant => "human actant",
            Discriminator::Institution => "institution",
            Discriminator::WorkManifestation => "work manifestation",
            Discriminator::Exhibition => "exhibition",
            Discriminator::Catalog => "catalog",
            Discriminator::Company => "company",
            Discriminator::Settlement => "settlement",
            Discriminator::Region => "region",
            Discriminator::Country => "country",
            Discriminator::Place => "place",
        }
    }
}

// ============================================================================
// ENTITY ID
// ============================================================================

/// 64-char lower-hex SHA-256 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn digest(input: &str) -> EntityId {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    EntityId(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve a normalized name to its identifier.
///
/// Empty names and names carrying control characters are rejected: a wrong id
/// silently merges unrelated entities, so the run must stop instead.
pub fn resolve(normalized_name: &str, discriminator: Discriminator) -> Result<EntityId> {
    if normalized_name.trim().is_empty() {
        return Err(Error::Identity(format!(
            "empty name for discriminator '{}'",
            discriminator.token()
        )));
    }

    if normalized_name.chars().any(char::is_control) {
        return Err(Error::Identity(format!(
            "control character in name {:?} ({})",
            normalized_name,
            discriminator.token()
        )));
    }

    Ok(digest(&format!(
        "{} - {}",
        normalized_name,
        discriminator.token()
    )))
}

/// Time nodes are addressed by their label alone ("1980", "1980-06-15")
pub fn hash_label(label: &str) -> EntityId {
    digest(label)
}

/// Identifier for a reified node: kind token followed by the ids it is scoped to.
pub fn scoped(kind: &str, parts: &[&EntityId]) -> EntityId {
    let mut input = kind.to_string();
    for part in parts {
        input.push_str(" - ");
        input.push_str(part.as_str());
    }
    digest(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::clean_name;

    #[test]
    fn test_resolve_is_deterministic() {
        let a = resolve("Ada Lovelace", Discriminator::Person).unwrap();
        let b = resolve("Ada Lovelace", Discriminator::Person).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64, "SHA-256 hex should be 64 characters");
    }

    #[test]
    fn test_identity_merge_after_normalization() {
        let first = clean_name(" Ada Lovelace ").unwrap();
        let second = clean_name("ada lovelace").unwrap();

        assert_eq!(
            resolve(&first, Discriminator::Person).unwrap(),
            resolve(&second, Discriminator::Person).unwrap()
        );
    }

    #[test]
    fn test_discriminator_separates_categories() {
        let person = resolve("Equipo 57", Discriminator::Person).unwrap();
        let group = resolve("Equipo 57", Discriminator::Group).unwrap();
        let exhibition = resolve("Equipo 57", Discriminator::Exhibition).unwrap();

        assert_ne!(person, group);
        assert_ne!(group, exhibition);
    }

    #[test]
    fn test_known_digest() {
        // sha256("a - person")
        let id = resolve("a", Discriminator::Person).unwrap();
        let mut hasher = Sha256::new();
        hasher.update(b"a - person");
        assert_eq!(id.as_str(), format!("{:x}", hasher.finalize()));
    }

    #[test]
    fn test_resolve_fails_loudly() {
        assert!(matches!(
            resolve("", Discriminator::Person),
            Err(Error::Identity(_))
        ));
        assert!(matches!(
            resolve("   ", Discriminator::Catalog),
            Err(Error::Identity(_))
        ));
        assert!(matches!(
            resolve("Bad\u{0}Name", Discriminator::Catalog),
            Err(Error::Identity(_))
        ));
    }

    #[test]
    fn test_scoped_depends_on_every_part() {
        let p = resolve("Ada Lovelace", Discriminator::Person).unwrap();
        let e1 = resolve("Expo Uno", Discriminator::Exhibition).unwrap();
        let e2 = resolve("Expo Dos", Discriminator::Exhibition).unwrap();

        assert_ne!(scoped("curator", &[&p, &e1]), scoped("curator", &[&p, &e2]));
        assert_ne!(scoped("curator", &[&p, &e1]), scoped("organizer", &[&p, &e1]));
        assert_eq!(scoped("curator", &[&p, &e1]), scoped("curator", &[&p, &e1]));
    }
}
