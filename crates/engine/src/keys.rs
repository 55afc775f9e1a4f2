//! Key derivation for the three records of a queue
//!
//! The manifest lives at the logical name itself; the producer and consumer
//! sets live at keys derived from it. The derived keys embed the name inside
//! `{...}`, the hash-partition tag the store's sharding scheme recognizes, so
//! all three keys always map to the same partition. This only holds when the
//! name contains no tag delimiters of its own; such names are rejected at
//! validation.

/// The three storage keys derived from one logical queue name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IckKeys {
    /// The version-marker string key; also the logical name.
    pub manifest: String,
    /// The producer set: freshly added, unreserved work.
    pub pset: String,
    /// The consumer set: work currently reserved for processing.
    pub cset: String,
}

impl IckKeys {
    pub fn derive(queue: &str) -> Self {
        Self {
            manifest: queue.to_string(),
            pset: format!("{queue}/ick/{{{queue}}}/pset"),
            cset: format!("{queue}/ick/{{{queue}}}/cset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_pattern() {
        let keys = IckKeys::derive("jobs");
        assert_eq!(keys.manifest, "jobs");
        assert_eq!(keys.pset, "jobs/ick/{jobs}/pset");
        assert_eq!(keys.cset, "jobs/ick/{jobs}/cset");
    }

    #[test]
    fn test_derived_keys_share_one_hash_tag() {
        let keys = IckKeys::derive("dirty-contacts");
        for key in [&keys.pset, &keys.cset] {
            let open = key.find('{').unwrap();
            let close = key.find('}').unwrap();
            assert_eq!(&key[open + 1..close], "dirty-contacts");
        }
    }
}
