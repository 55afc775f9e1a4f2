//! Structural verification run before any mutation
//!
//! Every operation starts here, inside its transaction: the manifest and the
//! two set keys must each be absent or of the expected storage type, and a
//! present manifest must carry the recognized version. All-absent is a valid
//! empty queue. Because this runs before the first mutating primitive, a
//! rejected operation leaves the store untouched.

use crate::error::{Error, Result};
use crate::keys::IckKeys;
use ick_store::{KeyType, StoreTxn};

/// Checks the queue's structure, returning the manifest value if present.
pub(crate) fn check<T: StoreTxn>(
    txn: &mut T,
    keys: &IckKeys,
    version: &str,
) -> Result<Option<String>> {
    let manifest_type = txn.key_type(&keys.manifest)?;
    if !matches!(manifest_type, KeyType::None | KeyType::Str) {
        return Err(Error::Corruption {
            key: keys.manifest.clone(),
            expected: KeyType::Str,
            found: manifest_type,
        });
    }

    let pset_type = txn.key_type(&keys.pset)?;
    if !matches!(pset_type, KeyType::None | KeyType::Zset) {
        return Err(Error::Corruption {
            key: keys.pset.clone(),
            expected: KeyType::Zset,
            found: pset_type,
        });
    }

    let cset_type = txn.key_type(&keys.cset)?;
    if !matches!(cset_type, KeyType::None | KeyType::Zset) {
        return Err(Error::Corruption {
            key: keys.cset.clone(),
            expected: KeyType::Zset,
            found: cset_type,
        });
    }

    let manifest = txn.get(&keys.manifest)?;
    if let Some(found) = &manifest
        && found != version
    {
        return Err(Error::UnrecognizedVersion {
            key: keys.manifest.clone(),
            expected: version.to_string(),
            found: found.clone(),
        });
    }

    if manifest.is_none() {
        if pset_type != KeyType::None {
            return Err(Error::OrphanedSet {
                key: keys.pset.clone(),
                manifest: keys.manifest.clone(),
            });
        }
        if cset_type != KeyType::None {
            return Err(Error::OrphanedSet {
                key: keys.cset.clone(),
                manifest: keys.manifest.clone(),
            });
        }
    }

    Ok(manifest)
}
