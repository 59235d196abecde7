//! Program registry.
//!
//! Program addresses are always injected by the integrator; none are
//! hardcoded here.

use crate::error::{require_non_empty, ErrorCode, Result, ThreeiumError};
use crate::types::Pubkey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramAddress {
    /// Logical name used by the integrator
    pub name: String,
    /// Program address
    pub program_id: Pubkey,
}

#[derive(Debug, Clone, Default)]
pub struct ProgramRegistry {
    by_name: BTreeMap<String, Pubkey>,
}

impl ProgramRegistry {
    pub fn new(entries: Vec<ProgramAddress>) -> Result<Self> {
        let mut by_name = BTreeMap::new();

        for entry in entries {
            require_non_empty(
                &entry.name,
                ErrorCode::ProgramNameRequired,
                "Program name is required",
            )?;
            if by_name.contains_key(&entry.name) {
                return Err(ThreeiumError::integrity(
                    ErrorCode::ProgramNameDuplicate,
                    "Duplicate program name in registry",
                )
                .with_detail("name", entry.name));
            }
            by_name.insert(entry.name, entry.program_id);
        }

        Ok(Self { by_name })
    }

    /// Program id by name.
    pub fn get(&self, name: &str) -> Result<Pubkey> {
        require_non_empty(name, ErrorCode::ProgramNameRequired, "Program name is required")?;
        self.by_name.get(name).copied().ok_or_else(|| {
            ThreeiumError::integrity(ErrorCode::ProgramNotFound, "Program not found in registry")
                .with_detail("name", name)
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All entries, sorted by name.
    pub fn list(&self) -> Vec<ProgramAddress> {
        self.by_name
            .iter()
            .map(|(name, program_id)| ProgramAddress {
                name: name.clone(),
                program_id: *program_id,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, program_id: Pubkey) -> ProgramAddress {
        ProgramAddress {
            name: name.to_string(),
            program_id,
        }
    }

    #[test]
    fn test_lookup_and_sorted_list() {
        let swap = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let registry =
            ProgramRegistry::new(vec![entry("vault", vault), entry("swap", swap)]).unwrap();

        assert_eq!(registry.get("swap").unwrap(), swap);
        assert!(registry.has("vault"));
        assert!(!registry.has("oracle"));

        let names: Vec<_> = registry.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["swap", "vault"]);
    }

    #[test]
    fn test_duplicate_and_missing() {
        let err = ProgramRegistry::new(vec![
            entry("swap", Pubkey::new_unique()),
            entry("swap", Pubkey::new_unique()),
        ])
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProgramNameDuplicate);

        let registry = ProgramRegistry::new(vec![]).unwrap();
        assert_eq!(registry.get("swap").unwrap_err().code(), ErrorCode::ProgramNotFound);
        assert_eq!(registry.get("").unwrap_err().code(), ErrorCode::ProgramNameRequired);
        assert!(registry.is_empty());
    }
}
