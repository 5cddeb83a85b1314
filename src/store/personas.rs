//! JSON-backed persona store.
//!
//! Personas live in one JSON object keyed by id, loaded into memory at
//! startup and rewritten on every mutation. Writes go through a temp file
//! rename, with a `.backup` copy of the previous contents kept for
//! recovery.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{BrazilState, Persona, PersonaDraft, PersonaUpdate, ReadinessLevel};

/// Optional filters for persona listing.
#[derive(Debug, Clone, Default)]
pub struct PersonaFilter {
    pub location_state: Option<BrazilState>,
    pub readiness_level: Option<ReadinessLevel>,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    /// Case-insensitive free-text match over name, location, interests,
    /// and goals.
    pub query: Option<String>,
}

impl PersonaFilter {
    fn matches(&self, persona: &Persona) -> bool {
        if let Some(state) = self.location_state {
            if persona.profile.location_state != state {
                return false;
            }
        }
        if let Some(level) = self.readiness_level {
            if persona.profile.readiness_level != level {
                return false;
            }
        }
        if let Some(min) = self.age_min {
            if persona.profile.age < min {
                return false;
            }
        }
        if let Some(max) = self.age_max {
            if persona.profile.age > max {
                return false;
            }
        }
        if let Some(ref query) = self.query {
            if !matches_query(persona, &query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

fn matches_query(persona: &Persona, query: &str) -> bool {
    let profile = &persona.profile;
    profile.name.to_lowercase().contains(query)
        || profile.location_city.to_lowercase().contains(query)
        || profile.location_state.uf().to_lowercase().contains(query)
        || profile
            .green_interests
            .iter()
            .any(|i| i.slug().contains(query))
        || profile
            .career_goals
            .iter()
            .any(|g| g.to_lowercase().contains(query))
}

/// In-memory persona map persisted to a single JSON file.
pub struct PersonaStore {
    path: PathBuf,
    personas: RwLock<HashMap<Uuid, Persona>>,
}

impl PersonaStore {
    /// Open the store, loading any existing file.
    ///
    /// A corrupted file is an error; the `.backup` from the last write sits
    /// next to it for manual recovery.
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            super::ensure_data_dir(parent)?;
        }

        let personas = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            let map: HashMap<Uuid, Persona> =
                serde_json::from_str(&content).map_err(|e| Error::StorageCorrupted {
                    path: path.clone(),
                    source: e,
                })?;
            info!(count = map.len(), path = %path.display(), "Loaded personas from storage");
            map
        } else {
            debug!(path = %path.display(), "No persona file yet, starting empty");
            HashMap::new()
        };

        Ok(Self {
            path,
            personas: RwLock::new(personas),
        })
    }

    /// Persist the current map: back up the live file, write a temp file,
    /// rename it into place.
    fn save(&self, personas: &HashMap<Uuid, Persona>) -> Result<()> {
        let json = serde_json::to_string_pretty(personas)
            .map_err(|e| Error::storage_write(&self.path, e.to_string()))?;

        if self.path.exists() {
            let backup = self.path.with_extension("json.backup");
            if let Err(e) = fs::copy(&self.path, &backup) {
                warn!(error = %e, "Could not write persona backup file");
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::storage_write(&tmp, e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::storage_write(&self.path, e.to_string()))?;

        debug!(count = personas.len(), "Saved personas to storage");
        Ok(())
    }

    /// Create a persona from a draft. The draft is validated first.
    pub fn create(&self, draft: PersonaDraft) -> Result<Persona> {
        draft.validate()?;
        let persona = Persona::from_draft(draft);

        let mut personas = self.personas.write();
        personas.insert(persona.id, persona.clone());
        self.save(&personas)?;

        info!(persona_id = %persona.id, "Created persona");
        Ok(persona)
    }

    /// Look up a persona by id.
    pub fn get(&self, id: Uuid) -> Option<Persona> {
        self.personas.read().get(&id).cloned()
    }

    /// List personas, newest first, with filters and pagination.
    pub fn list(&self, filter: &PersonaFilter, limit: usize, offset: usize) -> Vec<Persona> {
        let personas = self.personas.read();
        let mut matched: Vec<Persona> = personas
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.into_iter().skip(offset).take(limit).collect()
    }

    /// Apply a partial update, bumping `updated_at`.
    pub fn update(&self, id: Uuid, update: PersonaUpdate) -> Result<Persona> {
        let mut personas = self.personas.write();
        let persona = personas
            .get_mut(&id)
            .ok_or_else(|| Error::persona_not_found(id.to_string()))?;

        update.apply(&mut persona.profile)?;
        persona.updated_at = chrono::Utc::now();
        let updated = persona.clone();

        self.save(&personas)?;
        info!(persona_id = %id, "Updated persona");
        Ok(updated)
    }

    /// Bump the interaction counters for a persona.
    pub fn record_interaction(&self, id: Uuid) -> Result<()> {
        let mut personas = self.personas.write();
        let persona = personas
            .get_mut(&id)
            .ok_or_else(|| Error::persona_not_found(id.to_string()))?;
        persona.touch_interaction();
        self.save(&personas)
    }

    /// Delete a persona. Returns false if it did not exist.
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let mut personas = self.personas.write();
        if personas.remove(&id).is_none() {
            return Ok(false);
        }
        self.save(&personas)?;
        info!(persona_id = %id, "Deleted persona");
        Ok(true)
    }

    /// Total stored personas.
    pub fn count(&self) -> usize {
        self.personas.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, PersonaStore) {
        let dir = TempDir::new().unwrap();
        let store = PersonaStore::open(dir.path().join("personas.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_and_get() {
        let (_dir, store) = store();
        let persona = store.create(PersonaDraft::anonymous()).unwrap();

        let fetched = store.get(persona.id).unwrap();
        assert_eq!(fetched.profile.name, "Jovem Anônimo");
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let (_dir, store) = store();
        let mut draft = PersonaDraft::anonymous();
        draft.age = 30;
        assert!(store.create(draft).is_err());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_persistence_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("personas.json");

        let id = {
            let store = PersonaStore::open(path.clone()).unwrap();
            store.create(PersonaDraft::anonymous()).unwrap().id
        };

        let reopened = PersonaStore::open(path).unwrap();
        assert!(reopened.get(id).is_some());
    }

    #[test]
    fn test_backup_created_on_second_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("personas.json");
        let store = PersonaStore::open(path.clone()).unwrap();

        store.create(PersonaDraft::anonymous()).unwrap();
        store.create(PersonaDraft::anonymous()).unwrap();

        assert!(dir.path().join("personas.json.backup").exists());
    }

    #[test]
    fn test_update() {
        let (_dir, store) = store();
        let persona = store.create(PersonaDraft::anonymous()).unwrap();

        let update = PersonaUpdate {
            name: Some("Maria".to_string()),
            ..Default::default()
        };
        let updated = store.update(persona.id, update).unwrap();
        assert_eq!(updated.profile.name, "Maria");
        assert!(updated.updated_at >= persona.updated_at);
    }

    #[test]
    fn test_rejected_update_leaves_stored_persona_unchanged() {
        let (_dir, store) = store();
        let persona = store.create(PersonaDraft::anonymous()).unwrap();

        let update = PersonaUpdate {
            name: Some("Maria".to_string()),
            age: Some(99),
            ..Default::default()
        };
        assert!(store.update(persona.id, update).is_err());

        let fetched = store.get(persona.id).unwrap();
        assert_eq!(fetched.profile.name, "Jovem Anônimo");
        assert_eq!(fetched.profile.age, 20);
        assert_eq!(fetched.updated_at, persona.updated_at);
    }

    #[test]
    fn test_update_missing_persona() {
        let (_dir, store) = store();
        let err = store
            .update(Uuid::new_v4(), PersonaUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::PersonaNotFound { .. }));
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = store();
        let persona = store.create(PersonaDraft::anonymous()).unwrap();

        assert!(store.delete(persona.id).unwrap());
        assert!(!store.delete(persona.id).unwrap());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_list_filters_and_pagination() {
        let (_dir, store) = store();

        let mut draft = PersonaDraft::anonymous();
        draft.location_state = BrazilState::BA;
        store.create(draft).unwrap();
        store.create(PersonaDraft::anonymous()).unwrap();
        store.create(PersonaDraft::anonymous()).unwrap();

        let filter = PersonaFilter {
            location_state: Some(BrazilState::SP),
            ..Default::default()
        };
        assert_eq!(store.list(&filter, 50, 0).len(), 2);
        assert_eq!(store.list(&PersonaFilter::default(), 2, 0).len(), 2);
        assert_eq!(store.list(&PersonaFilter::default(), 50, 2).len(), 1);
    }

    #[test]
    fn test_query_filter() {
        let (_dir, store) = store();
        let mut draft = PersonaDraft::anonymous();
        draft.name = "Carlos".to_string();
        draft.location_city = "Fortaleza".to_string();
        store.create(draft).unwrap();
        store.create(PersonaDraft::anonymous()).unwrap();

        let by_query = |q: &str| {
            let filter = PersonaFilter {
                query: Some(q.to_string()),
                ..Default::default()
            };
            store.list(&filter, 50, 0)
        };

        assert_eq!(by_query("fortaleza").len(), 1);
        assert_eq!(by_query("CARLOS").len(), 1);
        assert!(by_query("recife").is_empty());
    }

    #[test]
    fn test_record_interaction() {
        let (_dir, store) = store();
        let persona = store.create(PersonaDraft::anonymous()).unwrap();

        store.record_interaction(persona.id).unwrap();
        store.record_interaction(persona.id).unwrap();

        let fetched = store.get(persona.id).unwrap();
        assert_eq!(fetched.interaction_count, 2);
        assert!(fetched.last_interaction.is_some());
    }
}
