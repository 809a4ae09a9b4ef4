use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Business policy knobs for the lead workflow.
///
/// `commission_per_conversion` is the flat amount credited per converted
/// lead when estimating revenue; real commission would be price-dependent,
/// but the flat-rate contract is deliberate. `strict_transitions` switches
/// the status state machine from the permissive default to the
/// regression-forbidding variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPolicy {
    pub commission_per_conversion: i64,
    pub strict_transitions: bool,
}

impl Default for LeadPolicy {
    fn default() -> Self {
        Self {
            commission_per_conversion: 50,
            strict_transitions: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct UserSettings {
    lead_policy: LeadPolicy,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn lead_policy(&self) -> LeadPolicy {
        self.data.read().unwrap().lead_policy.clone()
    }

    pub fn update_lead_policy(&self, policy: LeadPolicy) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.lead_policy = policy;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_policy() {
        let policy = LeadPolicy::default();
        assert_eq!(policy.commission_per_conversion, 50);
        assert!(!policy.strict_transitions);
    }

    #[test]
    fn updated_policy_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_lead_policy(LeadPolicy {
                commission_per_conversion: 75,
                strict_transitions: true,
            })
            .unwrap();

        let reloaded = SettingsStore::new(path).unwrap();
        let policy = reloaded.lead_policy();
        assert_eq!(policy.commission_per_conversion, 75);
        assert!(policy.strict_transitions);
    }
}
