// src/config/registry.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use super::builtin;
use super::layout::{TableLayout, TableSelector};
use super::policy::{NoCallRule, UnitConventionPolicy};
use super::variants::FieldVariantTable;
use crate::error::ConfigError;
use crate::process::utils::normalize_header;
use crate::schema::field::{CanonicalField, Field};

/// Everything the pipeline knows about one issuing bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Lower-case source key, also the issuer fallback.
    pub key: String,
    /// Substrings of a sender address that identify this source.
    #[serde(default)]
    pub sender_patterns: Vec<String>,
    pub table: TableSelector,
    #[serde(default)]
    pub layout: TableLayout,
    pub variants: FieldVariantTable,
    pub conventions: UnitConventionPolicy,
}

impl SourceProfile {
    /// Profile for documents from no configured source: canonical spellings,
    /// no conversions, largest table.
    pub fn generic() -> Self {
        SourceProfile {
            key: "generic".to_string(),
            sender_patterns: Vec::new(),
            table: TableSelector::FirstWithRows { min_rows: 2 },
            layout: TableLayout::default(),
            variants: FieldVariantTable::identity(),
            conventions: UnitConventionPolicy::new(NoCallRule::DirectPeriods),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variants.is_empty() {
            return Err(ConfigError::EmptyVariants(self.key.clone()));
        }

        let mut claimed: HashMap<String, Field> = HashMap::new();
        for entry in self.variants.iter() {
            for variant in &entry.variants {
                let header = normalize_header(variant, self.layout.fold_header_hyphens);
                match claimed.get(&header) {
                    Some(first) if *first != entry.field => {
                        return Err(ConfigError::AmbiguousVariant {
                            source_key: self.key.clone(),
                            header,
                            first: first.as_str().to_string(),
                            second: entry.field.as_str().to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        claimed.insert(header, entry.field);
                    }
                }
            }
        }

        if self.conventions.no_call == NoCallRule::FirstCallMonth
            && self.conventions.fallback_frequency_months.is_none()
            && !self.variants.declares(CanonicalField::AutocallFrequency.into())
        {
            return Err(ConfigError::MissingFrequency(self.key.clone()));
        }

        if let TableSelector::HeaderKeywords { keywords, .. } = &self.table {
            if keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::EmptyKeywords(self.key.clone()));
            }
        }

        for capture in &self.layout.captures {
            if capture.pattern.regex().captures_len() < 2 {
                return Err(ConfigError::BadCapture {
                    source_key: self.key.clone(),
                    message: format!("`{}` has no capture group", capture.pattern.as_str()),
                });
            }
        }

        Ok(())
    }

    pub fn matches_sender(&self, sender: &str) -> bool {
        let sender = sender.to_lowercase();
        self.sender_patterns
            .iter()
            .any(|p| !p.is_empty() && sender.contains(&p.to_lowercase()))
    }
}

/// On-disk registry file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Layer `sources` over the built-in profiles instead of replacing them.
    #[serde(default = "default_true")]
    pub extend_builtin: bool,
    #[serde(default)]
    pub sources: Vec<SourceProfile>,
}

fn default_true() -> bool {
    true
}

static BUILTIN: Lazy<SourceRegistry> = Lazy::new(|| {
    SourceRegistry::new(builtin::profiles()).expect("built-in source profiles are valid")
});

/// Immutable, validated set of source profiles. Declaration order is the
/// order sender patterns are tried in.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    profiles: Vec<SourceProfile>,
    by_key: HashMap<String, usize>,
}

impl SourceRegistry {
    pub fn new(profiles: Vec<SourceProfile>) -> Result<Self, ConfigError> {
        let mut by_key = HashMap::with_capacity(profiles.len());
        let mut normalized = Vec::with_capacity(profiles.len());
        for mut profile in profiles {
            profile.key = profile.key.trim().to_lowercase();
            profile.validate()?;
            if by_key.insert(profile.key.clone(), normalized.len()).is_some() {
                return Err(ConfigError::DuplicateSource(profile.key));
            }
            normalized.push(profile);
        }
        Ok(Self {
            profiles: normalized,
            by_key,
        })
    }

    /// The compiled-in profiles for every supported bank.
    pub fn builtin() -> &'static SourceRegistry {
        &BUILTIN
    }

    pub fn get(&self, key: &str) -> Option<&SourceProfile> {
        self.by_key
            .get(&key.trim().to_lowercase())
            .map(|&i| &self.profiles[i])
    }

    /// First profile (in declaration order) with a pattern contained in `sender`.
    pub fn detect_sender(&self, sender: &str) -> Option<&SourceProfile> {
        let found = self.profiles.iter().find(|p| p.matches_sender(sender));
        debug!(sender, source = found.map(|p| p.key.as_str()), "sender detection");
        found
    }

    /// New registry where `overrides` replace same-keyed profiles in place and
    /// unknown keys are appended.
    pub fn merge(&self, overrides: Vec<SourceProfile>) -> Result<Self, ConfigError> {
        let mut profiles = self.profiles.clone();
        let mut seen = HashMap::new();
        for profile in overrides {
            let key = profile.key.trim().to_lowercase();
            if seen.insert(key.clone(), ()).is_some() {
                return Err(ConfigError::DuplicateSource(key));
            }
            match self.by_key.get(&key) {
                Some(&i) => profiles[i] = profile,
                None => profiles.push(profile),
            }
        }
        Self::new(profiles)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: RegistryFile =
            serde_yaml::from_str(yaml).context("Failed to parse source registry YAML")?;
        let registry = if file.extend_builtin {
            Self::builtin().merge(file.sources)?
        } else {
            Self::new(file.sources)?
        };
        Ok(registry)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source registry {}", path.display()))?;
        let registry = Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid source registry {}", path.display()))?;
        info!(path = %path.display(), sources = registry.len(), "loaded source registry");
        Ok(registry)
    }

    pub fn to_yaml(&self) -> Result<String> {
        let file = RegistryFile {
            extend_builtin: false,
            sources: self.profiles.clone(),
        };
        serde_yaml::to_string(&file).context("Failed to serialize source registry")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
