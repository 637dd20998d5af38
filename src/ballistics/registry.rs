//! Projectile Profile Registry
//!
//! Named, read-only mapping from projectile kind to profile. Built once at
//! startup, either from the built-in vanilla kinds or from a JSON file, and
//! validated on construction so solving never sees a malformed profile.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error, info};

use crate::error::ConfigError;
use super::profile::{ChargeCurve, ProjectileProfile};

/// Bow draw time (1 second at 20 TPS).
pub const BOW_FULL_CHARGE_TICKS: u32 = 20;

/// Immutable registry of projectile profiles.
///
/// BTreeMap keeps `kinds()` in a stable order.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, ProjectileProfile>,
}

impl ProfileRegistry {
    /// Vanilla projectile kinds, validated like any other registry.
    pub fn builtin() -> Self {
        let bow = ProjectileProfile::new(3.0, -0.05)
            .with_charge(ChargeCurve::Bow { full_charge_ticks: BOW_FULL_CHARGE_TICKS });

        let profiles = [
            ("bow", bow),
            ("crossbow", ProjectileProfile::new(3.15, -0.05)),
            // snowball, egg, ender pearl
            ("thrown", ProjectileProfile::new(1.5, -0.03)),
            // splash + lingering
            ("potion", ProjectileProfile::new(0.5, -0.05)),
            ("exp_bottle", ProjectileProfile::new(0.7, -0.07)),
            ("trident", ProjectileProfile::new(2.5, -0.05)),
            // fired from a crossbow, flies straight
            ("firework", ProjectileProfile::new(1.6, 0.0)),
            ("rod", ProjectileProfile::new(0.3, -0.03)),
        ];

        Self { profiles: retain_valid(profiles) }
    }

    /// Build and validate a registry from `(kind, profile)` pairs.
    pub fn from_profiles<I>(profiles: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, ProjectileProfile)>,
    {
        let profiles: BTreeMap<String, ProjectileProfile> = profiles.into_iter().collect();
        for (kind, profile) in &profiles {
            register(kind, profile)?;
        }
        Ok(Self { profiles })
    }

    /// Parse a JSON object of `kind -> profile`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parsed: BTreeMap<String, ProjectileProfile> = serde_json::from_str(json)?;
        Self::from_profiles(parsed)
    }

    /// Read a JSON registry file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&json)?;
        info!("Loaded {} projectile profiles from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Serialize to the JSON format accepted by `from_json`.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.profiles)?)
    }

    /// Look up a profile by kind.
    pub fn get(&self, kind: &str) -> Option<&ProjectileProfile> {
        self.profiles.get(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// True if no kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn register(kind: &str, profile: &ProjectileProfile) -> Result<(), ConfigError> {
    profile.validate(kind)?;
    debug!(kind = %kind, speed = profile.base_speed(), gravity = profile.gravity, "Registered profile");
    Ok(())
}

/// Keep the kinds that validate; the rest are logged and dropped.
fn retain_valid<'a, I>(profiles: I) -> BTreeMap<String, ProjectileProfile>
where
    I: IntoIterator<Item = (&'a str, ProjectileProfile)>,
{
    profiles
        .into_iter()
        .filter(|(kind, profile)| match register(kind, profile) {
            Ok(()) => true,
            Err(e) => {
                error!(kind = %kind, error = %e, "Dropping invalid built-in profile");
                false
            }
        })
        .map(|(kind, profile)| (kind.to_string(), profile))
        .collect()
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Process-wide built-in registry.
///
/// Initialized on first use and never mutated afterwards.
pub fn registry() -> &'static ProfileRegistry {
    static REGISTRY: OnceLock<ProfileRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ProfileRegistry::builtin)
}
