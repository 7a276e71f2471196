//! Option profiles: named lists of scheme options stored in files.
//!
//! A profile file is YAML or JSON and holds a single profile or a list of
//! profiles:
//!
//! ```yaml
//! name: corporate-proxy
//! description: Route web traffic through the office proxy
//! options:
//!   - scheme: http
//!     option: proxyHost
//!     value: proxy.internal
//!   - scheme: http
//!     option: proxyPort
//!     value: 3128
//!   - scheme: sftp
//!     option: identities
//!     value: [/home/me/.ssh/id_ed25519]
//!   - scheme: sftp
//!     option: userinfo
//!     value:
//!       class: trust-everyone
//! ```
//!
//! Profiles are applied with [`ProfileConfig::apply`], which sends every
//! entry through a [`fsopts::DelegatingOptionsBuilder`].

use std::{path::PathBuf, sync::Arc};

mod catalog;
mod fs;
mod profile;

pub use self::{
    catalog::TypeCatalog,
    fs::FsProfileStore,
    profile::{ClassRef, EntryValue, OptionEntry, ProfileConfig, Scalar},
};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ProfileSource {
    File(PathBuf),
}

impl From<PathBuf> for ProfileSource {
    fn from(path: PathBuf) -> Self {
        ProfileSource::File(path)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct LoadedProfile {
    pub source: Option<ProfileSource>,
    pub config: ProfileConfig,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedProfiles {
    pub profiles: Vec<LoadedProfile>,
    pub failed: Vec<ProfileLoadError>,
}

impl LoadedProfiles {
    pub fn get(&self, name: &str) -> Option<&LoadedProfile> {
        self.profiles.iter().find(|p| p.config.name == name)
    }

    pub fn new_one_loaded(source: impl Into<ProfileSource>, config: ProfileConfig) -> Self {
        Self {
            profiles: vec![LoadedProfile {
                source: Some(source.into()),
                config,
            }],
            failed: Vec::new(),
        }
    }

    pub fn new_one_failed(
        source: impl Into<ProfileSource>,
        error: String,
        index: Option<usize>,
    ) -> Self {
        Self {
            profiles: Vec::new(),
            failed: vec![ProfileLoadError {
                source: source.into(),
                error,
                index,
            }],
        }
    }

    fn extend(&mut self, other: Self) {
        self.profiles.extend(other.profiles);
        self.failed.extend(other.failed);
    }
}

/// A profile that could not be parsed.
///
/// `index` is the position in the file for files holding a list.
#[derive(Debug, Clone)]
pub struct ProfileLoadError {
    pub source: ProfileSource,
    pub error: String,
    pub index: Option<usize>,
}

#[async_trait::async_trait]
pub trait ProfileStore {
    async fn load_profiles(&self) -> Result<LoadedProfiles, anyhow::Error>;

    async fn save_profile(&self, profile: ProfileConfig) -> Result<LoadedProfile, anyhow::Error>;
}

pub type DynProfileStore = Arc<dyn ProfileStore + Send + Sync>;
