use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};

use crate::{LoadedProfile, LoadedProfiles, ProfileConfig, ProfileSource};

const CONFIG_DIR_NAME: &str = "fsopts";
const PROFILES_DIR_NAME: &str = "profiles";

/// Serialization of a profile file, picked by its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProfileFormat {
    Json,
    Yaml,
}

impl ProfileFormat {
    fn from_path(path: &Path) -> Result<Self, anyhow::Error> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some(other) => bail!("Unsupported profile file extension '{other}'"),
            None => bail!("Profile file has no usable extension"),
        }
    }

    fn parse(self, contents: &str) -> Result<serde_json::Value, anyhow::Error> {
        match self {
            Self::Json => serde_json::from_str(contents).context("Failed to parse JSON profile"),
            Self::Yaml => serde_yaml::from_str(contents).context("Failed to parse YAML profile"),
        }
    }
}

/// Profile store backed by a directory.
///
/// Profiles live in `<path>/profiles/`, one or more per file.
#[derive(Debug, Clone)]
pub struct FsProfileStore {
    path: PathBuf,
}

impl FsProfileStore {
    fn default_config_dir() -> Result<PathBuf, anyhow::Error> {
        let home = std::env::home_dir().context("Could not determine home directory")?;

        let dir = home.join(".config").join(CONFIG_DIR_NAME);

        Ok(dir)
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store in `~/.config/fsopts`.
    pub fn new_default() -> Result<Self, anyhow::Error> {
        let path = Self::default_config_dir()?;
        Ok(Self { path })
    }

    fn profiles_dir(&self) -> PathBuf {
        self.path.join(PROFILES_DIR_NAME)
    }

    /// Load all profiles.
    ///
    /// Files that cannot be read or parsed, and list elements that fail to
    /// parse, are reported in [`LoadedProfiles::failed`]. A missing
    /// directory yields no profiles.
    pub fn profiles(&self) -> Result<LoadedProfiles, anyhow::Error> {
        let profiles_dir = self.profiles_dir();

        let reader = match std::fs::read_dir(&profiles_dir) {
            Ok(reader) => reader,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LoadedProfiles::default());
            }
            Err(err) => {
                bail!(
                    "Failed to read profiles directory '{}': {}",
                    profiles_dir.display(),
                    err
                );
            }
        };

        let mut paths = Vec::new();
        for res in reader {
            let entry = res?;
            if entry.file_type()?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut profiles = LoadedProfiles::default();
        for path in paths {
            profiles.extend(Self::load_file(path));
        }

        Ok(profiles)
    }

    /// Load one file. Every failure, including an unreadable file, ends up
    /// in [`LoadedProfiles::failed`].
    fn load_file(path: PathBuf) -> LoadedProfiles {
        match Self::read_file(&path) {
            Ok(loaded) => loaded,
            Err(err) => LoadedProfiles::new_one_failed(path, format!("{err:#}"), None),
        }
    }

    fn read_file(path: &Path) -> Result<LoadedProfiles, anyhow::Error> {
        let format = ProfileFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;

        // a file holds one profile or a list of them
        let items = match format.parse(&contents)? {
            obj @ serde_json::Value::Object(_) => vec![obj],
            serde_json::Value::Array(items) => items,
            other => bail!("expected a profile or a list of profiles, got {other}"),
        };

        let mut loaded = LoadedProfiles::default();
        for (index, item) in items.into_iter().enumerate() {
            loaded.extend(match Self::parse_profile(item) {
                Ok(config) => LoadedProfiles::new_one_loaded(path.to_owned(), config),
                Err(error) => LoadedProfiles::new_one_failed(path.to_owned(), error, Some(index)),
            });
        }
        Ok(loaded)
    }

    fn parse_profile(value: serde_json::Value) -> Result<ProfileConfig, String> {
        serde_path_to_error::deserialize(value)
            .map_err(|err| format!("Failed to parse profile at '{}': {}", err.path(), err.inner()))
    }

    /// Write a profile to `<name>.yaml`, replacing an existing file.
    pub fn save_profile(&self, config: &ProfileConfig) -> Result<LoadedProfile, anyhow::Error> {
        if config.name.is_empty()
            || config.name.starts_with('.')
            || config.name.contains(['/', '\\'])
        {
            bail!("Invalid profile name '{}'", config.name);
        }

        let profiles_dir = self.profiles_dir();
        std::fs::create_dir_all(&profiles_dir).with_context(|| {
            format!(
                "Failed to create profiles directory '{}'",
                profiles_dir.display()
            )
        })?;

        let file_path = profiles_dir.join(format!("{}.yaml", config.name));

        let contents =
            serde_yaml::to_string(config).context("Failed to serialize profile to YAML")?;

        std::fs::write(&file_path, contents)
            .with_context(|| format!("Failed to write profile to '{}'", file_path.display()))?;

        Ok(LoadedProfile {
            source: Some(ProfileSource::File(file_path)),
            config: config.clone(),
        })
    }
}

#[async_trait::async_trait]
impl crate::ProfileStore for FsProfileStore {
    async fn load_profiles(&self) -> Result<LoadedProfiles, anyhow::Error> {
        #[cfg(feature = "tokio")]
        {
            let s = self.clone();
            tokio::task::spawn_blocking(move || s.profiles())
                .await
                .context("Failed to load profiles")?
        }

        #[cfg(not(feature = "tokio"))]
        {
            self.profiles()
        }
    }

    async fn save_profile(&self, profile: ProfileConfig) -> Result<LoadedProfile, anyhow::Error> {
        #[cfg(feature = "tokio")]
        {
            let s = self.clone();
            tokio::task::spawn_blocking(move || s.save_profile(&profile))
                .await
                .context("Failed to save profile")?
        }

        #[cfg(not(feature = "tokio"))]
        {
            self.save_profile(&profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{EntryValue, OptionEntry, ProfileStore, Scalar};

    fn store() -> (tempfile::TempDir, FsProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsProfileStore::new(dir.path().to_owned());
        (dir, store)
    }

    fn write(store: &FsProfileStore, name: &str, contents: &str) {
        let dir = store.profiles_dir();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let (_dir, store) = store();
        let loaded = store.profiles().unwrap();
        assert!(loaded.profiles.is_empty());
        assert!(loaded.failed.is_empty());
    }

    #[test]
    fn test_load_yaml_and_json() {
        let (_dir, store) = store();
        write(
            &store,
            "a.yaml",
            "name: a\noptions:\n  - scheme: ftp\n    option: passiveMode\n    value: true\n",
        );
        write(
            &store,
            "b.json",
            r#"[
                {"name": "b1", "options": []},
                {"name": "b2", "options": [{"scheme": "ftp", "option": "dataTimeout"}]},
                {"name": "b3"}
            ]"#,
        );
        write(&store, "c.txt", "name: c");

        let loaded = store.profiles().unwrap();
        let names = loaded
            .profiles
            .iter()
            .map(|p| p.config.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b1", "b3"]);
        assert_eq!(
            loaded.get("a").unwrap().config.options[0].value,
            EntryValue::Scalar(Scalar::Bool(true))
        );

        assert_eq!(loaded.failed.len(), 2);
        let b2 = &loaded.failed[0];
        assert_eq!(b2.index, Some(1));
        assert!(b2.error.contains("options[0]"), "{}", b2.error);
        assert_eq!(loaded.failed[1].index, None);
        assert!(loaded.failed[1].error.contains("txt"));
    }

    #[test]
    fn test_unreadable_file_is_collected() {
        let (_dir, store) = store();
        write(&store, "good.yaml", "name: good\n");
        std::fs::write(store.profiles_dir().join("bad.yaml"), [0xffu8, 0xfe, 0x00]).unwrap();

        let loaded = store.profiles().unwrap();
        assert_eq!(loaded.profiles.len(), 1);
        assert_eq!(loaded.profiles[0].config.name, "good");

        assert_eq!(loaded.failed.len(), 1);
        let bad = &loaded.failed[0];
        assert_eq!(
            bad.source,
            ProfileSource::File(store.profiles_dir().join("bad.yaml"))
        );
        assert_eq!(bad.index, None);
        assert!(bad.error.contains("Failed to read profile file"), "{}", bad.error);
    }

    #[test]
    fn test_scalar_file_is_rejected() {
        let (_dir, store) = store();
        write(&store, "n.json", "42");

        let loaded = store.profiles().unwrap();
        assert!(loaded.profiles.is_empty());
        assert_eq!(loaded.failed.len(), 1);
        assert_eq!(loaded.failed[0].index, None);
        assert!(loaded.failed[0].error.contains("got 42"), "{}", loaded.failed[0].error);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let (_dir, store) = store();
        let profile = ProfileConfig {
            name: "saved".to_string(),
            description: Some("round trip".to_string()),
            options: vec![
                OptionEntry::new("http", "proxyPort", EntryValue::Scalar(Scalar::Int(8080))),
                OptionEntry::new(
                    "sftp",
                    "identities",
                    EntryValue::List(vec![Scalar::Text("/k".to_string())]),
                ),
            ],
        };

        let saved = ProfileStore::save_profile(&store, profile.clone())
            .await
            .unwrap();
        assert_eq!(
            saved.source,
            Some(ProfileSource::File(
                store.profiles_dir().join("saved.yaml")
            ))
        );

        let loaded = store.load_profiles().await.unwrap();
        assert!(loaded.failed.is_empty(), "{:?}", loaded.failed);
        assert_eq!(loaded.get("saved").unwrap().config, profile);
    }

    #[test]
    fn test_save_rejects_path_names() {
        let (_dir, store) = store();
        let profile = ProfileConfig {
            name: "../escape".to_string(),
            description: None,
            options: Vec::new(),
        };
        assert!(store.save_profile(&profile).is_err());
    }
}
