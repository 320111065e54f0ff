use log::debug;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ManifestError;

const MANIFEST_SUFFIX: &str = ".deploy.json";

/// Identity of one instantiated contract.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractInfo {
    pub address: String,
    #[serde(rename = "hash")]
    pub code_hash: String,
}

/// Durable record of a completed deployment, stored next to its config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    pub storage_info: ContractInfo,
    pub app_info: ContractInfo,
}

impl DeploymentManifest {
    /// `<config path>.deploy.json`
    pub fn path_for<P: AsRef<Path>>(config_path: P) -> PathBuf {
        let mut path = OsString::from(config_path.as_ref());
        path.push(MANIFEST_SUFFIX);
        PathBuf::from(path)
    }

    /// Reads the manifest of `config_path`. A missing file means nothing is deployed yet.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ManifestError> {
        let path = Self::path_for(config_path);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|e| ManifestError::Read {
            path: path.clone(),
            source: e,
        })?;

        let manifest =
            serde_json::from_str(&raw).map_err(|e| ManifestError::Parse { path, source: e })?;

        Ok(Some(manifest))
    }

    /// Like [`DeploymentManifest::load`], for flows that need a prior deployment.
    pub fn require<P: AsRef<Path>>(config_path: P) -> Result<Self, ManifestError> {
        let config_path = config_path.as_ref();
        Self::load(config_path)?.ok_or_else(|| ManifestError::NotFound {
            path: Self::path_for(config_path),
        })
    }

    /// Writes the manifest through a temporary file and a rename, so readers never see a partial file.
    pub fn save<P: AsRef<Path>>(&self, config_path: P) -> Result<PathBuf, ManifestError> {
        let path = Self::path_for(config_path);

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let json = serde_json::to_string(self).map_err(|e| ManifestError::Parse {
            path: path.clone(),
            source: e,
        })?;

        fs::write(&tmp, json).map_err(|e| ManifestError::Write {
            path: tmp.clone(),
            source: e,
        })?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(ManifestError::Write { path, source: e });
        }

        debug!("wrote deployment manifest {path:?}");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn manifest() -> DeploymentManifest {
        DeploymentManifest {
            storage_info: ContractInfo {
                address: "secret1storage".to_string(),
                code_hash: "aa11".to_string(),
            },
            app_info: ContractInfo {
                address: "secret1app".to_string(),
                code_hash: "bb22".to_string(),
            },
        }
    }

    #[test]
    fn path_appends_suffix() {
        assert_eq!(
            DeploymentManifest::path_for("cfg/dev.json"),
            PathBuf::from("cfg/dev.json.deploy.json")
        );
    }

    #[test]
    fn missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("dev.json");

        assert_eq!(DeploymentManifest::load(&cfg).unwrap(), None);
        assert_matches!(
            DeploymentManifest::require(&cfg),
            Err(ManifestError::NotFound { path }) if path == dir.path().join("dev.json.deploy.json")
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("dev.json");

        let path = manifest().save(&cfg).unwrap();
        assert!(!dir.path().join("dev.json.deploy.json.tmp").exists());

        let raw = fs::read_to_string(path).unwrap();
        assert_eq!(
            raw,
            r#"{"storageInfo":{"address":"secret1storage","hash":"aa11"},"appInfo":{"address":"secret1app","hash":"bb22"}}"#
        );
        assert_eq!(DeploymentManifest::require(&cfg).unwrap(), manifest());
    }

    #[test]
    fn failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("dev.json");
        let target = dir.path().join("dev.json.deploy.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "").unwrap();

        assert_matches!(
            manifest().save(&cfg),
            Err(ManifestError::Write { path, .. }) if path == target
        );
        assert!(!dir.path().join("dev.json.deploy.json.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn malformed_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("dev.json");
        fs::write(dir.path().join("dev.json.deploy.json"), r#"{"storageInfo":{}}"#).unwrap();

        assert_matches!(
            DeploymentManifest::load(&cfg),
            Err(ManifestError::Parse { .. })
        );
    }
}
