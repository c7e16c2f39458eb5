// crates/products-contract/src/artifacts.rs
// ============================================================================
// Module: Contract Artifacts
// Description: Generator for the on-disk Products contract bundle.
// Purpose: Emit deterministic schema and example files with a hashed manifest.
// Dependencies: serde_jcs, serde_json, sha2, std
// ============================================================================

//! ## Overview
//! The artifact builder renders every exported JSON Schema plus canonical
//! example payloads, orders them by path, and describes them in an
//! `index.json` manifest carrying SHA-256 digests. JSON output is pretty
//! printed with canonical key ordering so regeneration is byte-for-byte
//! stable, which is what [`ArtifactBuilder::verify_output`] relies on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::ContractError;
use crate::examples;
use crate::schemas::SchemaName;
use crate::schemas::schema_bundle;
use crate::types::ProductsResponse;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Manifest file name at the bundle root.
pub const MANIFEST_FILE: &str = "index.json";

/// Digest algorithm label recorded in the manifest.
pub const DIGEST_ALGORITHM: &str = "sha256";

/// Content type of every JSON artifact.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Base URL used for example category links.
const EXAMPLE_BASE_URL: &str = "https://dummyjson.com";

/// Page size of the example listing.
const EXAMPLE_PAGE_SIZE: usize = 5;

// ============================================================================
// SECTION: Artifact Types
// ============================================================================

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Relative path under the output directory.
    pub path: String,
    /// MIME content type.
    pub content_type: String,
    /// Serialized bytes.
    pub bytes: Vec<u8>,
}

/// Manifest entry for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Relative path under the output directory.
    pub path: String,
    /// MIME content type.
    pub content_type: String,
    /// Lowercase hex digest of the artifact bytes.
    pub digest: String,
}

/// Manifest describing a generated bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Crate version that produced the bundle.
    pub contract_version: String,
    /// Digest algorithm label.
    pub digest_algorithm: String,
    /// Entries ordered by path.
    pub artifacts: Vec<ManifestEntry>,
}

/// Generated artifacts together with their manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactBundle {
    /// Manifest.
    pub manifest: Manifest,
    /// Artifacts ordered by path.
    pub artifacts: Vec<Artifact>,
}

// ============================================================================
// SECTION: Artifact Builder
// ============================================================================

/// Builds, writes, and verifies the contract bundle.
#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    /// Version recorded in the manifest.
    contract_version: String,
}

impl ArtifactBuilder {
    /// Creates a builder stamped with the crate version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            contract_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Returns the default output directory.
    #[must_use]
    pub fn default_output_dir() -> PathBuf {
        PathBuf::from("generated/products-contract")
    }

    /// Builds the bundle in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when serialization fails or paths collide.
    pub fn build(&self) -> Result<ArtifactBundle, ContractError> {
        let mut artifacts = Vec::new();
        for (name, document) in schema_bundle() {
            artifacts.push(json_artifact(&schema_path(name), &document)?);
        }

        let catalog = examples::catalog_example();
        let page = ProductsResponse {
            products: catalog.iter().take(EXAMPLE_PAGE_SIZE).cloned().collect(),
            total: u64::try_from(catalog.len()).unwrap_or(u64::MAX),
            skip: 0,
            limit: u64::try_from(EXAMPLE_PAGE_SIZE).unwrap_or(u64::MAX),
        };
        if let Some(first) = catalog.first() {
            artifacts.push(json_artifact("examples/product.json", first)?);
        }
        artifacts.push(json_artifact("examples/products-response.json", &page)?);
        artifacts.push(json_artifact(
            "examples/categories.json",
            &examples::categories_example(EXAMPLE_BASE_URL),
        )?);
        let category_list = examples::category_list_example();
        artifacts.push(json_artifact("examples/category-list.json", &category_list)?);
        let not_found = examples::not_found_example("0");
        artifacts.push(json_artifact("examples/error-response.json", &not_found)?);

        artifacts.sort_by(|lhs, rhs| lhs.path.cmp(&rhs.path));
        ensure_unique_paths(&artifacts)?;
        let manifest = build_manifest(&self.contract_version, &artifacts);
        Ok(ArtifactBundle {
            manifest,
            artifacts,
        })
    }

    /// Writes the bundle into `output_dir`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when generation or any write fails.
    pub fn write_to(&self, output_dir: &Path) -> Result<Manifest, ContractError> {
        let bundle = self.build()?;
        ensure_output_dir(output_dir)?;
        for artifact in &bundle.artifacts {
            write_artifact(output_dir, artifact)?;
        }
        let manifest_bytes = serialize_json_pretty(&bundle.manifest)?;
        fs::write(output_dir.join(MANIFEST_FILE), manifest_bytes)
            .map_err(|err| ContractError::Io(err.to_string()))?;
        Ok(bundle.manifest)
    }

    /// Verifies that `output_dir` holds exactly the generated bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Generation`] naming the first missing,
    /// changed, or unexpected file.
    pub fn verify_output(&self, output_dir: &Path) -> Result<(), ContractError> {
        let bundle = self.build()?;
        if !output_dir.is_dir() {
            return Err(ContractError::OutputPath(output_dir.to_path_buf()));
        }
        for artifact in &bundle.artifacts {
            let bytes = fs::read(output_dir.join(&artifact.path))
                .map_err(|err| ContractError::Io(format!("{}: {err}", artifact.path)))?;
            if bytes != artifact.bytes {
                return Err(ContractError::Generation(format!(
                    "artifact mismatch: {}",
                    artifact.path
                )));
            }
        }
        let manifest_bytes = serialize_json_pretty(&bundle.manifest)?;
        let actual_manifest = fs::read(output_dir.join(MANIFEST_FILE))
            .map_err(|err| ContractError::Io(format!("{MANIFEST_FILE}: {err}")))?;
        if actual_manifest != manifest_bytes {
            return Err(ContractError::Generation(format!("manifest mismatch: {MANIFEST_FILE}")));
        }

        let mut expected: BTreeSet<String> =
            bundle.artifacts.iter().map(|artifact| artifact.path.clone()).collect();
        expected.insert(MANIFEST_FILE.to_string());
        let mut actual = BTreeSet::new();
        collect_files(output_dir, output_dir, &mut actual)?;
        if let Some(path) = actual.difference(&expected).next() {
            return Err(ContractError::Generation(format!("unexpected artifact: {path}")));
        }
        Ok(())
    }
}

impl Default for ArtifactBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the bundle path of a schema document.
#[must_use]
pub fn schema_path(name: SchemaName) -> String {
    format!("schemas/{}.schema.json", name.as_str())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a pretty-printed JSON artifact.
fn json_artifact<T: Serialize>(path: &str, value: &T) -> Result<Artifact, ContractError> {
    Ok(Artifact {
        path: path.to_string(),
        content_type: JSON_CONTENT_TYPE.to_string(),
        bytes: serialize_json_pretty(value)?,
    })
}

/// Serializes with canonical key order, then pretty prints.
fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| ContractError::Serialization(err.to_string()))?;
    let canonical_value: serde_json::Value = serde_json::from_slice(&canonical)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    let mut bytes = serde_json::to_vec_pretty(&canonical_value)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Builds the manifest for ordered artifacts.
fn build_manifest(contract_version: &str, artifacts: &[Artifact]) -> Manifest {
    Manifest {
        contract_version: contract_version.to_string(),
        digest_algorithm: DIGEST_ALGORITHM.to_string(),
        artifacts: artifacts
            .iter()
            .map(|artifact| ManifestEntry {
                path: artifact.path.clone(),
                content_type: artifact.content_type.clone(),
                digest: sha256_hex(&artifact.bytes),
            })
            .collect(),
    }
}

/// Returns the lowercase hex SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// Rejects duplicate artifact paths.
fn ensure_unique_paths(artifacts: &[Artifact]) -> Result<(), ContractError> {
    let mut seen = BTreeSet::new();
    for artifact in artifacts {
        if !seen.insert(artifact.path.as_str()) {
            return Err(ContractError::Generation(format!(
                "duplicate artifact path: {}",
                artifact.path
            )));
        }
    }
    Ok(())
}

/// Creates the output directory, rejecting empty paths and plain files.
fn ensure_output_dir(output_dir: &Path) -> Result<(), ContractError> {
    if output_dir.as_os_str().is_empty() || (output_dir.exists() && !output_dir.is_dir()) {
        return Err(ContractError::OutputPath(output_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir).map_err(|err| ContractError::Io(err.to_string()))
}

/// Writes one artifact below `output_dir`.
fn write_artifact(output_dir: &Path, artifact: &Artifact) -> Result<(), ContractError> {
    let relative = PathBuf::from(&artifact.path);
    let escapes = relative.components().any(|component| {
        matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_))
    });
    if escapes {
        return Err(ContractError::Generation(format!(
            "artifact path must stay inside the output directory: {}",
            artifact.path
        )));
    }
    let target = output_dir.join(relative);
    let parent = target.parent().ok_or_else(|| ContractError::OutputPath(target.clone()))?;
    fs::create_dir_all(parent).map_err(|err| ContractError::Io(err.to_string()))?;
    fs::write(&target, &artifact.bytes).map_err(|err| ContractError::Io(err.to_string()))
}

/// Collects file paths under `current`, relative to `root`, with `/` separators.
fn collect_files(
    root: &Path,
    current: &Path,
    files: &mut BTreeSet<String>,
) -> Result<(), ContractError> {
    let entries = fs::read_dir(current).map_err(|err| ContractError::Io(err.to_string()))?;
    for entry in entries {
        let path = entry.map_err(|err| ContractError::Io(err.to_string()))?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else if path.is_file() {
            let relative =
                path.strip_prefix(root).map_err(|_| ContractError::OutputPath(path.clone()))?;
            let text = relative
                .to_str()
                .ok_or_else(|| ContractError::OutputPath(relative.to_path_buf()))?;
            files.insert(text.replace('\\', "/"));
        }
    }
    Ok(())
}
