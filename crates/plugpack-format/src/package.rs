//! The package data model and the metadata projection.

use plugpack_tree::DirTree;
use serde::{Deserialize, Serialize};

/// The full in-memory representation of one plugin distribution.
///
/// Mandatory fields describe the plugin's code and identity; optional
/// fields carry repository metadata and embedded directory trees. A
/// `Package` is validated on every encode and every decode, so a value
/// obtained from [`Package::decode`](crate::Package::decode) is always
/// well-formed.
///
/// Field order matters: the canonical wire payload serializes fields in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Package {
    /// The plugin's source code. Not inspected here; syntactic or semantic
    /// checks belong to the execution environment.
    pub code: String,
    /// Name of the plugin's entry-point class.
    pub class_name: String,
    /// Plugin identifier. At least one character; accepted chars:
    /// `a-z A-Z 0-9 - _`.
    pub name: String,
    /// The plugin author, preferably as `Name <mail@address>`.
    pub author: String,
    /// Free-form display label for this release, e.g. "1.1 Beta".
    pub version_text: String,
    /// Release ordinal; increased with every release.
    pub version_count: u64,
    /// The CMS plugin API version this plugin targets.
    pub api_version: u64,
    /// A short description for repository listings.
    pub short_description: String,

    /// URL of an update information resource (http/https).
    pub update_path: Option<String>,
    /// URL of the plugin's web page (http/https).
    pub web: Option<String>,
    /// License text.
    pub license: Option<String>,
    /// Help / manual, formatted in HTML.
    pub help: Option<String>,
    /// Web-accessible asset tree.
    pub public_assets: Option<DirTree>,
    /// Private data tree.
    pub private_assets: Option<DirTree>,
    /// Template source tree.
    pub templates: Option<DirTree>,
}

impl Package {
    /// Projects the listing-safe subset of this package.
    ///
    /// The projection is a pure field copy and never includes `code`,
    /// `class_name`, or any of the tree fields, so repository listings can
    /// be served without exposing or materializing plugin code.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plugpack_format::Package;
    /// # fn demo(package: &Package) {
    /// let meta = package.extract_meta();
    /// assert_eq!(meta.name, package.name);
    /// assert_eq!(meta.version_count, package.version_count);
    /// # }
    /// ```
    #[must_use]
    pub fn extract_meta(&self) -> PackageMeta {
        PackageMeta {
            name: self.name.clone(),
            author: self.author.clone(),
            version_text: self.version_text.clone(),
            version_count: self.version_count,
            api_version: self.api_version,
            short_description: self.short_description.clone(),
            update_path: self.update_path.clone(),
            web: self.web.clone(),
            license: self.license.clone(),
        }
    }
}

/// The listing-safe subset of a [`Package`].
///
/// Derived on demand via [`Package::extract_meta`], never constructed
/// independently and never persisted on its own. Carries no code and no
/// trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMeta {
    /// Plugin identifier.
    pub name: String,
    /// The plugin author.
    pub author: String,
    /// Free-form display label for this release.
    pub version_text: String,
    /// Release ordinal.
    pub version_count: u64,
    /// Targeted plugin API version.
    pub api_version: u64,
    /// A short description for repository listings.
    pub short_description: String,
    /// URL of an update information resource.
    pub update_path: Option<String>,
    /// URL of the plugin's web page.
    pub web: Option<String>,
    /// License text.
    pub license: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugpack_tree::DirTree;

    fn sample_package() -> Package {
        let mut assets = DirTree::new();
        assets
            .insert_file("style.css", b"body {}".to_vec())
            .unwrap();

        Package {
            code: "fn entry() {}".to_string(),
            class_name: "HelloPlugin".to_string(),
            name: "hello".to_string(),
            author: "Jane Doe <jane@example.org>".to_string(),
            version_text: "1.1 Beta".to_string(),
            version_count: 3,
            api_version: 1,
            short_description: "Says hello.".to_string(),
            update_path: Some("https://repo.example.org/hello".to_string()),
            web: Some("https://example.org/hello".to_string()),
            license: Some("MIT".to_string()),
            help: Some("<p>Install and enjoy.</p>".to_string()),
            public_assets: Some(assets),
            private_assets: None,
            templates: None,
        }
    }

    #[test]
    fn test_extract_meta_copies_listing_fields() {
        let package = sample_package();
        let meta = package.extract_meta();

        assert_eq!(meta.name, package.name);
        assert_eq!(meta.author, package.author);
        assert_eq!(meta.version_text, package.version_text);
        assert_eq!(meta.version_count, package.version_count);
        assert_eq!(meta.api_version, package.api_version);
        assert_eq!(meta.short_description, package.short_description);
        assert_eq!(meta.update_path, package.update_path);
        assert_eq!(meta.web, package.web);
        assert_eq!(meta.license, package.license);
    }

    #[test]
    fn test_meta_serialization_excludes_code_and_trees() {
        let package = sample_package();
        let meta_json = serde_json::to_value(package.extract_meta()).unwrap();
        let fields = meta_json.as_object().unwrap();

        assert_eq!(fields.len(), 9);
        assert!(!fields.contains_key("code"));
        assert!(!fields.contains_key("class_name"));
        assert!(!fields.contains_key("public_assets"));
        assert!(!fields.contains_key("private_assets"));
        assert!(!fields.contains_key("templates"));
        assert!(!fields.contains_key("help"));
    }

    #[test]
    fn test_package_serde_roundtrip() {
        let package = sample_package();
        let json = serde_json::to_string(&package).unwrap();
        let back: Package = serde_json::from_str(&json).unwrap();
        assert_eq!(back, package);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let mut value = serde_json::to_value(sample_package()).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .insert("smuggled".to_string(), serde_json::json!("payload"));

        let result: Result<Package, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
