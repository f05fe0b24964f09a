//! Schema validation for packages.
//!
//! Decides whether a candidate [`Package`] is well-formed. Checks run in a
//! fixed order and short-circuit: the first violated rule wins and its
//! reason is carried verbatim in the error. Validation is a pure function
//! of the in-memory value; no rule performs I/O.
//!
//! String- and number-typedness of the fields is enforced by the static
//! record shape at decode time (a wire value of the wrong kind never
//! becomes a `Package`), so the rules left to check here are the name
//! charset, the URL shapes, and the embedded trees.

use crate::error::{PackageError, Result};
use crate::package::Package;
use regex::Regex;
use std::sync::LazyLock;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("valid regex"));

/// Validates a package against the field-level schema.
///
/// # Errors
///
/// Returns [`PackageError::Schema`] naming the first violated rule:
///
/// - `name` must match `^[A-Za-z0-9_-]+$`
/// - a non-empty `update_path` must be an http/https URL
/// - a non-empty `web` must be an http/https URL
/// - `public_assets`, `private_assets`, and `templates`, when present,
///   must contain only valid entry names
///
/// # Examples
///
/// ```
/// use plugpack_format::{Package, validate};
///
/// # fn check(mut package: Package) {
/// package.name = "bad name!".to_string();
/// assert!(validate(&package).is_err());
/// # }
/// ```
pub fn validate(package: &Package) -> Result<()> {
    if !NAME_REGEX.is_match(&package.name) {
        return Err(PackageError::Schema {
            reason: "invalid name value (must be at least 1 character, accepted chars: a-z A-Z 0-9 - _)"
                .to_string(),
        });
    }

    if let Some(url) = &package.update_path
        && !url.is_empty()
        && !URL_REGEX.is_match(url)
    {
        return Err(PackageError::Schema {
            reason: format!("invalid update_path value (must be an http/https URL): {url}"),
        });
    }

    if let Some(url) = &package.web
        && !url.is_empty()
        && !URL_REGEX.is_match(url)
    {
        return Err(PackageError::Schema {
            reason: "invalid web value (must be an http/https URL)".to_string(),
        });
    }

    let trees = [
        ("public_assets", &package.public_assets),
        ("private_assets", &package.private_assets),
        ("templates", &package.templates),
    ];
    for (field, tree) in trees {
        if let Some(tree) = tree {
            tree.validate().map_err(|e| PackageError::Schema {
                reason: format!("invalid {field} value: {e}"),
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugpack_tree::DirTree;

    fn minimal_package() -> Package {
        Package {
            code: "code".to_string(),
            class_name: "Plugin".to_string(),
            name: "plugin".to_string(),
            author: "author".to_string(),
            version_text: "1.0".to_string(),
            version_count: 1,
            api_version: 1,
            short_description: "desc".to_string(),
            update_path: None,
            web: None,
            license: None,
            help: None,
            public_assets: None,
            private_assets: None,
            templates: None,
        }
    }

    #[test]
    fn test_minimal_package_validates() {
        assert!(validate(&minimal_package()).is_ok());
    }

    #[test]
    fn test_name_charset() {
        let mut package = minimal_package();
        for good in ["plugin", "My_Plugin-2", "X", "0"] {
            package.name = good.to_string();
            assert!(validate(&package).is_ok(), "{good} should validate");
        }
        for bad in ["", "bad name!", "ümlaut", "dot.dot", "a/b"] {
            package.name = bad.to_string();
            let error = validate(&package).unwrap_err();
            assert!(
                format!("{error}").contains("name"),
                "{bad} should fail with a name reason"
            );
        }
    }

    #[test]
    fn test_update_path_must_be_http() {
        let mut package = minimal_package();

        package.update_path = Some("https://repo.example.org/p".to_string());
        assert!(validate(&package).is_ok());

        package.update_path = Some("http://repo.example.org/p".to_string());
        assert!(validate(&package).is_ok());

        package.update_path = Some("ftp://x".to_string());
        let error = validate(&package).unwrap_err();
        assert!(format!("{error}").contains("update_path"));

        // Empty optional URLs are tolerated.
        package.update_path = Some(String::new());
        assert!(validate(&package).is_ok());
    }

    #[test]
    fn test_web_must_be_http() {
        let mut package = minimal_package();

        package.web = Some("https://example.org".to_string());
        assert!(validate(&package).is_ok());

        package.web = Some("javascript:alert(1)".to_string());
        let error = validate(&package).unwrap_err();
        assert!(format!("{error}").contains("web"));

        package.web = Some(String::new());
        assert!(validate(&package).is_ok());
    }

    #[test]
    fn test_valid_trees_accepted() {
        let mut assets = DirTree::new();
        assets.insert_file("a.css", vec![]).unwrap();

        let mut package = minimal_package();
        package.public_assets = Some(assets.clone());
        package.private_assets = Some(assets.clone());
        package.templates = Some(assets);
        assert!(validate(&package).is_ok());
    }

    #[test]
    fn test_hostile_tree_rejected_with_field_name() {
        // Hostile names only arise via deserialization.
        let tree: DirTree = serde_json::from_str(r#"{"../up": {"File": []}}"#).unwrap();

        let mut package = minimal_package();
        package.templates = Some(tree);
        let error = validate(&package).unwrap_err();
        assert!(format!("{error}").contains("templates"));
    }

    #[test]
    fn test_first_violation_wins() {
        let mut package = minimal_package();
        package.name = "bad name!".to_string();
        package.web = Some("ftp://also-bad".to_string());

        let error = validate(&package).unwrap_err();
        // Name is checked before web.
        assert!(format!("{error}").contains("name"));
    }
}
