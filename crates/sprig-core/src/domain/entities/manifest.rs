//! The `composer.json` manifest written into a new application.
//!
//! [`Manifest::build`] is a pure merge of the bundled template with the
//! computed package name, author, and framework requirement. Key order
//! follows the template, so identical inputs always serialise to identical
//! bytes.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::{
    entities::VcsIdentity, error::DomainError, value_objects::Channel,
    value_objects::PackageName,
};

/// Git repository composer pulls the developer framework from.
pub const FRAMEWORK_REPOSITORY: &str = "https://github.com/codeigniter4/codeigniter4";

/// A merged, ready-to-write manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Value,
}

/// Everything the merge needs beyond the template itself.
#[derive(Debug, Clone, Copy)]
pub struct ManifestInputs<'a> {
    pub channel: Channel,
    pub package: &'a PackageName,
    pub identity: &'a VcsIdentity,
}

impl Manifest {
    /// Merge the template with the computed fields.
    ///
    /// - `name` is replaced with the package name.
    /// - An author built from `user.name`/`user.email` is appended to
    ///   `authors` (empty strings when unknown).
    /// - `minimum-stability` follows the channel; `prefer-stable` is `true`.
    /// - The dev channel appends the framework VCS repository.
    /// - The framework requirement is merged into `require`, replacing an
    ///   existing constraint for the same package.
    pub fn build(template: &str, inputs: ManifestInputs<'_>) -> Result<Self, DomainError> {
        let mut document: Value = serde_json::from_str(template)
            .map_err(|e| DomainError::MalformedManifest(e.to_string()))?;

        let root = document
            .as_object_mut()
            .ok_or(DomainError::UnexpectedManifestShape {
                field: "(root)",
                expected: "an object",
            })?;

        root.insert("name".into(), Value::String(inputs.package.to_string()));

        let author = json!({
            "name": inputs.identity.user_name().unwrap_or_default(),
            "email": inputs.identity.user_email().unwrap_or_default(),
        });
        array_entry(root, "authors")?.push(author);

        root.insert(
            "minimum-stability".into(),
            Value::String(inputs.channel.minimum_stability().into()),
        );
        root.insert("prefer-stable".into(), Value::Bool(true));

        if inputs.channel.is_dev() {
            array_entry(root, "repositories")?.push(json!({
                "type": "vcs",
                "url": FRAMEWORK_REPOSITORY,
            }));
        }

        let (package, constraint) = inputs.channel.framework_requirement();
        object_entry(root, "require")?.insert(package.into(), Value::String(constraint.into()));

        Ok(Self { document })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    /// Serialise with four-space indentation and a trailing newline.
    ///
    /// `serde_json` never escapes `/` or non-ASCII characters, which is the
    /// formatting composer itself uses.
    pub fn render(&self) -> Result<String, DomainError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.document
            .serialize(&mut ser)
            .map_err(|e| DomainError::MalformedManifest(e.to_string()))?;

        let mut out =
            String::from_utf8(buf).map_err(|e| DomainError::MalformedManifest(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}

fn array_entry<'a>(
    root: &'a mut Map<String, Value>,
    field: &'static str,
) -> Result<&'a mut Vec<Value>, DomainError> {
    root.entry(field)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or(DomainError::UnexpectedManifestShape {
            field,
            expected: "an array",
        })
}

fn object_entry<'a>(
    root: &'a mut Map<String, Value>,
    field: &'static str,
) -> Result<&'a mut Map<String, Value>, DomainError> {
    root.entry(field)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or(DomainError::UnexpectedManifestShape {
            field,
            expected: "an object",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "description": "CodeIgniter4 starter app",
        "type": "project",
        "license": "MIT",
        "authors": [],
        "require": { "php": "^8.1", "codeigniter4/framework": "^3" },
        "require-dev": { "phpunit/phpunit": "^10.5" }
    }"#;

    fn package() -> PackageName {
        PackageName::new("octocat", "my-app")
    }

    fn identity() -> VcsIdentity {
        [("user.name", "Octo Cat"), ("user.email", "octo@example.com")]
            .into_iter()
            .collect()
    }

    fn build(channel: Channel) -> Manifest {
        let package = package();
        let identity = identity();
        Manifest::build(
            TEMPLATE,
            ManifestInputs {
                channel,
                package: &package,
                identity: &identity,
            },
        )
        .unwrap()
    }

    #[test]
    fn stable_requires_tagged_framework() {
        let m = build(Channel::Stable);
        let doc = m.document();
        assert_eq!(doc["require"]["codeigniter4/framework"], "^4");
        assert!(doc["require"].get("codeigniter4/codeigniter4").is_none());
        assert_eq!(doc["minimum-stability"], "stable");
        assert!(doc.get("repositories").is_none());
    }

    #[test]
    fn dev_requires_develop_branch_and_vcs_repository() {
        let m = build(Channel::Dev);
        let doc = m.document();
        assert_eq!(doc["require"]["codeigniter4/codeigniter4"], "dev-develop");
        assert_eq!(doc["minimum-stability"], "dev");
        assert_eq!(doc["repositories"][0]["type"], "vcs");
        assert_eq!(doc["repositories"][0]["url"], FRAMEWORK_REPOSITORY);
    }

    #[test]
    fn template_requirements_are_kept_and_not_duplicated() {
        let m = build(Channel::Stable);
        let require = m.document()["require"].as_object().unwrap();
        assert_eq!(require["php"], "^8.1");
        assert_eq!(require.len(), 2);
    }

    #[test]
    fn author_comes_from_identity() {
        let m = build(Channel::Stable);
        let authors = m.document()["authors"].as_array().unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0]["name"], "Octo Cat");
        assert_eq!(authors[0]["email"], "octo@example.com");
    }

    #[test]
    fn unknown_author_is_empty_strings() {
        let package = package();
        let identity = VcsIdentity::new();
        let m = Manifest::build(
            TEMPLATE,
            ManifestInputs {
                channel: Channel::Stable,
                package: &package,
                identity: &identity,
            },
        )
        .unwrap();
        assert_eq!(m.document()["authors"][0]["name"], "");
        assert_eq!(m.document()["authors"][0]["email"], "");
    }

    #[test]
    fn name_and_prefer_stable_are_set() {
        let m = build(Channel::Dev);
        assert_eq!(m.name(), Some("octocat/my-app"));
        assert_eq!(m.document()["prefer-stable"], true);
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(
            build(Channel::Stable).render().unwrap(),
            build(Channel::Stable).render().unwrap()
        );
    }

    #[test]
    fn render_keeps_template_key_order_and_formatting() {
        let out = build(Channel::Stable).render().unwrap();
        let desc = out.find("\"description\"").unwrap();
        let require = out.find("\"require\"").unwrap();
        assert!(desc < require);
        assert!(out.contains("\n    \"type\": \"project\""));
        assert!(out.contains("codeigniter4/framework"));
        assert!(!out.contains("\\/"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn render_keeps_non_ascii_literal() {
        let package = package();
        let identity: VcsIdentity = [("user.name", "Zoë Ångström")].into_iter().collect();
        let m = Manifest::build(
            TEMPLATE,
            ManifestInputs {
                channel: Channel::Stable,
                package: &package,
                identity: &identity,
            },
        )
        .unwrap();
        assert!(m.render().unwrap().contains("Zoë Ångström"));
    }

    #[test]
    fn missing_sections_are_created() {
        let package = package();
        let identity = identity();
        let m = Manifest::build(
            "{}",
            ManifestInputs {
                channel: Channel::Dev,
                package: &package,
                identity: &identity,
            },
        )
        .unwrap();
        assert_eq!(m.document()["authors"].as_array().unwrap().len(), 1);
        assert_eq!(m.document()["repositories"].as_array().unwrap().len(), 1);
        assert_eq!(m.document()["require"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn malformed_template_is_rejected() {
        let package = package();
        let identity = identity();
        let inputs = ManifestInputs {
            channel: Channel::Stable,
            package: &package,
            identity: &identity,
        };
        assert!(matches!(
            Manifest::build("not json", inputs),
            Err(DomainError::MalformedManifest(_))
        ));
        assert!(matches!(
            Manifest::build("[]", inputs),
            Err(DomainError::UnexpectedManifestShape { .. })
        ));
        assert!(matches!(
            Manifest::build(r#"{"require": []}"#, inputs),
            Err(DomainError::UnexpectedManifestShape { field: "require", .. })
        ));
    }
}
