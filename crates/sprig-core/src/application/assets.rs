//! Files shipped inside the binary and written into every new application.

/// The `composer.json` template merged by the manifest step.
pub const MANIFEST_TEMPLATE: &str = include_str!("../../assets/template.json");

/// A bundled file and where it lands, relative to the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledFile {
    pub destination: &'static str,
    pub contents: &'static str,
}

/// Files written over the extracted template.
pub const BUNDLED_FILES: &[BundledFile] = &[
    BundledFile {
        destination: ".github/workflows/phpunit.yml",
        contents: include_str!("../../assets/phpunit.template.yml"),
    },
    BundledFile {
        destination: "phpunit.xml.dist",
        contents: include_str!("../../assets/phpunit.template.xml"),
    },
    BundledFile {
        destination: "tests/_support/.gitkeep",
        contents: "",
    },
];
