pub mod identity;
pub mod manifest;
pub mod options;
pub mod target;

pub use identity::VcsIdentity;
pub use manifest::{FRAMEWORK_REPOSITORY, Manifest, ManifestInputs};
pub use options::{InstallOptions, ScaffoldOptions};
pub use target::TargetDirectory;
