//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod post_repo;
pub mod project_script_repo;
pub mod settings_repo;
pub mod social_link_repo;
pub mod tutorial_repo;
pub mod unlock_repo;

pub use post_repo::PostRepo;
pub use project_script_repo::ProjectScriptRepo;
pub use settings_repo::SettingsRepo;
pub use social_link_repo::SocialLinkRepo;
pub use tutorial_repo::TutorialRepo;
pub use unlock_repo::UnlockRepo;
