mod repository_ref;
pub mod validation;

pub use repository_ref::RepositoryRef;
pub use validation::{
    RepositoryValidation, looks_like_github_token, split_repository_list, validate_repositories,
};
