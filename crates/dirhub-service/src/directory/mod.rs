//! Directory management, authority grants, and tree services.

pub mod authority;
pub mod cascade;
pub mod dto;
pub mod service;
pub mod tree;

pub use cascade::CascadeSummary;
pub use dto::{
    CreateDirectoryRequest, DirectorySummary, GrantSummary, OperationStatus,
    RenameDirectoryRequest, UserAuthority, UserDirectoryGrant,
};
pub use service::DirectoryService;
