//! # dirhub-service
//!
//! Business logic service layer for DirHub. Every public operation of
//! [`DirectoryService`] opens one unit of work on the configured store,
//! performs all of its reads and writes through it, and commits only when
//! the whole operation succeeded.
//!
//! Services follow constructor injection: the store is provided at
//! construction time.

pub mod directory;

pub use directory::{
    CascadeSummary, CreateDirectoryRequest, DirectoryService, DirectorySummary, GrantSummary,
    OperationStatus, RenameDirectoryRequest, UserAuthority, UserDirectoryGrant,
};
