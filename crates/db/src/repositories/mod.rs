//! Repositories: stateless structs holding the SQL for one table each.
//!
//! Multi-statement invariants (commit + append, cascade deletes) run in
//! explicit transactions so no operation is ever observed half-applied.

pub mod board_repo;
pub mod change_repo;
pub mod comment_repo;
pub mod note_repo;
pub mod user_repo;

pub use board_repo::BoardRepo;
pub use change_repo::ChangeRepo;
pub use comment_repo::CommentRepo;
pub use note_repo::NoteRepo;
pub use user_repo::UserRepo;
