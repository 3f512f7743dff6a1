pub use super::comment::Entity as Comment;
pub use super::project::Entity as Project;
pub use super::project_member::Entity as ProjectMember;
pub use super::task::Entity as Task;
pub use super::user::Entity as User;
