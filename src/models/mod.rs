pub mod task;
pub mod user;

pub use task::{AssignmentInput, Task, TaskInput, TaskStatus, TaskWithAssignees, UserIdSelector};
pub use user::{User, UserInput, UserSummary};
