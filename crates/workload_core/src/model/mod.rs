mod member;
mod task;

pub use member::Member;
pub use task::{Priority, Task, TaskStatus};
