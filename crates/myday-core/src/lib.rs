pub mod errors;
pub mod ids;
pub mod memory;
pub mod repository;
pub mod tasks;

pub use errors::TaskError;
pub use ids::TaskId;
pub use memory::InMemoryTaskRepo;
pub use repository::TaskRepository;
pub use tasks::{NewTask, Task, UpdateTask, UpdateTaskBody};
