pub mod assignments;
pub mod identity;

pub use assignments::AssignmentService;
