//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::principals::{
    ActiveModel as PrincipalActiveModel, Entity as Principals, Model as PrincipalModel,
};
