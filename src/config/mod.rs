//! 配置管理
//!
//! 分层加载：内置默认值 → config 文件 → 环境变量。

mod r#impl;
mod structs;

pub use structs::*;
