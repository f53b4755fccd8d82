//! # DI Common
//!
//! 依赖注入容器各 crate 共享的错误类型。
//!
//! ## 错误分类
//!
//! - [`ContainerError`] - 注册与解析错误
//! - [`ReflectionError`] - 构造器反射错误
//! - [`ConfigError`] - 声明式配置解析错误

pub mod errors;

pub use errors::*;
