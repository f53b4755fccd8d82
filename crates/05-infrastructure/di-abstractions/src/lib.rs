//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义容器查找协议、工厂与构造器反射模型。
//!
//! ## 核心接口
//!
//! - [`ContainerInterface`] - 容器查找协议
//! - [`Factory`] - 工厂注册项
//! - [`Injectable`] - 可注入类型
//! - [`Invokable`] - 可调用工厂类
//! - [`ClassRegistry`] - 全局类注册表

pub mod container;
pub mod factory;
pub mod reflection;
pub mod registry;

pub use container::*;
pub use factory::*;
pub use reflection::*;
pub use registry::*;

pub use di_common::{
    ConfigError, ConfigResult, ContainerError, ContainerResult, ReflectionError, ReflectionResult,
};

#[doc(hidden)]
pub mod __private {
    pub use ctor::ctor;
}
