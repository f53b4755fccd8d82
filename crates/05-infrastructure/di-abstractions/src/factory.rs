//! 工厂注册抽象
//!
//! 工厂在每次解析时都会重新调用，结果不做缓存

use crate::container::{ContainerInterface, Instance};
use crate::reflection::Injectable;
use di_common::ContainerResult;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 工厂函数类型
pub type FactoryFn =
    Arc<dyn Fn(&dyn ContainerInterface) -> ContainerResult<Instance> + Send + Sync>;

/// 工厂注册项
#[derive(Clone)]
pub enum Factory {
    /// 直接调用的闭包，参数为容器本身
    Callable(FactoryFn),
    /// 可调用工厂类的类名，解析时无参实例化后以容器为参数调用
    Class(String),
}

impl Factory {
    /// 由返回任意值的闭包创建工厂
    pub fn from_fn<T, F>(factory_fn: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn ContainerInterface) -> T + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(move |container: &dyn ContainerInterface| {
            Ok(Arc::new(factory_fn(container)) as Instance)
        }))
    }

    /// 由可能失败的闭包创建工厂
    pub fn try_from_fn<F>(factory_fn: F) -> Self
    where
        F: Fn(&dyn ContainerInterface) -> ContainerResult<Instance> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(factory_fn))
    }

    /// 由类名创建工厂
    pub fn class(class_name: impl Into<String>) -> Self {
        Self::Class(class_name.into())
    }

    /// 由可注入类型创建工厂
    pub fn of<T: Injectable>() -> Self {
        Self::Class(T::class_name().to_string())
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Factory::Callable(<function>)"),
            Self::Class(name) => f.debug_tuple("Factory::Class").field(name).finish(),
        }
    }
}
