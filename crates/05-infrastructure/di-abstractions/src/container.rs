//! 容器查找协议
//!
//! 只持有容器引用的下游消费者只能看到 `has` 与 `get` 两个操作

use di_common::{ContainerError, ContainerResult};
use std::any::{type_name, Any};
use std::sync::Arc;

/// 容器解析出的实例
///
/// 服务按引用返回，多次 `get` 得到的是同一个 `Arc`。
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 容器自身在查找协议下的标识符
pub const CONTAINER_ID: &str = "di_abstractions::ContainerInterface";

/// 容器查找协议 trait
pub trait ContainerInterface: Send + Sync {
    /// 检查标识符是否已注册
    fn has(&self, id: &str) -> bool;

    /// 解析标识符
    fn get(&self, id: &str) -> ContainerResult<Instance>;
}

/// 查找协议的类型化扩展
pub trait ContainerExt: ContainerInterface {
    /// 解析标识符并转换为具体类型
    fn get_as<T>(&self, id: &str) -> ContainerResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// 按依赖类型解析
    fn resolve<D: Dependency>(&self) -> ContainerResult<D> {
        let id = D::id();
        D::from_instance(id, self.get(id)?)
    }
}

impl<C: ContainerInterface + ?Sized> ContainerExt for C {}

/// 可注入的依赖类型
///
/// 描述构造参数如何在容器中查找以及如何从 [`Instance`] 还原。
pub trait Dependency: Sized + Send + 'static {
    /// 查找所用的标识符
    fn id() -> &'static str;

    /// 从解析结果还原依赖
    fn from_instance(id: &str, instance: Instance) -> ContainerResult<Self>;
}

impl<T: Any + Send + Sync> Dependency for Arc<T> {
    fn id() -> &'static str {
        type_name::<T>()
    }

    fn from_instance(id: &str, instance: Instance) -> ContainerResult<Self> {
        instance
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }
}

impl Dependency for Arc<dyn ContainerInterface> {
    fn id() -> &'static str {
        CONTAINER_ID
    }

    fn from_instance(id: &str, instance: Instance) -> ContainerResult<Self> {
        instance
            .downcast_ref::<Arc<dyn ContainerInterface>>()
            .cloned()
            .ok_or_else(|| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<Arc<dyn ContainerInterface>>(),
            })
    }
}

/// 将容器包装为可注册的服务实例
///
/// 以 [`CONTAINER_ID`] 注册后，`Arc<dyn ContainerInterface>` 类型的构造参数即可注入容器本身。
pub fn container_instance(container: Arc<dyn ContainerInterface>) -> Instance {
    Arc::new(container)
}
