//! 依赖注入容器实现
//!
//! 注册表保存服务、工厂、定义与别名；解析器按固定优先级分派，
//! 对未注册的类名执行构造器自动装配

use crate::config::ContainerConfig;
use crate::entry::{Entry, Lookup};
use di_abstractions::{
    container_instance, Argument, Arguments, ClassInfo, ClassRegistry, ContainerInterface,
    Factory, Instance, CONTAINER_ID,
};
use di_common::{ContainerError, ContainerResult, ReflectionError};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

#[derive(Debug, Default)]
struct Registry {
    /// 服务、工厂与定义共用一个命名空间
    entries: HashMap<String, Entry>,
    /// 别名是独立的命名空间
    aliases: HashMap<String, String>,
}

/// 依赖注入容器
///
/// 解析顺序：服务、别名、工厂、定义，最后尝试把标识符当作类名自动装配。
/// 工厂每次解析都会重新调用，容器不缓存任何解析结果。
///
/// 注册表由读写锁保护，但锁不会在调用工厂、构造函数或嵌套解析期间持有。
/// 自动装配没有循环依赖检测，依赖自身的定义会递归直到栈溢出。
#[derive(Debug, Default)]
pub struct Container {
    registry: RwLock<Registry>,
}

impl Container {
    /// 创建空容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用配置创建容器
    ///
    /// 按服务、工厂、定义、别名的顺序应用，别名可以指向同一配置中先注册的标识符。
    pub fn with_config(config: ContainerConfig) -> ContainerResult<Self> {
        let container = Self::new();
        let ContainerConfig {
            services,
            factories,
            definitions,
            aliases,
        } = config;

        for (id, service) in services {
            container.set_service(id, service)?;
        }
        for (id, factory) in factories {
            container.set_factory(id, factory)?;
        }
        for (id, class) in definitions {
            container.set_definition(id, class)?;
        }
        for (alias, target) in aliases {
            container.set_alias(alias, target)?;
        }

        let (entries, aliases) = {
            let registry = container.registry.read();
            (registry.entries.len(), registry.aliases.len())
        };
        info!("构建容器完成，注册了 {} 个标识符和 {} 个别名", entries, aliases);

        Ok(container)
    }

    /// 注册预先构建的服务
    pub fn set_service(&self, id: impl Into<String>, service: Instance) -> ContainerResult<()> {
        self.insert(id.into(), Entry::Service(service))
    }

    /// 注册任意值作为服务
    pub fn set_service_value<T>(&self, id: impl Into<String>, value: T) -> ContainerResult<()>
    where
        T: Any + Send + Sync,
    {
        self.set_service(id, Arc::new(value))
    }

    /// 注册工厂
    pub fn set_factory(&self, id: impl Into<String>, factory: Factory) -> ContainerResult<()> {
        self.insert(id.into(), Entry::Factory(factory))
    }

    /// 注册自动装配定义
    pub fn set_definition(
        &self,
        id: impl Into<String>,
        class_name: impl Into<String>,
    ) -> ContainerResult<()> {
        self.insert(id.into(), Entry::Definition(class_name.into()))
    }

    /// 注册别名
    ///
    /// 目标必须已经注册为服务、工厂或定义。
    pub fn set_alias(
        &self,
        alias: impl Into<String>,
        target: impl Into<String>,
    ) -> ContainerResult<()> {
        let alias = alias.into();
        let target = target.into();
        let mut registry = self.registry.write();

        if registry.entries.contains_key(&alias) || registry.aliases.contains_key(&alias) {
            return Err(ContainerError::AlreadyExists { id: alias });
        }
        if !registry.entries.contains_key(&target) {
            return Err(ContainerError::InvalidAlias { alias, target });
        }

        debug!("注册别名: {} -> {}", alias, target);
        registry.aliases.insert(alias, target);
        Ok(())
    }

    /// 以 [`CONTAINER_ID`] 注册容器自身
    ///
    /// 之后 `Arc<dyn ContainerInterface>` 类型的构造参数会注入这个容器。
    /// 容器因此持有自身的引用，进程结束前不会被释放。
    pub fn register_self(self: &Arc<Self>) -> ContainerResult<()> {
        let container: Arc<dyn ContainerInterface> = self.clone();
        self.set_service(CONTAINER_ID, container_instance(container))?;
        info!("容器已注册自身: {}", CONTAINER_ID);
        Ok(())
    }

    /// 检查标识符是否已注册
    pub fn has(&self, id: &str) -> bool {
        let registry = self.registry.read();
        registry.entries.contains_key(id) || registry.aliases.contains_key(id)
    }

    /// 解析标识符
    ///
    /// 已注册的定义指向不存在的类时返回 [`ReflectionError::ClassNotFound`]，
    /// 而不是 `NotFound`，与早期把它视为未找到的行为有意不同。
    pub fn get(&self, id: &str) -> ContainerResult<Instance> {
        match self.lookup(id) {
            Some(Lookup::Service(instance)) => {
                trace!("返回服务: {}", id);
                Ok(instance)
            }
            Some(Lookup::Alias(target)) => {
                debug!("解析别名: {} -> {}", id, target);
                self.get(&target)
            }
            Some(Lookup::Factory(factory)) => self.invoke_factory(id, &factory),
            Some(Lookup::Definition(class_name)) => {
                debug!("解析定义: {} -> {}", id, class_name);
                let class = ClassRegistry::global()
                    .find(&class_name)
                    .ok_or(ReflectionError::ClassNotFound { class: class_name })?;
                self.autowire(&class)
            }
            None => match ClassRegistry::global().find(id) {
                Some(class) => {
                    debug!("隐式自动装配: {}", id);
                    self.autowire(&class)
                }
                None => Err(ContainerError::not_found(id)),
            },
        }
    }

    fn insert(&self, id: String, entry: Entry) -> ContainerResult<()> {
        let mut registry = self.registry.write();
        match registry.entries.entry(id) {
            MapEntry::Occupied(occupied) => Err(ContainerError::AlreadyExists {
                id: occupied.key().clone(),
            }),
            MapEntry::Vacant(vacant) => {
                debug!("注册{}: {}", entry.kind(), vacant.key());
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    fn lookup(&self, id: &str) -> Option<Lookup> {
        let registry = self.registry.read();
        match (registry.entries.get(id), registry.aliases.get(id)) {
            (Some(Entry::Service(instance)), _) => Some(Lookup::Service(instance.clone())),
            (_, Some(target)) => Some(Lookup::Alias(target.clone())),
            (Some(Entry::Factory(factory)), None) => Some(Lookup::Factory(factory.clone())),
            (Some(Entry::Definition(class)), None) => Some(Lookup::Definition(class.clone())),
            (None, None) => None,
        }
    }

    fn invoke_factory(&self, id: &str, factory: &Factory) -> ContainerResult<Instance> {
        let container: &dyn ContainerInterface = self;
        match factory {
            Factory::Callable(factory_fn) => {
                debug!("调用工厂: {}", id);
                factory_fn(container)
            }
            Factory::Class(class_name) => {
                debug!("调用工厂类: {} -> {}", id, class_name);
                let Some(class) = ClassRegistry::global().find(class_name) else {
                    warn!("工厂类不存在: {} -> {}", id, class_name);
                    return Err(ContainerError::not_found(id));
                };
                let Some(invoker) = class.invoker else {
                    warn!("工厂类不可调用: {} -> {}", id, class_name);
                    return Err(ContainerError::not_found(id));
                };
                if !class.is_instantiable_without_arguments() {
                    warn!("工厂类无法无参实例化: {} -> {}", id, class_name);
                    return Err(ContainerError::not_found(id));
                }
                let instance = Self::instantiate_without_arguments(&class).map_err(|error| {
                    warn!("工厂类实例化失败: {} -> {}, 原因: {}", id, class_name, error);
                    ContainerError::not_found(id)
                })?;
                invoker(instance, container)
            }
        }
    }

    fn instantiate_without_arguments(class: &ClassInfo) -> ContainerResult<Instance> {
        let values = class
            .constructor
            .iter()
            .flatten()
            .filter_map(|parameter| {
                parameter
                    .default
                    .map(|default| (parameter.name, Argument::Value(default())))
            })
            .collect();
        (class.instantiate)(Arguments::new(class.name, values))
    }

    /// 构造器自动装配
    fn autowire(&self, class: &ClassInfo) -> ContainerResult<Instance> {
        let Some(parameters) = &class.constructor else {
            trace!("类没有构造函数，直接实例化: {}", class.name);
            return (class.instantiate)(Arguments::empty(class.name));
        };

        let mut values = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let argument = if let Some(dependency) = parameter.dependency {
                trace!("注入依赖: {}::{} <- {}", class.name, parameter.name, dependency);
                Argument::Instance(self.get(dependency)?)
            } else if let Some(default) = parameter.default {
                trace!("使用默认值: {}::{}", class.name, parameter.name);
                Argument::Value(default())
            } else {
                return Err(ReflectionError::UnresolvableParameter {
                    class: class.name.to_string(),
                    parameter: parameter.name.to_string(),
                }
                .into());
            };
            values.push((parameter.name, argument));
        }

        (class.instantiate)(Arguments::new(class.name, values))
    }
}

impl ContainerInterface for Container {
    fn has(&self, id: &str) -> bool {
        Container::has(self, id)
    }

    fn get(&self, id: &str) -> ContainerResult<Instance> {
        Container::get(self, id)
    }
}
