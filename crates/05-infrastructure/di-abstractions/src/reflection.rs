//! 构造器反射模型
//!
//! Rust 没有运行时反射，可注入类型在编译期描述自己的构造参数，
//! 容器据此递归解析依赖并调用构造函数

use crate::container::{ContainerInterface, Dependency, Instance};
use di_common::{ContainerError, ContainerResult, ReflectionError};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// 默认值函数类型
pub type DefaultFn = fn() -> Box<dyn Any + Send>;

/// 实例化函数类型
pub type Instantiator = fn(Arguments) -> ContainerResult<Instance>;

/// 调用函数类型，用于可调用工厂类
pub type Invoker = fn(Instance, &dyn ContainerInterface) -> ContainerResult<Instance>;

/// 构造参数描述
#[derive(Clone, Copy)]
pub struct Parameter {
    /// 参数名称
    pub name: &'static str,
    /// 声明的依赖标识符
    pub dependency: Option<&'static str>,
    /// 默认值
    pub default: Option<DefaultFn>,
}

impl Parameter {
    /// 创建按类型注入的参数
    pub fn typed<D: Dependency>(name: &'static str) -> Self {
        Self {
            name,
            dependency: Some(D::id()),
            default: None,
        }
    }

    /// 创建带默认值的参数
    pub fn with_default(name: &'static str, default: DefaultFn) -> Self {
        Self {
            name,
            dependency: None,
            default: Some(default),
        }
    }

    /// 创建既无类型也无默认值的参数
    pub fn untyped(name: &'static str) -> Self {
        Self {
            name,
            dependency: None,
            default: None,
        }
    }

    /// 无参实例化时是否可以省略
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("dependency", &self.dependency)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// 已解析的构造参数值
pub enum Argument {
    /// 从容器解析得到的依赖
    Instance(Instance),
    /// 默认值
    Value(Box<dyn Any + Send>),
}

/// 按声明顺序排列的构造参数
pub struct Arguments {
    class: &'static str,
    values: std::vec::IntoIter<(&'static str, Argument)>,
}

impl Arguments {
    /// 创建参数列表
    pub fn new(class: &'static str, values: Vec<(&'static str, Argument)>) -> Self {
        Self {
            class,
            values: values.into_iter(),
        }
    }

    /// 创建空参数列表
    pub fn empty(class: &'static str) -> Self {
        Self::new(class, Vec::new())
    }

    /// 所属类名
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// 剩余参数数量
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// 取出下一个依赖参数
    pub fn dependency<D: Dependency>(&mut self, parameter: &'static str) -> ContainerResult<D> {
        match self.next(parameter)? {
            Argument::Instance(instance) => D::from_instance(D::id(), instance),
            Argument::Value(_) => Err(self.mismatch(parameter, type_name::<D>())),
        }
    }

    /// 取出下一个值参数
    pub fn value<T: Any + Send>(&mut self, parameter: &'static str) -> ContainerResult<T> {
        match self.next(parameter)? {
            Argument::Value(value) => value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| self.mismatch(parameter, type_name::<T>())),
            Argument::Instance(_) => Err(self.mismatch(parameter, type_name::<T>())),
        }
    }

    fn next(&mut self, parameter: &'static str) -> ContainerResult<Argument> {
        match self.values.next() {
            Some((name, argument)) if name == parameter => Ok(argument),
            _ => Err(ReflectionError::MissingArgument {
                class: self.class.to_string(),
                parameter: parameter.to_string(),
            }
            .into()),
        }
    }

    fn mismatch(&self, parameter: &'static str, expected: &'static str) -> ContainerError {
        ReflectionError::ArgumentMismatch {
            class: self.class.to_string(),
            parameter: parameter.to_string(),
            expected,
        }
        .into()
    }
}

/// 可注入类型 trait
///
/// 通常由 `#[derive(Injectable)]` 实现
pub trait Injectable: Any + Send + Sync + Sized {
    /// 类名，即容器中的隐式标识符
    fn class_name() -> &'static str {
        type_name::<Self>()
    }

    /// 构造参数列表，`None` 表示没有构造函数
    fn constructor() -> Option<Vec<Parameter>>;

    /// 使用已解析的参数构造实例
    fn construct(args: &mut Arguments) -> ContainerResult<Self>;

    /// 作为工厂类时的调用函数
    fn invoker() -> Option<Invoker> {
        None
    }
}

/// 可调用工厂类 trait
///
/// 工厂类以容器为唯一参数被调用，能力在编译期检查
pub trait Invokable: Send + Sync + 'static {
    /// 调用工厂
    fn invoke(&self, container: &dyn ContainerInterface) -> ContainerResult<Instance>;
}

/// 调用已实例化的工厂类
pub fn invoke_instance<T: Invokable>(
    instance: Instance,
    container: &dyn ContainerInterface,
) -> ContainerResult<Instance> {
    let factory = instance
        .downcast::<T>()
        .map_err(|_| ContainerError::TypeMismatch {
            id: type_name::<T>().to_string(),
            expected: type_name::<T>(),
        })?;
    factory.invoke(container)
}

fn instantiate_class<T: Injectable>(mut args: Arguments) -> ContainerResult<Instance> {
    let instance = T::construct(&mut args)?;
    Ok(Arc::new(instance))
}

/// 类描述信息
#[derive(Clone)]
pub struct ClassInfo {
    /// 类名
    pub name: &'static str,
    /// 构造参数列表
    pub constructor: Option<Vec<Parameter>>,
    /// 实例化函数
    pub instantiate: Instantiator,
    /// 调用函数
    pub invoker: Option<Invoker>,
}

impl ClassInfo {
    /// 从可注入类型获取类描述
    pub fn of<T: Injectable>() -> Self {
        Self {
            name: T::class_name(),
            constructor: T::constructor(),
            instantiate: instantiate_class::<T>,
            invoker: T::invoker(),
        }
    }

    /// 是否可以无参实例化
    pub fn is_instantiable_without_arguments(&self) -> bool {
        self.constructor
            .as_ref()
            .map_or(true, |parameters| parameters.iter().all(Parameter::is_optional))
    }

    /// 是否可调用
    pub fn is_invokable(&self) -> bool {
        self.invoker.is_some()
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("constructor", &self.constructor)
            .field("invokable", &self.is_invokable())
            .finish()
    }
}
