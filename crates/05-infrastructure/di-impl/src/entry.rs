//! 注册项定义

use di_abstractions::{Factory, Instance};
use std::fmt;

/// 非别名标识符的注册项
///
/// 每个标识符只对应服务、工厂、定义三者之一。
#[derive(Clone)]
pub(crate) enum Entry {
    /// 预先构建的服务
    Service(Instance),
    /// 惰性工厂
    Factory(Factory),
    /// 通过构造器自动装配的类名
    Definition(String),
}

impl Entry {
    /// 注册项类别，用于日志
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Service(_) => "service",
            Self::Factory(_) => "factory",
            Self::Definition(_) => "definition",
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(_) => f.write_str("Service(<instance>)"),
            Self::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
            Self::Definition(class) => f.debug_tuple("Definition").field(class).finish(),
        }
    }
}

/// 一次查找的结果，解析前已释放注册表锁
pub(crate) enum Lookup {
    Service(Instance),
    Alias(String),
    Factory(Factory),
    Definition(String),
}
