//! 容器配置
//!
//! [`ContainerConfig`] 是构造容器时使用的四段配置；
//! [`ContainerSettings`] 是可以从 TOML / JSON 反序列化的声明式配置

use di_abstractions::{Factory, Instance};
use di_common::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 容器配置
///
/// 四段均可省略，同一段内按添加顺序应用。
#[derive(Debug, Default)]
pub struct ContainerConfig {
    /// 预先构建的服务
    pub services: Vec<(String, Instance)>,
    /// 工厂
    pub factories: Vec<(String, Factory)>,
    /// 自动装配定义
    pub definitions: Vec<(String, String)>,
    /// 别名
    pub aliases: Vec<(String, String)>,
}

impl ContainerConfig {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加服务
    pub fn with_service<T>(self, id: impl Into<String>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.with_service_instance(id, Arc::new(value))
    }

    /// 添加已包装的服务实例
    pub fn with_service_instance(mut self, id: impl Into<String>, instance: Instance) -> Self {
        self.services.push((id.into(), instance));
        self
    }

    /// 添加工厂
    pub fn with_factory(mut self, id: impl Into<String>, factory: Factory) -> Self {
        self.factories.push((id.into(), factory));
        self
    }

    /// 添加自动装配定义
    pub fn with_definition(mut self, id: impl Into<String>, class_name: impl Into<String>) -> Self {
        self.definitions.push((id.into(), class_name.into()));
        self
    }

    /// 添加别名
    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    /// 配置是否为空
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
            && self.factories.is_empty()
            && self.definitions.is_empty()
            && self.aliases.is_empty()
    }
}

/// 声明式容器配置
///
/// 服务以 [`serde_json::Value`] 保存；工厂只能声明为可调用工厂类的类名。
///
/// ```toml
/// [services]
/// foo = [1, 2, 3]
///
/// [aliases]
/// bat = "foo"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerSettings {
    /// 服务，值原样保存
    pub services: BTreeMap<String, serde_json::Value>,
    /// 工厂 id 到可调用工厂类名
    pub factories: BTreeMap<String, String>,
    /// 定义 id 到类名
    pub definitions: BTreeMap<String, String>,
    /// 别名到目标 id
    pub aliases: BTreeMap<String, String>,
}

impl ContainerSettings {
    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::parse("toml", e))
    }

    /// 从 JSON 文本解析
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::parse("json", e))
    }

    /// 转换为容器配置
    pub fn into_config(self) -> ContainerConfig {
        let mut config = ContainerConfig::new();
        for (id, value) in self.services {
            config = config.with_service(id, value);
        }
        for (id, class_name) in self.factories {
            config = config.with_factory(id, Factory::class(class_name));
        }
        for (id, class_name) in self.definitions {
            config = config.with_definition(id, class_name);
        }
        for (alias, target) in self.aliases {
            config = config.with_alias(alias, target);
        }
        config
    }
}
