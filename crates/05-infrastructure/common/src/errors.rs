//! 错误类型定义

use thiserror::Error;

/// 容器错误类型
///
/// 只持有查找协议引用的调用方通常只会看到 [`ContainerError::NotFound`]。
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("标识符已存在: {id}")]
    AlreadyExists { id: String },

    #[error("别名无效: {alias} -> {target}, 目标未注册")]
    InvalidAlias { alias: String, target: String },

    #[error("标识符未找到: {id}")]
    NotFound { id: String },

    #[error("类型转换失败: {id}, 期望类型 {expected}")]
    TypeMismatch { id: String, expected: &'static str },

    #[error("工厂执行失败: {id}, 原因: {source}")]
    FactoryFailed {
        id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("反射失败: {source}")]
    Reflection {
        #[from]
        source: ReflectionError,
    },
}

impl ContainerError {
    /// 创建未找到错误
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// 创建工厂执行失败错误
    pub fn factory_failed(
        id: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::FactoryFailed {
            id: id.into(),
            source: source.into(),
        }
    }

    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 是否为反射错误
    pub fn is_reflection(&self) -> bool {
        matches!(self, Self::Reflection { .. })
    }
}

/// 反射错误类型
///
/// 已注册定义的构造失败以此类型原样向上传播，不会降级为未找到。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    #[error("类不存在: {class}")]
    ClassNotFound { class: String },

    #[error("无法解析构造参数: {class}::{parameter}")]
    UnresolvableParameter { class: String, parameter: String },

    #[error("构造参数缺失: {class}::{parameter}")]
    MissingArgument { class: String, parameter: String },

    #[error("构造参数类型不匹配: {class}::{parameter}, 期望类型 {expected}")]
    ArgumentMismatch {
        class: String,
        parameter: String,
        expected: &'static str,
    },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置解析失败 ({format}): {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// 创建解析错误
    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }
}

/// 结果类型别名
pub type ContainerResult<T> = Result<T, ContainerError>;
pub type ReflectionResult<T> = Result<T, ReflectionError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
