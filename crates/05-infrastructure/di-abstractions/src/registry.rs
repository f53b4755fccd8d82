//! 全局类注册表
//!
//! 保存类名到类描述的映射，容器的隐式自动装配与工厂类都从这里查找类

use crate::reflection::{ClassInfo, Injectable};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

static GLOBAL_CLASS_REGISTRY: Lazy<ClassRegistry> = Lazy::new(ClassRegistry::new);

/// 类注册表
///
/// `#[derive(Injectable)]` 会在程序启动时把类型注册到 [`ClassRegistry::global`]。
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: RwLock<HashMap<&'static str, ClassInfo>>,
}

impl ClassRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取全局注册表
    pub fn global() -> &'static ClassRegistry {
        &GLOBAL_CLASS_REGISTRY
    }

    /// 注册可注入类型
    pub fn register<T: Injectable>(&self) {
        self.register_info(ClassInfo::of::<T>());
    }

    /// 注册类描述，同名类描述会被替换
    pub fn register_info(&self, info: ClassInfo) {
        debug!("注册类: {}", info.name);
        self.classes.write().insert(info.name, info);
    }

    /// 查找类描述
    pub fn find(&self, class_name: &str) -> Option<ClassInfo> {
        self.classes.read().get(class_name).cloned()
    }

    /// 检查类是否存在
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.read().contains_key(class_name)
    }

    /// 获取所有已注册的类名
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.read().keys().copied().collect();
        names.sort_unstable();
        names
    }
}
