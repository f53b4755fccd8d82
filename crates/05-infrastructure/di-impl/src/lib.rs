//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器：注册表、解析器与构造器自动装配
//!
//! ```ignore
//! use di_impl::{Container, ContainerConfig};
//! use di_abstractions::{ContainerExt, Factory};
//!
//! let container = Container::with_config(
//!     ContainerConfig::new()
//!         .with_service("foo", vec![1, 2, 3])
//!         .with_factory("bar", Factory::from_fn(|_| Vec::<u8>::new()))
//!         .with_alias("bat", "foo"),
//! )?;
//! let numbers = container.get_as::<Vec<i32>>("bat")?;
//! ```

mod config;
mod container;
mod entry;

pub use config::{ContainerConfig, ContainerSettings};
pub use container::Container;
