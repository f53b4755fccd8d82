//! # DI Macros
//!
//! 这个 crate 提供了用于描述构造参数并自动注册可注入类型的过程宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`] - 可注入类型派生宏
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use di_abstractions::{ContainerInterface, ContainerResult, Instance, Invokable};
//! use di_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! pub struct Mailer {
//!     container: Arc<dyn ContainerInterface>,
//!     #[inject(default = "noreply@example.com")]
//!     sender: String,
//! }
//!
//! #[derive(Injectable)]
//! #[injectable(invokable)]
//! pub struct MailerFactory;
//!
//! impl Invokable for MailerFactory {
//!     fn invoke(&self, container: &dyn ContainerInterface) -> ContainerResult<Instance> {
//!         Ok(Arc::new(String::from("mailer")))
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入类型派生宏
///
/// 为结构体实现 `di_abstractions::Injectable`，并在程序启动时注册到全局类注册表，
/// 之后容器可以按类名（`std::any::type_name`）自动装配它。
///
/// # 字段规则
///
/// - `#[inject(default)]` - 使用 `Default::default()`
/// - `#[inject(default = 表达式)]` - 使用 `Into::into(表达式)`
/// - `Arc<T>` 字段 - 按类型从容器解析
/// - 其他字段 - 无法解析，容器在自动装配时返回反射错误
///
/// # 参数
///
/// - `#[injectable(invokable)]` - 可调用工厂类，类型必须实现 `Invokable`
#[proc_macro_derive(Injectable, attributes(injectable, inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match injectable::expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => error.to_compile_error().into(),
    }
}
