//! 宏工具函数

use proc_macro2::Span;
use syn::{Attribute, Expr, Field, Ident, LitStr, PathArguments, Result, Token, Type};

/// 字段的默认值来源
#[derive(Clone)]
pub enum FieldDefault {
    /// `#[inject(default)]`
    DefaultTrait,
    /// `#[inject(default = expr)]`
    Expr(Expr),
}

/// 构造参数的种类
#[derive(Clone)]
pub enum ParameterKind {
    /// `Arc<...>` 字段，从容器按类型解析
    Dependency,
    /// 带默认值的字段
    Default(FieldDefault),
    /// 既无类型依赖也无默认值
    Untyped,
}

/// 从字段上的 `#[inject(...)]` 属性解析默认值
pub fn parse_field_default(attrs: &[Attribute]) -> Result<Option<FieldDefault>> {
    let mut default = None;

    for attr in attrs {
        if !attr.path().is_ident("inject") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(Token![=]) {
                    let value: Expr = meta.value()?.parse()?;
                    default = Some(FieldDefault::Expr(value));
                } else {
                    default = Some(FieldDefault::DefaultTrait);
                }
                Ok(())
            } else {
                Err(meta.error("不支持的 inject 参数，仅支持 `default` 或 `default = 表达式`"))
            }
        })?;
    }

    Ok(default)
}

/// 判断字段类型是否为 `Arc<...>`
pub fn is_arc_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| {
                segment.ident == "Arc"
                    && matches!(segment.arguments, PathArguments::AngleBracketed(_))
            })
            .unwrap_or(false),
        Type::Group(group) => is_arc_type(&group.elem),
        _ => false,
    }
}

/// 确定字段的参数种类
pub fn parameter_kind(field: &Field) -> Result<ParameterKind> {
    if let Some(default) = parse_field_default(&field.attrs)? {
        return Ok(ParameterKind::Default(default));
    }
    if is_arc_type(&field.ty) {
        Ok(ParameterKind::Dependency)
    } else {
        Ok(ParameterKind::Untyped)
    }
}

/// 获取字段对应的参数名，元组结构体使用下标
pub fn parameter_name(field: &Field, index: usize) -> LitStr {
    let name = field
        .ident
        .as_ref()
        .map_or_else(|| index.to_string(), Ident::to_string);
    LitStr::new(&name, Span::call_site())
}
