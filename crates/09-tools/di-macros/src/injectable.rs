//! 可注入类型派生宏实现

use crate::utils::{parameter_kind, parameter_name, FieldDefault, ParameterKind};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Result};

/// 类型级参数 `#[injectable(...)]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectableArgs {
    /// 是否为可调用工厂类
    pub invokable: bool,
}

impl InjectableArgs {
    /// 从结构体属性解析
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("injectable") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("invokable") {
                    args.invokable = true;
                    Ok(())
                } else {
                    Err(meta.error("不支持的 injectable 参数，仅支持 `invokable`"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 实现 #[derive(Injectable)] 宏
pub fn expand(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Injectable 不支持泛型结构体",
        ));
    }
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Injectable 只能用于结构体",
        ));
    };

    let args = InjectableArgs::from_attributes(&input.attrs)?;
    let struct_name = &input.ident;

    let mut parameters = Vec::new();
    let mut values = Vec::new();

    for (index, field) in data.fields.iter().enumerate() {
        let name = parameter_name(field, index);
        let ty = &field.ty;

        match parameter_kind(field)? {
            ParameterKind::Dependency => {
                parameters.push(quote! {
                    ::di_abstractions::Parameter::typed::<#ty>(#name)
                });
                values.push(quote! { args.dependency::<#ty>(#name)? });
            }
            ParameterKind::Default(default) => {
                let default_value = match default {
                    FieldDefault::DefaultTrait => quote! { ::core::default::Default::default() },
                    FieldDefault::Expr(expr) => quote! { ::core::convert::Into::into(#expr) },
                };
                parameters.push(quote! {
                    ::di_abstractions::Parameter::with_default(#name, || {
                        let value: #ty = #default_value;
                        ::std::boxed::Box::new(value)
                            as ::std::boxed::Box<dyn ::core::any::Any + ::core::marker::Send>
                    })
                });
                values.push(quote! { args.value::<#ty>(#name)? });
            }
            ParameterKind::Untyped => {
                parameters.push(quote! {
                    ::di_abstractions::Parameter::untyped(#name)
                });
                values.push(quote! { args.value::<#ty>(#name)? });
            }
        }
    }

    // 没有字段的结构体视为没有构造函数
    let constructor = if data.fields.is_empty() {
        quote! { ::core::option::Option::None }
    } else {
        quote! { ::core::option::Option::Some(::std::vec![#(#parameters),*]) }
    };

    let construct = match &data.fields {
        Fields::Named(fields) => {
            let idents = fields.named.iter().map(|field| &field.ident);
            quote! { Self { #(#idents: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    };

    let invoker = if args.invokable {
        quote! {
            fn invoker() -> ::core::option::Option<::di_abstractions::Invoker> {
                ::core::option::Option::Some(::di_abstractions::invoke_instance::<Self>)
            }
        }
    } else {
        TokenStream::new()
    };

    let registration_fn_name = format_ident!("__di_register_{}", struct_name);

    Ok(quote! {
        impl ::di_abstractions::Injectable for #struct_name {
            fn constructor() -> ::core::option::Option<::std::vec::Vec<::di_abstractions::Parameter>> {
                #constructor
            }

            #[allow(unused_variables)]
            fn construct(
                args: &mut ::di_abstractions::Arguments,
            ) -> ::di_abstractions::ContainerResult<Self> {
                ::core::result::Result::Ok(#construct)
            }

            #invoker
        }

        // 使用 ctor 在程序启动时注册到全局类注册表
        #[::di_abstractions::__private::ctor]
        #[allow(non_snake_case)]
        fn #registration_fn_name() {
            ::di_abstractions::ClassRegistry::global().register::<#struct_name>();
        }
    })
}
