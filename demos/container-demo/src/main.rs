//! # 依赖注入容器演示
//!
//! 演示容器的主要用法：
//! - 服务、工厂、定义与别名的注册和解析
//! - 通过派生宏实现构造器自动装配
//! - 从 TOML 声明式配置构建容器

use anyhow::{Context, Result};
use clap::Parser;
use di_abstractions::{
    ClassRegistry, ContainerExt, ContainerInterface, ContainerResult, Factory, Injectable,
    Instance, Invokable,
};
use di_impl::{Container, ContainerConfig, ContainerSettings};
use di_macros::Injectable;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "container-demo")]
#[command(about = "依赖注入容器演示")]
struct Args {
    /// 声明式配置文件路径（.toml 或 .json）
    #[arg(short, long)]
    config: Option<String>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 审计日志
#[derive(Debug, Injectable)]
pub struct AuditLog {
    #[inject(default = "audit")]
    channel: String,
}

/// 邮件发送器，依赖审计日志和容器本身
#[derive(Injectable)]
pub struct Mailer {
    audit: Arc<AuditLog>,
    container: Arc<dyn ContainerInterface>,
    #[inject(default = "noreply@example.com")]
    sender: String,
}

impl Mailer {
    fn describe(&self) -> String {
        // 代码注册的是 String，配置文件注册的是 serde_json::Value
        let app = match self.container.get("app") {
            Ok(instance) => instance
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| {
                    instance
                        .downcast_ref::<serde_json::Value>()
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| String::from("unknown")),
            Err(_) => String::from("unknown"),
        };
        format!("{} 通过 {} 发送邮件，审计通道 {}", app, self.sender, self.audit.channel)
    }
}

/// 邮件发送器工厂类
#[derive(Injectable)]
#[injectable(invokable)]
pub struct MailerFactory;

impl Invokable for MailerFactory {
    fn invoke(&self, container: &dyn ContainerInterface) -> ContainerResult<Instance> {
        let mailer: Arc<Mailer> = container.resolve()?;
        Ok(Arc::new(mailer.describe()))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动依赖注入容器演示");
    info!("已注册的可注入类型: {:?}", ClassRegistry::global().class_names());

    demonstrate_programmatic_container()?;

    if let Some(path) = &args.config {
        demonstrate_settings(path)?;
    } else {
        info!("未指定配置文件，跳过声明式配置演示");
    }

    info!("演示结束");
    Ok(())
}

/// 演示以代码方式构建容器
fn demonstrate_programmatic_container() -> Result<()> {
    info!("=== 代码配置演示 ===");

    let container = Arc::new(Container::with_config(
        ContainerConfig::new()
            .with_service("app", String::from("container-demo"))
            .with_service("ports", vec![8080_u16, 8081])
            .with_alias("listen", "ports")
            .with_factory("mailer", Factory::of::<MailerFactory>())
            .with_factory("greeting", Factory::from_fn(|_| String::from("你好"))),
    )?);
    container.register_self()?;

    let ports = container.get_as::<Vec<u16>>("listen")?;
    info!("别名 listen 解析到: {:?}", ports);

    let mailer = container.get_as::<String>("mailer")?;
    info!("工厂类 mailer 解析到: {}", mailer);

    let first = container.get("greeting")?;
    let second = container.get("greeting")?;
    info!("工厂每次返回新实例: {}", !Arc::ptr_eq(&first, &second));

    let audit = container.get_as::<AuditLog>(AuditLog::class_name())?;
    info!("隐式自动装配 {}: {:?}", AuditLog::class_name(), audit);

    match container.get("missing") {
        Ok(_) => warn!("未注册的标识符不应被解析"),
        Err(e) => info!("解析未注册的标识符失败: {}", e),
    }

    Ok(())
}

/// 按文件扩展名解析声明式配置并构建容器，容器注册自身
fn container_from_settings(path: &str, content: &str) -> Result<Arc<Container>> {
    let settings = if path.ends_with(".json") {
        ContainerSettings::from_json_str(content)?
    } else {
        ContainerSettings::from_toml_str(content)?
    };

    let container = Arc::new(Container::with_config(settings.into_config())?);
    container.register_self()?;
    Ok(container)
}

/// 演示从声明式配置构建容器
fn demonstrate_settings(path: &str) -> Result<()> {
    info!("=== 声明式配置演示: {} ===", path);

    let content =
        std::fs::read_to_string(path).with_context(|| format!("读取配置文件失败: {path}"))?;
    let container = container_from_settings(path, &content)?;

    for id in ["app", "name", "ports", "mailer", "audit"] {
        if !container.has(id) {
            info!("配置中没有 {}", id);
            continue;
        }
        match container.get(id) {
            Ok(instance) => {
                if let Some(value) = instance.downcast_ref::<serde_json::Value>() {
                    info!("{} = {}", id, value);
                } else if let Some(text) = instance.downcast_ref::<String>() {
                    info!("{} = {}", id, text);
                } else {
                    info!("{} 已解析", id);
                }
            }
            Err(e) => error!("解析 {} 失败: {}", id, e),
        }
    }

    Ok(())
}
