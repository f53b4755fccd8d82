//! 依赖注入容器端到端集成测试

use anyhow::Result;
use di_abstractions::{
    ContainerError, ContainerExt, ContainerInterface, ContainerResult, Factory, Injectable,
    Instance, Invokable, CONTAINER_ID,
};
use di_impl::{Container, ContainerConfig, ContainerSettings};
use di_macros::Injectable;
use std::any::type_name;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// 通过构造参数拿到容器本身的测试类
#[derive(Injectable)]
struct ClassWithContainerDependency {
    container: Arc<dyn ContainerInterface>,
}

/// 每次调用都产生新计数的工厂类
#[derive(Injectable)]
#[injectable(invokable)]
struct CounterFactory;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

impl Invokable for CounterFactory {
    fn invoke(&self, _container: &dyn ContainerInterface) -> ContainerResult<Instance> {
        Ok(Arc::new(COUNTER.fetch_add(1, Ordering::SeqCst)))
    }
}

#[derive(Injectable)]
struct Repository {
    #[inject(default = "users")]
    table: String,
}

#[derive(Injectable)]
struct UserService {
    repository: Arc<Repository>,
    container: Arc<dyn ContainerInterface>,
}

fn data_ptr<T: ?Sized>(value: &Arc<T>) -> *const () {
    Arc::as_ptr(value).cast::<()>()
}

#[test]
fn test_aliased_service_is_the_same_instance() -> Result<()> {
    let container = Container::with_config(
        ContainerConfig::new()
            .with_service("foo", vec![1, 2, 3])
            .with_alias("bat", "foo"),
    )?;

    let foo = container.get_as::<Vec<i32>>("foo")?;
    let bat = container.get_as::<Vec<i32>>("bat")?;

    assert_eq!(*bat, vec![1, 2, 3]);
    assert!(Arc::ptr_eq(&foo, &bat));
    Ok(())
}

#[test]
fn test_factory_returns_distinct_instances() -> Result<()> {
    let container = Container::with_config(
        ContainerConfig::new().with_factory("bar", Factory::from_fn(|_| vec![String::from("x")])),
    )?;

    let first = container.get("bar")?;
    let second = container.get("bar")?;

    assert!(!Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn test_definition_receives_the_container_itself() -> Result<()> {
    let container = Arc::new(Container::with_config(
        ContainerConfig::new()
            .with_service("foo", 42_u64)
            .with_definition("c", ClassWithContainerDependency::class_name()),
    )?);
    container.register_self()?;
    assert!(container.has(CONTAINER_ID));

    let instance = container.get_as::<ClassWithContainerDependency>("c")?;

    assert_eq!(data_ptr(&instance.container), data_ptr(&container));
    assert!(instance.container.has("foo"));
    assert_eq!(*instance.container.get_as::<u64>("foo")?, 42);
    Ok(())
}

#[test]
fn test_definition_without_registered_container_is_not_found() -> Result<()> {
    let container = Container::new();
    container.set_definition("c", ClassWithContainerDependency::class_name())?;

    let error = container.get("c").unwrap_err();

    assert!(matches!(error, ContainerError::NotFound { ref id } if id == CONTAINER_ID));
    Ok(())
}

#[test]
fn test_nested_autowiring_through_shared_container() -> Result<()> {
    let container = Arc::new(Container::new());
    container.register_self()?;
    let shared: Arc<dyn ContainerInterface> = container.clone();

    let service: Arc<UserService> = shared.resolve()?;

    assert_eq!(service.repository.table, "users");
    assert_eq!(data_ptr(&service.container), data_ptr(&container));
    Ok(())
}

#[test]
fn test_container_from_toml_settings() -> Result<()> {
    let content = format!(
        r#"
        [services]
        foo = [1, 2, 3]

        [factories]
        counter = "{counter}"

        [definitions]
        repository = "{repository}"

        [aliases]
        bat = "foo"
        numbers = "counter"
        "#,
        counter = type_name::<CounterFactory>(),
        repository = Repository::class_name(),
    );
    let settings = ContainerSettings::from_toml_str(&content)?;
    let container = Container::with_config(settings.into_config())?;

    for id in ["foo", "bat", "counter", "numbers", "repository"] {
        assert!(container.has(id), "{id} 应已注册");
    }

    let foo = container.get_as::<serde_json::Value>("bat")?;
    assert_eq!(*foo, serde_json::json!([1, 2, 3]));

    let first = container.get_as::<usize>("counter")?;
    let second = container.get_as::<usize>("numbers")?;
    assert!(*second > *first);

    let repository = container.get_as::<Repository>("repository")?;
    assert_eq!(repository.table, "users");
    Ok(())
}

#[test]
fn test_container_from_json_settings_rejects_dangling_alias() -> Result<()> {
    let settings = ContainerSettings::from_json_str(r#"{"aliases": {"bat": "foo"}}"#)?;

    let error = Container::with_config(settings.into_config()).unwrap_err();

    assert!(matches!(error, ContainerError::InvalidAlias { .. }));
    Ok(())
}

#[test]
fn test_type_mismatch_is_reported() -> Result<()> {
    let container = Container::new();
    container.set_service_value("foo", String::from("text"))?;

    let error = container.get_as::<u32>("foo").unwrap_err();

    assert!(matches!(error, ContainerError::TypeMismatch { ref id, .. } if id == "foo"));
    Ok(())
}

#[test]
fn test_container_is_shared_across_threads() -> Result<()> {
    let container = Arc::new(Container::new());
    container.set_service_value("foo", vec![1, 2, 3])?;
    let expected = container.get("foo")?;

    thread::scope(|scope| {
        for index in 0..4 {
            let container = &container;
            let expected = &expected;
            scope.spawn(move || {
                let id = format!("factory_{index}");
                container
                    .set_factory(id.clone(), Factory::from_fn(move |_| index))
                    .unwrap();
                assert_eq!(*container.get_as::<i32>(&id).unwrap(), index);
                assert!(Arc::ptr_eq(&container.get("foo").unwrap(), expected));
            });
        }
    });

    for index in 0..4 {
        assert!(container.has(&format!("factory_{index}")));
    }
    Ok(())
}
