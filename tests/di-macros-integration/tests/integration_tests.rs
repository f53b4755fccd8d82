//! di-macros 派生宏的集中集成测试

use di_abstractions::{
    ClassInfo, ClassRegistry, ContainerExt, ContainerInterface, ContainerResult, Factory,
    Injectable, Instance, Invokable, CONTAINER_ID,
};
use di_impl::Container;
use di_macros::Injectable;
use std::sync::Arc;

#[derive(Debug, Injectable)]
pub struct Clock;

#[derive(Debug, Injectable)]
pub struct AuditLog {
    clock: Arc<Clock>,
    #[inject(default = "audit")]
    channel: String,
    #[inject(default)]
    entries: Vec<String>,
}

#[derive(Injectable)]
pub struct Scheduler(Arc<Clock>, #[inject(default = 5_u64)] u64);

#[derive(Injectable)]
pub struct Reporter {
    container: Arc<dyn ContainerInterface>,
}

#[derive(Injectable)]
#[injectable(invokable)]
pub struct ChannelFactory {
    #[inject(default = "reports")]
    prefix: String,
}

impl Invokable for ChannelFactory {
    fn invoke(&self, container: &dyn ContainerInterface) -> ContainerResult<Instance> {
        let log = container.get_as::<AuditLog>(AuditLog::class_name())?;
        Ok(Arc::new(format!("{}/{}", self.prefix, log.channel)))
    }
}

#[test]
fn test_derived_types_are_registered_at_startup() {
    let registry = ClassRegistry::global();

    for name in [
        Clock::class_name(),
        AuditLog::class_name(),
        Scheduler::class_name(),
        Reporter::class_name(),
        ChannelFactory::class_name(),
    ] {
        assert!(registry.contains(name), "{name} 应在启动时注册");
    }
    assert!(registry.class_names().contains(&AuditLog::class_name()));
}

#[test]
fn test_class_name_is_type_name() {
    assert_eq!(AuditLog::class_name(), std::any::type_name::<AuditLog>());
    assert!(AuditLog::class_name().ends_with("::AuditLog"));
}

#[test]
fn test_constructor_parameters_follow_field_order() {
    let parameters = AuditLog::constructor().unwrap();

    let names: Vec<_> = parameters.iter().map(|parameter| parameter.name).collect();
    assert_eq!(names, ["clock", "channel", "entries"]);
    assert_eq!(parameters[0].dependency, Some(Clock::class_name()));
    assert!(!parameters[0].is_optional());
    assert!(parameters[1].is_optional());
    assert!(parameters[2].is_optional());
}

#[test]
fn test_unit_struct_has_no_constructor() {
    let info = ClassInfo::of::<Clock>();

    assert!(info.constructor.is_none());
    assert!(info.is_instantiable_without_arguments());
    assert!(!info.is_invokable());
}

#[test]
fn test_container_dependency_uses_container_id() {
    let parameters = Reporter::constructor().unwrap();

    assert_eq!(parameters[0].dependency, Some(CONTAINER_ID));
}

#[test]
fn test_tuple_struct_parameters_use_indices() {
    let parameters = Scheduler::constructor().unwrap();

    assert_eq!(parameters[0].name, "0");
    assert_eq!(parameters[1].name, "1");

    let container = Container::new();
    let scheduler = container
        .get_as::<Scheduler>(Scheduler::class_name())
        .unwrap();
    assert_eq!(scheduler.1, 5);
}

#[test]
fn test_defaults_are_applied_when_autowiring() {
    let container = Container::new();

    let log = container.get_as::<AuditLog>(AuditLog::class_name()).unwrap();

    assert_eq!(log.channel, "audit");
    assert!(log.entries.is_empty());
    assert_eq!(format!("{:?}", log.clock), "Clock");
}

#[test]
fn test_invokable_factory_class() {
    let info = ClassInfo::of::<ChannelFactory>();
    assert!(info.is_invokable());
    assert!(info.is_instantiable_without_arguments());

    let container = Container::new();
    container
        .set_factory("channel", Factory::of::<ChannelFactory>())
        .unwrap();

    let channel = container.get_as::<String>("channel").unwrap();
    assert_eq!(channel.as_str(), "reports/audit");
}

#[test]
fn test_injected_container_is_usable() {
    let container = Arc::new(Container::new());
    container.register_self().unwrap();
    container.set_service_value("answer", 42_i32).unwrap();

    let reporter = container
        .get_as::<Reporter>(Reporter::class_name())
        .unwrap();

    assert_eq!(*reporter.container.get_as::<i32>("answer").unwrap(), 42);
}
