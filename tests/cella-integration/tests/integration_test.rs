//! Centralized integration tests for the container workspace
//!
//! 所有测试组件在程序启动时登记到全局类型目录，
//! 各测试使用独立容器实例，互不共享已注册的生产者。

use cella_common::{ContainerError, Key};
use cella_core::{global_container, Container, Factory};
use cella_definitions::{
    apply_definitions, apply_key_value_file, container_from_key_value_file, Definitions,
    DefinitionsError,
};
use std::sync::Arc;

/// 测试组件
mod dummy {
    use cella_common::{submit_injectable, submit_opaque};
    use cella_common::{ContainerResult, Injectable, Key, ResolvedArgs};
    use std::sync::Arc;

    /// 无依赖的叶子服务
    #[derive(Debug)]
    pub struct ServiceA;

    impl Injectable for ServiceA {
        fn construct(_args: &mut ResolvedArgs) -> ContainerResult<Self> {
            Ok(Self)
        }
    }

    /// 另一个无依赖的叶子服务
    #[derive(Debug)]
    pub struct ServiceC;

    impl Injectable for ServiceC {
        fn construct(_args: &mut ResolvedArgs) -> ContainerResult<Self> {
            Ok(Self)
        }
    }

    /// 带两个构造依赖的服务，同时声明实现了抽象服务键
    #[derive(Debug)]
    pub struct ServiceB {
        pub service_a: Arc<ServiceA>,
        pub service_c: Arc<ServiceC>,
    }

    impl Injectable for ServiceB {
        fn dependency_keys() -> Vec<Key> {
            vec![Key::of::<ServiceA>(), Key::of::<ServiceC>()]
        }

        fn provided_keys() -> Vec<Key> {
            vec![Key::new("integration_test::dummy::BaseService")]
        }

        fn construct(args: &mut ResolvedArgs) -> ContainerResult<Self> {
            Ok(Self {
                service_a: args.take::<ServiceA>()?,
                service_c: args.take::<ServiceC>()?,
            })
        }
    }

    /// 未携带能力标记的类型，注册和解析都应被拒绝
    #[derive(Debug)]
    pub struct ServiceD;

    /// 工厂测试用依赖
    #[derive(Debug)]
    pub struct Dummy;

    impl Injectable for Dummy {
        fn construct(_args: &mut ResolvedArgs) -> ContainerResult<Self> {
            Ok(Self)
        }
    }

    /// 由工厂装配的组件
    #[derive(Debug)]
    pub struct Bar {
        pub dummy: Arc<Dummy>,
    }

    impl Injectable for Bar {
        fn dependency_keys() -> Vec<Key> {
            vec![Key::of::<Dummy>()]
        }

        fn construct(args: &mut ResolvedArgs) -> ContainerResult<Self> {
            Ok(Self {
                dummy: args.take::<Dummy>()?,
            })
        }
    }

    /// 相互依赖的一对类型，用于循环检测
    #[derive(Debug)]
    pub struct Ping {
        pub pong: Arc<Pong>,
    }

    impl Injectable for Ping {
        fn dependency_keys() -> Vec<Key> {
            vec![Key::of::<Pong>()]
        }

        fn construct(args: &mut ResolvedArgs) -> ContainerResult<Self> {
            Ok(Self {
                pong: args.take::<Pong>()?,
            })
        }
    }

    #[derive(Debug)]
    pub struct Pong {
        pub ping: Arc<Ping>,
    }

    impl Injectable for Pong {
        fn dependency_keys() -> Vec<Key> {
            vec![Key::of::<Ping>()]
        }

        fn construct(args: &mut ResolvedArgs) -> ContainerResult<Self> {
            Ok(Self {
                ping: args.take::<Ping>()?,
            })
        }
    }

    submit_injectable!(ServiceA);
    submit_injectable!(ServiceB);
    submit_injectable!(ServiceC);
    submit_injectable!(Dummy);
    submit_injectable!(Bar);
    submit_injectable!(Ping);
    submit_injectable!(Pong);
    submit_opaque!(ServiceD);
}

use dummy::{Bar, Dummy, Ping, ServiceA, ServiceB, ServiceC, ServiceD};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixture(name: &str) -> String {
    format!("{}/tests/resources/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_unregistered_key_resolves_via_fallback() {
    init_tracing();
    let container = Container::new();
    assert!(!container.exists(Key::of::<ServiceA>()));

    let service = container.resolve_type::<ServiceA>().unwrap();
    assert!(container.exists(Key::of::<ServiceA>()));
    drop(service);
}

#[test]
fn test_fallback_rejects_unmarked_type() {
    let container = Container::new();
    let result = container.resolve_type::<ServiceD>();
    assert!(matches!(result, Err(ContainerError::NotInjectable { .. })));
}

#[test]
fn test_unknown_key_is_reported() {
    let container = Container::new();
    let result = container.resolve_key("does::not::Exist");
    assert!(matches!(result, Err(ContainerError::TypeNotFound { .. })));
}

#[test]
fn test_repeated_resolution_returns_same_instance() {
    let container = Container::new();
    let first = container.resolve_type::<ServiceA>().unwrap();
    let second = container.resolve_type::<ServiceA>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_abstract_key_resolves_to_wired_implementation() {
    let container = Container::new();
    container
        .add_definition(
            "integration_test::dummy::BaseService",
            Key::of::<ServiceB>(),
        )
        .unwrap();

    let service: Arc<ServiceB> = container
        .resolve("integration_test::dummy::BaseService")
        .unwrap();

    // 构造依赖与直接解析得到的是同一批单例
    let service_a = container.resolve_type::<ServiceA>().unwrap();
    let service_c = container.resolve_type::<ServiceC>().unwrap();
    assert!(Arc::ptr_eq(&service.service_a, &service_a));
    assert!(Arc::ptr_eq(&service.service_c, &service_c));
}

#[test]
fn test_registered_instance_is_returned_as_is() {
    let container = Container::new();
    container.add_instance("service_a", ServiceA).unwrap();

    let first = container.resolve::<ServiceA>("service_a").unwrap();
    let second = container.resolve::<ServiceA>("service_a").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_factory_dependencies_are_resolved() {
    let container = Container::new();
    let factory = Factory::returning::<Bar, _>(vec![Key::of::<Dummy>()], |args| {
        Ok(Bar {
            dummy: args.take::<Dummy>()?,
        })
    });
    container.add_factory("bar", factory).unwrap();

    let bar = container.resolve::<Bar>("bar").unwrap();
    let dummy = container.resolve_type::<Dummy>().unwrap();
    assert!(Arc::ptr_eq(&bar.dummy, &dummy));

    // 工厂产物同样被记忆化
    let again = container.resolve::<Bar>("bar").unwrap();
    assert!(Arc::ptr_eq(&bar, &again));
}

#[test]
fn test_opaque_factory_product_is_rejected() {
    let container = Container::new();
    let factory = Factory::opaque(Vec::new(), |_| {
        Ok(cella_common::SharedInstance::new(ServiceD))
    });
    container.add_factory("service_d", factory).unwrap();

    let result = container.resolve_key("service_d");
    assert!(matches!(result, Err(ContainerError::NotInjectable { .. })));
}

#[test]
fn test_clear_resets_memoized_instances() {
    let container = Container::new();
    let before = container.resolve_type::<ServiceC>().unwrap();

    container.clear();
    assert!(!container.exists(Key::of::<ServiceC>()));

    let after = container.resolve_type::<ServiceC>().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn test_circular_dependency_fails_fast() {
    let container = Container::new();
    let result = container.resolve_type::<Ping>();
    assert!(matches!(
        result,
        Err(ContainerError::CircularDependency { .. })
    ));
}

#[test]
fn test_container_from_key_value_file() {
    init_tracing();
    let container = container_from_key_value_file(fixture("definitions.ini")).unwrap();

    let service_a = container.resolve::<ServiceA>("service_a").unwrap();
    let base: Arc<ServiceB> = container
        .resolve("integration_test::dummy::BaseService")
        .unwrap();
    // 抽象键下的实现与叶子单例共享
    assert!(Arc::ptr_eq(&base.service_a, &service_a));
}

#[test]
fn test_key_value_file_partial_application_on_failure() {
    let container = Container::new();
    let result = apply_key_value_file(&container, fixture("fallable_definitions.ini"));

    assert!(matches!(
        result,
        Err(DefinitionsError::Registration {
            source: ContainerError::TypeNotFound { .. }
        })
    ));
    // 失败条目之前的定义已经生效
    assert!(container.exists("service_a"));
    assert!(!container.exists("broken"));
}

#[test]
fn test_missing_definition_file() {
    let result = container_from_key_value_file(fixture("no_such_file.ini"));
    assert!(matches!(result, Err(DefinitionsError::FileNotFound { .. })));
}

#[test]
fn test_programmatic_definitions_cover_all_kinds() {
    let container = Container::new();
    let definitions = Definitions::new()
        .definition("service_b", Key::of::<ServiceB>())
        .factory(
            "bar",
            Factory::returning::<Bar, _>(vec![Key::of::<Dummy>()], |args| {
                Ok(Bar {
                    dummy: args.take::<Dummy>()?,
                })
            }),
        )
        .instance("service_a", ServiceA);

    let applied = apply_definitions(&container, definitions).unwrap();
    assert_eq!(applied, 3);

    let service_b = container.resolve::<ServiceB>("service_b").unwrap();
    let bar = container.resolve::<Bar>("bar").unwrap();
    let service_a = container.resolve::<ServiceA>("service_a").unwrap();

    // 实例注册的 service_a 与定义解析的依赖是不同的注册键，各自独立
    assert!(!Arc::ptr_eq(&service_b.service_a, &service_a));
    drop(bar);
}

#[test]
fn test_global_container_is_shared() {
    let first = global_container();
    let second = global_container();
    assert!(std::ptr::eq(first, second));

    let before = first.resolve_type::<ServiceC>().unwrap();
    let after = second.resolve_type::<ServiceC>().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}
