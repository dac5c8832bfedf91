
use core::future::Future;
use core::pin::Pin;

pub(crate) use gated_gateway::*;
use greeting_mvvm::{
    create_test_spawner, DataGateway, DisplayState, GreetingReducer, MockDataGateway, StateHolder,
    TestDriver, TestObserver,
};

mod scenario_tests;

pub(crate) type BoxedSpawner = Box<dyn Fn(Pin<Box<dyn Future<Output = ()> + Send>>)>;

pub(crate) struct IntegrationTest<G: DataGateway + 'static> {
    pub(crate) holder: StateHolder<GreetingReducer<G>, BoxedSpawner>,
    pub(crate) observer: TestObserver,
}

/// Holder over `gateway` whose dispatches complete before `dispatch` returns.
pub(crate) fn given_a_gateway<G: DataGateway + 'static>(
    gateway: G,
    initial: DisplayState,
) -> IntegrationTest<G> {
    build(gateway, initial, Box::new(create_test_spawner()))
}

pub(crate) fn given_a_mock_gateway(
    configure: impl FnOnce(&mut MockDataGateway),
) -> IntegrationTest<MockDataGateway> {
    let mut gateway = MockDataGateway::new();
    configure(&mut gateway);
    given_a_gateway(gateway, DisplayState::default())
}

/// Holder over `gateway` whose dispatches only progress when `driver` runs.
pub(crate) fn given_a_driven_gateway<G: DataGateway + 'static>(
    gateway: G,
    driver: &TestDriver,
) -> IntegrationTest<G> {
    build(gateway, DisplayState::default(), Box::new(driver.spawner()))
}

fn build<G: DataGateway + 'static>(
    gateway: G,
    initial: DisplayState,
    spawner: BoxedSpawner,
) -> IntegrationTest<G> {
    let observer = TestObserver::new();
    let holder = StateHolder::with_state(initial, GreetingReducer::new(gateway), spawner);
    holder.observe(observer.clone());

    IntegrationTest { holder, observer }
}
