use super::{given_a_gateway, given_a_mock_gateway};
use futures::executor::block_on;
use greeting_mvvm::{Action, CounterGateway, DisplayState, OperationFailed};

#[test]
fn given_a_gateway_returning_42_when_read_should_show_loading_then_value() {
    let test = given_a_mock_gateway(|gateway| {
        gateway.expect_fetch().times(1).returning(|| Ok(42));
    });

    test.holder.dispatch(Action::RequestRead);

    test.observer.with_states(|states| {
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], DisplayState::default());

        assert_eq!(states[1].text, "Loading...");
        assert!(states[1].is_busy);
        assert_eq!(states[1].error_message, None);

        assert_eq!(states[2].text, "42");
        assert!(!states[2].is_busy);
        assert_eq!(states[2].error_message, None);
    });
}

#[test]
fn given_a_failing_gateway_when_read_should_keep_original_text() {
    let mut gateway = greeting_mvvm::MockDataGateway::new();
    gateway
        .expect_fetch()
        .times(1)
        .returning(|| Err(OperationFailed::new("Network error")));
    let test = given_a_gateway(gateway, DisplayState::new("Custom"));

    test.holder.dispatch(Action::RequestRead);

    test.observer.with_states(|states| {
        assert_eq!(
            states[1..],
            [
                DisplayState::loading(),
                DisplayState {
                    text: "Custom".to_string(),
                    is_busy: false,
                    error_message: Some("Network error".to_string()),
                },
            ]
        );
    });
}

#[test]
fn given_a_gateway_failing_without_message_when_read_should_report_unknown_error() {
    let test = given_a_mock_gateway(|gateway| {
        gateway
            .expect_fetch()
            .times(1)
            .returning(|| Err(OperationFailed::without_message()));
    });

    test.holder.dispatch(Action::RequestRead);

    let last = test.observer.last().unwrap();
    assert_eq!(last.text, "Hello");
    assert_eq!(last.error_message.as_deref(), Some("Unknown error"));
}

#[test]
fn given_a_counter_gateway_when_read_thrice_then_reset_should_restart_at_80() {
    let test = given_a_gateway(CounterGateway::new(), DisplayState::default());

    for expected in ["80", "160", "240"] {
        test.holder.dispatch(Action::RequestRead);
        assert_eq!(test.holder.state().text, expected);
    }

    test.holder.dispatch(Action::RequestReset);
    assert_eq!(test.holder.state().text, "240");

    test.holder.dispatch(Action::RequestRead);
    assert_eq!(test.holder.state().text, "80");
}

#[test]
fn given_a_successful_reset_should_not_emit_any_state() {
    let test = given_a_mock_gateway(|gateway| {
        gateway.expect_clear().times(1).returning(|| Ok(1));
    });

    test.holder.dispatch(Action::RequestReset);

    assert_eq!(test.observer.count(), 1);
}

#[test]
fn given_a_failing_reset_when_applied_should_propagate_failure() {
    let test = given_a_mock_gateway(|gateway| {
        gateway
            .expect_clear()
            .times(1)
            .returning(|| Err(OperationFailed::new("Clear failed")));
    });

    let result = block_on(test.holder.apply(Action::RequestReset));

    assert_eq!(result, Err(OperationFailed::new("Clear failed")));
    assert_eq!(test.observer.count(), 1);
}

#[test]
fn given_a_failing_reset_when_dispatched_should_leave_state_untouched() {
    let test = given_a_mock_gateway(|gateway| {
        gateway
            .expect_clear()
            .times(1)
            .returning(|| Err(OperationFailed::new("Clear failed")));
    });

    test.holder.dispatch(Action::RequestReset);

    assert_eq!(test.holder.state(), DisplayState::default());
}

#[test]
fn given_a_holder_when_torn_down_should_clear_gateway_once() {
    let test = given_a_mock_gateway(|gateway| {
        gateway.expect_clear().times(1).returning(|| Ok(1));
        gateway.expect_fetch().never();
    });

    test.holder.teardown();

    assert_eq!(test.observer.count(), 1);
}
