//! Reusable mock entrypoints for exercising cross-contract calls with
//! `TestHost::setup_mock_entrypoint`.
use concordium_std::test_infrastructure::MockFn;
use concordium_std::*;

/// Core of every mock entrypoint here: parse the parameter as `D`, run
/// `produce` over it, and trap unless it yields a return value. No state or
/// balance changes.
fn parsed_mock<D: Deserial, T: Serial, S>(produce: impl Fn(&D) -> Option<T> + 'static) -> MockFn<S> {
    MockFn::new(move |parameter, _amount, _balance, _state| {
        let value =
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
        match produce(&value) {
            Some(return_value) => Ok((false, Some(return_value))),
            None => Err(CallContractError::Trap),
        }
    })
}

/// Mock entrypoint that only checks the parameter parses, then returns the
/// provided value.
pub fn parse_and_ok_mock<D: Deserial, S>(
    return_value: impl Clone + Serial + 'static,
) -> MockFn<S> {
    parsed_mock(move |_: &D| Some(return_value.clone()))
}

/// Mock entrypoint that asserts a predicate over the parsed parameter before
/// returning the provided value.
pub fn parse_and_check_mock<D: Deserial, S>(
    check: impl Fn(&D) -> bool + 'static,
    return_value: impl Clone + Serial + 'static,
) -> MockFn<S> {
    parsed_mock(move |value| {
        if check(value) {
            Some(return_value.clone())
        } else {
            None
        }
    })
}

/// Mock entrypoint computing the return value from the parsed parameter,
/// trapping when the closure yields `None`.
pub fn parse_and_map_mock<D: Deserial, T: Serial, S>(
    f: impl Fn(&D) -> Option<T> + 'static,
) -> MockFn<S> {
    parsed_mock(f)
}
