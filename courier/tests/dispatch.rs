use courier::{
    Action, BoxError, Call, Emission, Event, EventKind, HttpClient,
    testing::{CountingCallback, RecordingCallback},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

mod common;
use common::{get, http_client};

#[test]
fn test_overlapping_actions_fire_once_per_emission() {
    let client = HttpClient::new();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    client.on_any(
        [
            Action::CONNECT,
            Action::ALL,
            Action::when(Emission::CONNECT, |_| true),
        ],
        move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    assert_eq!(client.emit(Emission::CONNECT, &get("/")), 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // One emission with several kinds still fires the callback once.
    client.emit(Emission::LIFECYCLE, &get("/"));
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failing_callback_does_not_stop_later_ones() {
    let client = HttpClient::new();
    let exceptions = RecordingCallback::<Call>::new();
    let later = CountingCallback::new();

    client.on(Action::CONNECT, |_, _| -> Result<(), BoxError> {
        Err("first callback failed".into())
    });
    client.on_callback(Action::CONNECT, later.clone());
    client.on_callback(Action::EXCEPTION, exceptions.clone());

    assert_eq!(client.emit(Emission::CONNECT, &get("/")), 2);
    assert_eq!(later.count(), 1);
    assert_eq!(exceptions.errors(), vec!["first callback failed".to_string()]);
}

#[test]
fn test_unobserved_failures_are_swallowed() {
    let client = HttpClient::new();
    let later = CountingCallback::new();
    client.on(Action::CONNECT, |_, _| -> Result<(), BoxError> {
        Err("nobody handles this".into())
    });
    client.on_callback(Action::CONNECT, later.clone());

    assert_eq!(client.emit(Emission::CONNECT, &get("/")), 2);
    assert_eq!(later.count(), 1);

    let error = std::io::Error::other("unheard");
    assert_eq!(client.raise(&error), 0);
}

#[test]
fn test_failing_engine_without_handler_still_fails_the_call() {
    let client = HttpClient::new();
    client.set_engine(courier::testing::ScriptedEngine::<Call>::failing("engine down"));

    let err = client.connect(get("/")).unwrap_err();
    assert_eq!(err.to_string(), "engine down");
}

#[test]
fn test_panicking_callback_is_reported_as_exception() {
    let client = HttpClient::new();
    let exceptions = RecordingCallback::<Call>::new();
    let later = CountingCallback::new();

    client.on(Action::CONNECT, |_, _| -> Result<(), BoxError> {
        panic!("handler bug")
    });
    client.on_callback(Action::CONNECT, later.clone());
    client.on_callback(Action::EXCEPTION, exceptions.clone());

    client.emit(Emission::CONNECT, &get("/"));
    assert_eq!(later.count(), 1);
    assert_eq!(
        exceptions.errors(),
        vec!["callback panicked: handler bug".to_string()]
    );
}

#[test]
fn test_filtered_action_sees_the_call() {
    let client = HttpClient::new();
    let recorder = RecordingCallback::<Call>::new();
    let secure = Action::ALL.filter(|event: &Event<'_, Call>| {
        event
            .call()
            .and_then(|call| call.request().uri().scheme())
            .is_some_and(|scheme| scheme.as_str() == "https")
    });
    client.on_callback(secure, recorder.clone());

    client.emit(Emission::CONNECT, &get("http://example.com/"));
    client.emit(Emission::CONNECT, &get("https://example.com/"));

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    let call = events[0].call.as_ref().unwrap();
    assert_eq!(call.request().uri().to_string(), "https://example.com/");
}

#[test]
fn test_clone_isolation_and_shared_callbacks() {
    let client = http_client();
    let recorder = RecordingCallback::<Call>::new();
    let handle = client.on_callback(Action::CONNECTED, recorder.clone());

    let copy = client.clone();
    let copy_only = CountingCallback::new();
    copy.on_callback(Action::CONNECTED, copy_only.clone());
    copy.off(handle);

    // The original keeps its registration; the copy dropped only its own.
    assert!(client.registration(handle).is_some());
    assert!(copy.registration(handle).is_none());

    client.connect(get("/a")).unwrap();
    copy.connect(get("/b")).unwrap();
    assert_eq!(recorder.count(), 1);
    assert_eq!(copy_only.count(), 1);

    let second = client.clone();
    assert!(Arc::ptr_eq(
        client.registration(handle).unwrap().callback(),
        second.registration(handle).unwrap().callback()
    ));
}

#[test]
fn test_callbacks_may_register_during_dispatch() {
    let client = HttpClient::new();
    let late = CountingCallback::new();
    let registered = late.clone();
    client.on(Action::CONNECT, move |client: &HttpClient, _: &Event<'_, Call>| {
        client.on_callback(Action::CONNECTED, registered.clone());
    });

    client.emit(Emission::CONNECT, &get("/"));
    assert_eq!(client.callback_count(), 2);

    client.emit(Emission::CONNECTED, &get("/"));
    assert_eq!(late.count(), 1);
}

#[test]
fn test_lifecycle_order_of_a_connection() {
    let client = http_client();
    let recorder = RecordingCallback::<Call>::new();
    client.on_callback(Action::combine([Action::ALL, Action::EXCEPTION]), recorder.clone());

    client.connect(get("/")).unwrap();
    assert_eq!(
        recorder.kinds(),
        vec![EventKind::Connect, EventKind::Connected, EventKind::Disconnected]
    );

    recorder.clear();
    client.before(courier::testing::FailingPipe::new("rejected"));
    assert!(client.connect(get("/")).is_err());
    assert_eq!(recorder.kinds(), vec![EventKind::Connect, EventKind::Exception]);
    assert_eq!(recorder.errors(), vec!["rejected".to_string()]);
}
