use courier::{
    Action, Body, Call, ContentHeaders, DefaultHeaders, Event, HttpClient, LoggingMiddleware,
    MissingResponse, Next, Query, Request, RequireResponse, Response, StatusCode, Uri,
    http::{BodyPart, BytesBody, JsonBody, MultipartBody, ParametersBody, names},
    testing::{RecordingCallback, ScriptedEngine},
};

mod common;
use common::{get, http_client};

#[test]
fn test_query_get_and_with() {
    let query = Query::parse("a=1&b=2").unwrap();
    assert_eq!(query.get("a"), Some("1"));

    let query = query.with("c", "3");
    assert!(["a", "b", "c"].iter().all(|name| query.contains(name)));
    assert_eq!(Query::parse(&query.to_string()).unwrap(), query);
}

#[test]
fn test_uri_round_trip_is_idempotent() {
    for text in [
        "http://user@example.com:8080/a/b?x=1&y=two%20words#top",
        "https://[::1]/",
        "mailto:someone@example.com",
        "/relative/path?q",
    ] {
        let uri = Uri::parse(text).unwrap();
        let again = Uri::parse(&uri.to_string()).unwrap();
        assert_eq!(again, uri, "{text}");
    }
}

#[test]
fn test_multipart_upload_through_client() {
    let body = MultipartBody::new()
        .with_boundary("XyZ")
        .unwrap()
        .with_part(BodyPart::form_data("title", "hello").unwrap())
        .with_part(
            BodyPart::form_file("upload", "a.bin", BytesBody::new(&b"\x01\x02"[..])).unwrap(),
        );
    let expected_length = body.content_length().unwrap();

    let client = http_client();
    client.use_middleware(&ContentHeaders);
    let call = client
        .connect(Call::new(Request::post("http://example.com/upload", body).unwrap()))
        .unwrap();

    let request = call.request();
    assert_eq!(
        request.headers().get(names::CONTENT_TYPE).unwrap(),
        "multipart/form-data; boundary=XyZ"
    );
    assert_eq!(
        request.headers().get(names::CONTENT_LENGTH).unwrap().as_str(),
        expected_length.to_string()
    );
    let text = request.body().unwrap().to_text().unwrap();
    assert_eq!(text.len() as u64, expected_length);
    assert!(text.starts_with("--XyZ\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nhello\r\n"));
    assert!(text.ends_with("\u{1}\u{2}\r\n--XyZ--\r\n"));
}

#[test]
fn test_full_client_with_http_middleware() {
    let seen = RecordingCallback::<Call>::new();
    let client = HttpClient::builder()
        .middleware(LoggingMiddleware::new("http-test"))
        .middleware(DefaultHeaders::new().with(names::USER_AGENT, "courier-test").unwrap())
        .middleware(ContentHeaders)
        .middleware(RequireResponse)
        .engine(ScriptedEngine::new(|call: Call| {
            let form = ParametersBody::parse(&call.request().body().unwrap().to_text()?)?;
            let reply = JsonBody::from_serialize(&form.parameters().get("name"))?;
            Ok(call.with_response(Response::ok().with_body(reply)))
        }))
        .build();
    client.on_callback(Action::CONNECTED, seen.clone());

    let form = ParametersBody::new(Query::new().with("name", "Ada Lovelace"));
    let call = client
        .connect(Call::new(Request::post("http://example.com/greet", form).unwrap()))
        .unwrap();

    let request = call.request();
    assert_eq!(request.headers().get(names::USER_AGENT).unwrap(), "courier-test");
    assert_eq!(
        request.headers().get(names::CONTENT_TYPE).unwrap(),
        "application/x-www-form-urlencoded"
    );
    let response = call.response().unwrap();
    let body = response.body().unwrap().to_text().unwrap();
    assert_eq!(body, "\"Ada Lovelace\"");
    assert_eq!(seen.count(), 1);
}

#[test]
fn test_require_response_reports_unanswered_calls() {
    let exceptions = RecordingCallback::<Call>::new();
    let client = HttpClient::new();
    client.set_engine(|call: Call, next: Next<Call>| next.proceed(call));
    client.use_middleware(&RequireResponse);
    client.on_callback(Action::EXCEPTION, exceptions.clone());

    let err = client.connect(get("http://example.com/void")).unwrap_err();
    assert!(err.downcast_ref::<MissingResponse>().is_some());
    assert_eq!(
        exceptions.errors(),
        vec!["no response for GET http://example.com/void".to_string()]
    );
}

#[test]
fn test_parsed_messages_flow_through_client() {
    let client = HttpClient::new();
    client.set_engine(ScriptedEngine::new(|call: Call| {
        let response =
            Response::parse("HTTP/1.1 201 Created\r\nLocation: /notes/1\r\n\r\n")?;
        Ok(call.with_response(response))
    }));
    let statuses = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = statuses.clone();
    client.on(Action::CONNECTED, move |_, event: &Event<'_, Call>| {
        if let Some(response) = event.call().and_then(Call::response) {
            sink.lock().unwrap().push(response.status());
        }
    });

    let request = Request::parse("POST /notes HTTP/1.1\r\nHost: example.com\r\n\r\ntext").unwrap();
    let call = client.connect(Call::new(request)).unwrap();
    assert_eq!(
        call.response().unwrap().headers().get(names::LOCATION).unwrap(),
        "/notes/1"
    );
    assert_eq!(*statuses.lock().unwrap(), vec![StatusCode::CREATED]);
}
