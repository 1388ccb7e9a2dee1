#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]
use std::sync::{Arc, Mutex};

use restling_core::{
    Completable, ErrorCallback, Method, MultipleResult, OutgoingRequest, RawText, RequestBody,
    RestClientError, SingleResult, Transport, TransportError, TransportResponse,
};
use todo_client::{ToDo, ToDoServiceClient, ToDoServiceSyncClient};

// Answers every request with the same status and body, recording what was sent
#[derive(Debug, Clone)]
struct InMemoryTransport {
    status: u16,
    body: String,
    sent: Arc<Mutex<Vec<OutgoingRequest>>>,
}

impl InMemoryTransport {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            sent: Arc::default(),
        }
    }

    fn last_request(&self) -> OutgoingRequest {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a request was sent")
    }
}

struct InMemoryResponse {
    status: u16,
    body: String,
}

impl TransportResponse for InMemoryResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn text(self) -> Result<String, TransportError> {
        Ok(self.body)
    }
}

impl Transport for InMemoryTransport {
    type Response = InMemoryResponse;

    async fn send(&self, request: OutgoingRequest) -> Result<Self::Response, TransportError> {
        self.sent.lock().unwrap().push(request);
        Ok(InMemoryResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

#[derive(Clone, Default)]
struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
    fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn on_error(&self) -> ErrorCallback {
        let events = self.clone();
        ErrorCallback::new(move |status, status_text, body| {
            events.push(format!("error {status} {status_text} {body}"));
        })
    }
}

fn milk() -> ToDo {
    ToDo {
        id: 1,
        title: "milk".to_string(),
        done: false,
    }
}

#[tokio::test]
async fn should_list_todos() -> anyhow::Result<()> {
    let transport = InMemoryTransport::new(200, r#"[{"id":1,"title":"milk"}]"#);
    let client = ToDoServiceSyncClient::new("http://api/", transport.clone());
    let events = Events::default();
    let on_data = events.clone();

    client
        .get_current_to_dos(
            MultipleResult::new(move |todos: Vec<ToDo>| on_data.push(format!("{todos:?}"))),
            events.on_error(),
        )
        .await?;

    let request = transport.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, "http://api/service/todo/list");
    assert!(request.body.is_none());
    assert_eq!(
        events.all(),
        vec![r#"[ToDo { id: 1, title: "milk", done: false }]"#.to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn should_send_body_as_json() -> anyhow::Result<()> {
    let transport = InMemoryTransport::new(200, r#"{"id":1,"title":"milk","done":false}"#);
    let client = ToDoServiceSyncClient::new("http://api", transport.clone());
    let events = Events::default();
    let on_data = events.clone();

    client
        .add_to_do(
            milk(),
            SingleResult::new(move |todo: ToDo| on_data.push(todo.title)),
            events.on_error(),
        )
        .await?;

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url, "http://api/service/todo/add");
    assert_eq!(
        request.body,
        Some(RequestBody::Json(
            r#"{"id":1,"title":"milk","done":false}"#.to_string()
        ))
    );
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(events.all(), vec!["milk".to_string()]);
    Ok(())
}

#[tokio::test]
async fn should_fill_path_and_query() -> anyhow::Result<()> {
    let transport = InMemoryTransport::new(200, "[]");
    let client = ToDoServiceSyncClient::new("http://api/", transport.clone());
    let events = Events::default();

    client
        .search_to_dos(
            "milk".to_string(),
            Some(10),
            MultipleResult::new(|_: Vec<ToDo>| {}),
            events.on_error(),
        )
        .await?;
    client
        .search_to_dos(
            "eggs".to_string(),
            None,
            MultipleResult::new(|_: Vec<ToDo>| {}),
            events.on_error(),
        )
        .await?;

    let urls = transport
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|request| format!("{} {}", request.method, request.url))
        .collect::<Vec<_>>();
    assert_eq!(
        urls,
        vec![
            "POST http://api/service/todo/search/milk?limit=10".to_string(),
            "POST http://api/service/todo/search/eggs".to_string(),
        ]
    );
    assert!(events.all().is_empty());
    Ok(())
}

#[tokio::test]
async fn should_deliver_http_errors() -> anyhow::Result<()> {
    let transport = InMemoryTransport::new(404, "not found");
    let client = ToDoServiceSyncClient::new("http://api/", transport.clone());
    let events = Events::default();
    let on_done = events.clone();

    client
        .delete_to_do(
            42,
            Completable::new(move || on_done.push("done".to_string())),
            events.on_error(),
        )
        .await?;

    assert_eq!(
        transport.last_request().url,
        "http://api/service/todo/delete/42"
    );
    assert_eq!(events.all(), vec!["error 404 Not Found not found".to_string()]);
    Ok(())
}

#[tokio::test]
async fn should_send_text_request_headers() -> anyhow::Result<()> {
    let transport = InMemoryTransport::new(200, "<p>milk</p>");
    let client = ToDoServiceSyncClient::new("http://api/", transport.clone());
    let events = Events::default();
    let on_data = events.clone();

    client
        .render_to_do(
            1,
            "fr".to_string(),
            RawText::new(move |text| on_data.push(text)),
            events.on_error(),
        )
        .await?;

    let request = transport.last_request();
    assert_eq!(request.header("Accept-Language"), Some("fr"));
    assert_eq!(events.all(), vec!["<p>milk</p>".to_string()]);
    Ok(())
}

#[tokio::test]
#[allow(deprecated)]
async fn should_reject_incompatible_method() {
    let transport = InMemoryTransport::new(200, "");
    let client = ToDoServiceSyncClient::new("http://api/", transport.clone());
    let events = Events::default();

    let result = client
        .export_all(RawText::new(|_| {}), events.on_error())
        .await;

    let Err(RestClientError::UnsupportedOperation { operation }) = &result else {
        panic!("expected an unsupported operation, got {result:?}");
    };
    assert_eq!(operation, "export_all");
    assert!(transport.sent.lock().unwrap().is_empty());
    assert!(events.all().is_empty());
}

#[tokio::test]
async fn should_keep_declared_callbacks() -> anyhow::Result<()> {
    let transport = InMemoryTransport::new(200, "stored");
    let client = ToDoServiceClient::new("http://api/", transport.clone());
    let events = Events::default();
    let on_data = events.clone();

    client
        .store_todo(
            milk(),
            RawText::new(move |text| on_data.push(text)),
            events.on_error(),
        )
        .await?;

    let request = transport.last_request();
    assert_eq!(request.url, "http://api/service/todo/todo/store");
    assert_eq!(request.header("Accept"), Some("text/html"));
    assert_eq!(events.all(), vec!["stored".to_string()]);
    Ok(())
}

#[tokio::test]
async fn should_send_form_and_cookie() -> anyhow::Result<()> {
    let transport = InMemoryTransport::new(204, "");
    let client = ToDoServiceClient::new("http://api/", transport.clone());
    let events = Events::default();
    let on_done = events.clone();

    client
        .attach(
            7,
            "milk".to_string(),
            "abc".to_string(),
            Completable::new(move || on_done.push("done".to_string())),
            events.on_error(),
        )
        .await?;

    let request = transport.last_request();
    assert_eq!(request.url, "http://api/service/todo/attach/7");
    assert_eq!(request.header("Cookie"), Some("session=abc"));
    let Some(RequestBody::Form(form)) = &request.body else {
        panic!("expected a form body, got {:?}", request.body);
    };
    let entries = form
        .entries()
        .iter()
        .map(|param| format!("{}={}", param.key(), param.value()))
        .collect::<Vec<_>>();
    assert_eq!(entries, vec!["title=milk".to_string()]);
    assert_eq!(events.all(), vec!["done".to_string()]);
    Ok(())
}
