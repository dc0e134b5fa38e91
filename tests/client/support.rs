#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::http::HeaderMap;
use axum::Router;

/// Bind to port 0 and return the origin.
pub async fn start_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// What the stub saw of the last request.
#[derive(Clone, Default)]
pub struct Captured {
    inner: Arc<Mutex<Option<(HeaderMap, String)>>>,
}

impl Captured {
    pub fn record(&self, headers: &HeaderMap, body: String) {
        *self.inner.lock().unwrap() = Some((headers.clone(), body));
    }

    pub fn header(&self, name: &str) -> Option<String> {
        let guard = self.inner.lock().unwrap();
        let (headers, _) = guard.as_ref()?;
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn body(&self) -> Option<String> {
        self.inner.lock().unwrap().as_ref().map(|(_, b)| b.clone())
    }
}
