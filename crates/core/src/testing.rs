//! In-memory [`DogService`] for component tests. Records every call so tests
//! can assert on request sequencing and on the absence of requests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::client::DogService;
use crate::errors::ServiceError;
use crate::models::{Credentials, DogId, DogRecord, MatchResult, SearchQuery, SearchResults};

/// Canned answer for one endpoint
#[derive(Debug, Clone)]
pub(crate) enum Reply<T> {
    Ok(T),
    Reject(u16, &'static str),
    Malformed,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, ServiceError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Reject(status, body) => Err(ServiceError::Rejected {
                status: *status,
                body: body.to_string(),
            }),
            Reply::Malformed => Err(ServiceError::Decode("unexpected end of input".into())),
        }
    }
}

#[derive(Debug)]
pub(crate) struct FakeService {
    pub login: Reply<()>,
    pub search: Reply<SearchResults>,
    pub details: Reply<Vec<DogRecord>>,
    pub matched: Reply<MatchResult>,
    pub breeds: Reply<Vec<String>>,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeService {
    fn default() -> Self {
        Self {
            login: Reply::Ok(()),
            search: Reply::Ok(SearchResults::default()),
            details: Reply::Ok(Vec::new()),
            matched: Reply::Reject(404, "no match configured"),
            breeds: Reply::Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeService {
    /// A service whose search returns `dogs`' ids and whose detail fetch
    /// returns `dogs` in the same order
    pub fn with_dogs(dogs: Vec<DogRecord>) -> Self {
        Self {
            search: Reply::Ok(SearchResults {
                result_ids: dogs.iter().map(|d| d.id.clone()).collect(),
                ..SearchResults::default()
            }),
            details: Reply::Ok(dogs),
            ..Self::default()
        }
    }

    pub fn with_match(mut self, id: &str) -> Self {
        self.matched = Reply::Ok(MatchResult {
            dog_id: id.to_string(),
        });
        self
    }

    /// Calls in the order they were made, as `endpoint` or `endpoint:ids`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl DogService for FakeService {
    async fn login(&self, credentials: &Credentials) -> Result<(), ServiceError> {
        self.record(format!("login:{}", credentials.email));
        self.login.get()
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        self.record("logout".to_string());
        Ok(())
    }

    async fn breeds(&self) -> Result<Vec<String>, ServiceError> {
        self.record("breeds".to_string());
        self.breeds.get()
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ServiceError> {
        self.record(format!("search:{}", query.size));
        self.search.get()
    }

    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>, ServiceError> {
        self.record(format!("fetch_dogs:{}", ids.join(",")));
        self.details.get()
    }

    async fn match_dogs(&self, ids: &[DogId]) -> Result<MatchResult, ServiceError> {
        self.record(format!("match_dogs:{}", ids.join(",")));
        self.matched.get()
    }
}

pub(crate) fn dog(id: &str) -> DogRecord {
    DogRecord {
        id: id.to_string(),
        img: format!("https://img.example/{id}.jpg"),
        name: format!("Dog {id}"),
        age: 4,
        zip_code: "60601".to_string(),
        breed: "Labrador Retriever".to_string(),
    }
}

/// Serve one connection that answers `401` with a `Content-Length` of 100
/// but only three body bytes, then hangs up. Returns the base URL.
pub(crate) async fn truncated_error_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        read_request(&mut socket).await;
        let _ = socket
            .write_all(b"HTTP/1.1 401 Unauthorized\r\nContent-Length: 100\r\n\r\nabc")
            .await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

/// Consume request headers and any `Content-Length` body
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let Ok(n) = socket.read(&mut buf).await else {
            return;
        };
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let body_len = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        if request.len() >= header_end + 4 + body_len {
            return;
        }
    }
}
