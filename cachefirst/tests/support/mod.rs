//! Local hyper server the HTTP fetcher tests talk to.
//!
//! Routes:
//! - `/`, `/app.js`: 200 "hello"
//! - `/missing`: 404
//! - `/cookies`: 200 with two `Set-Cookie` values and a non-UTF-8 `x-raw`
//! - `/echo`: 200, echoes the `x-client-id` request header as header and body
//! - `/redirect?to=URL`: 302 to `URL`
//! - anything else: 500
use std::{
    convert::Infallible,
    future,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    Request, Response,
    body::Incoming,
    header::{self, HeaderValue},
    server::conn::http1,
    service::service_fn,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

type RespBody = Full<Bytes>;

fn build_response(status: u16, body: impl Into<Bytes>) -> Response<RespBody> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Full::new(body.into()))
        .unwrap()
}

fn handle(req: Request<Incoming>) -> Result<Response<RespBody>, Infallible> {
    let response = match req.uri().path() {
        "/" | "/app.js" => build_response(200, "hello"),
        "/missing" => build_response(404, "not found"),
        "/cookies" => {
            let mut resp = build_response(200, "cookies");
            let headers = resp.headers_mut();
            headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
            headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
            headers.insert("x-raw", HeaderValue::from_bytes(&[0xfa, 0xfb]).unwrap());
            resp
        }
        "/echo" => match req.headers().get("x-client-id").cloned() {
            Some(client_id) => {
                let mut resp =
                    build_response(200, Bytes::copy_from_slice(client_id.as_bytes()));
                resp.headers_mut().insert("x-client-id", client_id);
                resp
            }
            None => build_response(200, ""),
        },
        "/redirect" => {
            let target = req
                .uri()
                .query()
                .and_then(|q| q.strip_prefix("to="))
                .unwrap_or("/");
            Response::builder()
                .status(302)
                .header(header::LOCATION, target)
                .body(Full::new(Bytes::new()))
                .unwrap()
        }
        _ => build_response(500, "boom"),
    };
    Ok(response)
}

pub struct TestServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Bind to an ephemeral port and serve in the background.
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let counter = counter.clone();
                let service = service_fn(move |req| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    future::ready(handle(req))
                });
                tokio::spawn(async move {
                    if let Err(err) =
                        http1::Builder::new().serve_connection(io, service).await
                    {
                        eprintln!("test server connection error: {err:?}");
                    }
                });
            }
        });

        Self { addr, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests served so far, redirects included.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
