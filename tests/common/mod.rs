#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// YAML file holding `content`, deleted when the handle is dropped.
    pub fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("yamlink_test_")
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}

pub mod test_server {
    use std::net::TcpListener;
    use std::path::Path;
    use std::sync::{Arc, Once};
    use yamlink::server::{HttpServer, RedirectService, ServerHandle};
    use yamlink::MappingStore;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Ask the OS for a free port on the loopback interface.
    pub fn free_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    /// Redirect server for a mapping file, stopped on drop.
    pub struct RedirectServer {
        handle: Option<ServerHandle>,
        pub store: Arc<MappingStore>,
    }

    impl RedirectServer {
        pub fn start(map_file: &Path) -> Self {
            setup_may_runtime();
            let store = Arc::new(MappingStore::open(map_file).unwrap());
            let addr = format!("127.0.0.1:{}", free_port());
            let handle = HttpServer(RedirectService::new(Arc::clone(&store)))
                .start(addr.as_str())
                .unwrap();
            handle.wait_ready().unwrap();
            Self {
                handle: Some(handle),
                store,
            }
        }

        pub fn url(&self, path: &str) -> String {
            let addr = self.handle.as_ref().unwrap().addr();
            format!("http://{addr}{path}")
        }

        pub fn base_url(&self) -> String {
            self.url("")
        }
    }

    impl Drop for RedirectServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod mock_endpoint {
    use std::sync::Arc;
    use std::thread::JoinHandle;
    use tiny_http::{Header, Response, Server};

    /// Minimal upstream that answers every request with the same status and headers.
    pub struct MockEndpoint {
        server: Arc<Server>,
        thread: Option<JoinHandle<()>>,
        port: u16,
    }

    impl MockEndpoint {
        pub fn start(status: u16, headers: &[(&str, &str)]) -> Self {
            let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
            let port = server.server_addr().to_ip().unwrap().port();
            let headers: Vec<Header> = headers
                .iter()
                .map(|(name, value)| Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap())
                .collect();

            let srv = Arc::clone(&server);
            let thread = std::thread::spawn(move || {
                for request in srv.incoming_requests() {
                    let mut response = Response::empty(status);
                    for header in &headers {
                        response.add_header(header.clone());
                    }
                    let _ = request.respond(response);
                }
            });

            Self {
                server,
                thread: Some(thread),
                port,
            }
        }

        /// `302` to `location`.
        pub fn redirect(location: &str) -> Self {
            Self::start(302, &[("Location", location)])
        }

        pub fn url(&self, path: &str) -> String {
            format!("http://127.0.0.1:{}{}", self.port, path)
        }

        pub fn base_url(&self) -> String {
            self.url("")
        }
    }

    impl Drop for MockEndpoint {
        fn drop(&mut self) {
            self.server.unblock();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

pub mod http {
    use reqwest::blocking::{Client, Response};
    use reqwest::redirect::Policy;

    /// Blocking client that reports redirects instead of following them.
    pub fn no_redirect_client() -> Client {
        Client::builder().redirect(Policy::none()).build().unwrap()
    }

    pub fn get(url: &str) -> Response {
        no_redirect_client().get(url).send().unwrap()
    }
}
