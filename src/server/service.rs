use super::response::{write_redirect, write_text, LocationHeaders, HEALTH_BODY, NOT_FOUND_BODY};
use crate::mapping::MappingStore;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answers every request from the current mapping.
///
/// - `/` and `/health` return `200 Health is good!`
/// - a path that resolves returns `302 Found` with `Location: <target>`
/// - anything else returns `404 Not Found`
///
/// The method is not inspected.
#[derive(Clone)]
pub struct RedirectService {
    store: Arc<MappingStore>,
    locations: LocationHeaders,
}

impl RedirectService {
    pub fn new(store: Arc<MappingStore>) -> Self {
        Self {
            store,
            locations: LocationHeaders::new(),
        }
    }

    pub fn store(&self) -> &Arc<MappingStore> {
        &self.store
    }
}

/// Basic health check endpoint.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    debug!("Health check");
    write_text(res, 200, HEALTH_BODY);
    Ok(())
}

/// Path component of a request target, percent-decoded. Query strings are dropped.
pub fn request_path(raw: &str) -> Option<String> {
    let path = raw.split('?').next().unwrap_or("/");
    urlencoding::decode(path).ok().map(|p| p.into_owned())
}

impl HttpService for RedirectService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let Some(path) = request_path(req.path()) else {
            warn!(raw_path = req.path(), "request path is not valid UTF-8");
            write_text(res, 404, NOT_FOUND_BODY);
            return Ok(());
        };

        if path == "/" || path == "/health" {
            return health_endpoint(res);
        }

        info!(method = req.method(), path = %path, "Request received");

        let target = match self.store.resolve(&path) {
            Ok(target) => target,
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to resolve path");
                write_text(res, 404, NOT_FOUND_BODY);
                return Ok(());
            }
        };

        match self.locations.line_for(&target) {
            Some(location) => {
                debug!(path = %path, target = %target, "Resolved path");
                write_redirect(res, location);
            }
            None => {
                warn!(path = %path, "mapping target is not a valid Location header value");
                write_text(res, 404, NOT_FOUND_BODY);
            }
        }
        Ok(())
    }
}
