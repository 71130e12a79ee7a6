//! Preview client: debounced, cancellable remote label rendering.
//!
//! Rendering goes through a Labelary-style HTTP service: POST the markup,
//! get PNG bytes back. The interactive path is [`PreviewClient`], which
//! debounces bursts of submissions on a worker thread and guarantees that
//! a stale response can never overwrite a fresher preview. One-shot use
//! (CLI, scripts) goes through [`render_once`] instead.

mod config;
mod error;
#[cfg(feature = "http")]
mod http;

pub use config::PreviewConfig;
pub use error::PreviewError;
#[cfg(feature = "http")]
pub use http::HttpTransport;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;

// ── Traits ──────────────────────────────────────────────────────────────

/// Fetch a rendered preview. All transports implement this.
pub trait PreviewTransport: Send {
    /// POST `markup` to `url` and return the rendered image bytes.
    fn fetch(&self, url: &str, markup: &str) -> Result<Vec<u8>, PreviewError>;
}

/// Identifier of a submitted preview request.
///
/// Ids increase monotonically per client; a larger id always means a
/// fresher document state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestId(u64);

impl RequestId {
    /// The raw numeric value, for display purposes.
    pub fn value(self) -> u64 {
        self.0
    }
}

// ── One-shot rendering ──────────────────────────────────────────────────

/// Perform a single synchronous preview fetch.
pub fn render_once<T: PreviewTransport>(
    config: &PreviewConfig,
    transport: &T,
    markup: &str,
    width_dots: u32,
    height_dots: u32,
) -> Result<Vec<u8>, PreviewError> {
    transport.fetch(&config.render_url(width_dots, height_dots), markup)
}

// ── Debounced client ────────────────────────────────────────────────────

struct Job {
    id: u64,
    url: String,
    markup: String,
}

/// Debounced preview fetcher with a dedicated worker thread.
///
/// [`submit`](PreviewClient::submit) is cheap and non-blocking: it stamps
/// the job with a fresh id and hands it to the worker. The worker waits
/// out the debounce window (a newer job arriving within the window
/// replaces the pending one), then fetches, then re-checks the id before
/// delivering. A job that is no longer the latest is dropped at either
/// checkpoint, so out-of-order completions cannot surface a stale image.
///
/// Dropping the client stops the worker after its current job.
pub struct PreviewClient {
    config: PreviewConfig,
    latest: Arc<AtomicU64>,
    tx: Option<mpsc::Sender<Job>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl PreviewClient {
    /// Start a worker thread fetching through `transport`.
    ///
    /// `on_ready` is invoked on the worker thread with the outcome of every
    /// request that was still the latest when its fetch completed.
    pub fn spawn<T, F>(config: PreviewConfig, transport: T, on_ready: F) -> Self
    where
        T: PreviewTransport + 'static,
        F: FnMut(RequestId, Result<Vec<u8>, PreviewError>) + Send + 'static,
    {
        let latest = Arc::new(AtomicU64::new(0));
        let (tx, rx) = mpsc::channel::<Job>();
        let debounce = config.debounce;
        let worker_latest = Arc::clone(&latest);

        let worker = thread::spawn(move || {
            run_worker(&rx, debounce, &worker_latest, &transport, on_ready);
        });

        Self {
            config,
            latest,
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Queue a preview of `markup` for a canvas of the given size in dots.
    ///
    /// Returns the id the eventual callback will carry. Submitting again
    /// immediately supersedes this request.
    pub fn submit(&self, markup: &str, width_dots: u32, height_dots: u32) -> RequestId {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let job = Job {
            id,
            url: self.config.render_url(width_dots, height_dots),
            markup: markup.to_string(),
        };
        if let Some(tx) = &self.tx {
            // A send failure means the worker is gone; the id stays latest
            // and no callback will arrive, which is the documented shutdown
            // behavior.
            let _ = tx.send(job);
        }
        RequestId(id)
    }

    /// The id of the most recent submission, if any.
    pub fn latest(&self) -> Option<RequestId> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            id => Some(RequestId(id)),
        }
    }
}

impl Drop for PreviewClient {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for PreviewClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewClient")
            .field("config", &self.config)
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .finish()
    }
}

fn run_worker<T, F>(
    rx: &mpsc::Receiver<Job>,
    debounce: std::time::Duration,
    latest: &AtomicU64,
    transport: &T,
    mut on_ready: F,
) where
    T: PreviewTransport,
    F: FnMut(RequestId, Result<Vec<u8>, PreviewError>),
{
    while let Ok(mut job) = rx.recv() {
        // Debounce: every newer arrival restarts the window.
        loop {
            match rx.recv_timeout(debounce) {
                Ok(newer) => job = newer,
                Err(mpsc::RecvTimeoutError::Timeout)
                | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        // Superseded while waiting: skip the fetch entirely.
        if job.id != latest.load(Ordering::SeqCst) {
            continue;
        }

        let result = transport.fetch(&job.url, &job.markup);

        // Superseded during the fetch: the response is stale, drop it.
        if job.id != latest.load(Ordering::SeqCst) {
            continue;
        }

        on_ready(RequestId(job.id), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn test_config(debounce_ms: u64) -> PreviewConfig {
        PreviewConfig {
            endpoint: "http://preview.test/v1/printers".to_string(),
            debounce: Duration::from_millis(debounce_ms),
            ..PreviewConfig::default()
        }
    }

    /// Returns the posted markup as the "image" so tests can tell which
    /// job produced a delivery.
    struct EchoTransport;

    impl PreviewTransport for EchoTransport {
        fn fetch(&self, _url: &str, markup: &str) -> Result<Vec<u8>, PreviewError> {
            Ok(markup.as_bytes().to_vec())
        }
    }

    /// Blocks each fetch until the test releases it through `gate`, and
    /// reports fetch starts through `started`.
    struct GatedTransport {
        started: mpsc::Sender<()>,
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl PreviewTransport for GatedTransport {
        fn fetch(&self, _url: &str, markup: &str) -> Result<Vec<u8>, PreviewError> {
            self.started.send(()).unwrap();
            self.gate.lock().unwrap().recv().unwrap();
            Ok(markup.as_bytes().to_vec())
        }
    }

    #[test]
    fn burst_delivers_only_the_newest_submission() {
        let (done_tx, done_rx) = mpsc::channel();
        let client = PreviewClient::spawn(test_config(50), EchoTransport, move |id, result| {
            done_tx.send((id, result.unwrap())).unwrap();
        });

        client.submit("^XA^FDone^FS^XZ", 800, 600);
        client.submit("^XA^FDtwo^FS^XZ", 800, 600);
        let last = client.submit("^XA^FDthree^FS^XZ", 800, 600);

        let (id, image) = done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(id, last);
        assert_eq!(image, b"^XA^FDthree^FS^XZ");
        assert!(
            done_rx.recv_timeout(Duration::from_millis(200)).is_err(),
            "superseded submissions must not be delivered"
        );
    }

    #[test]
    fn stale_response_is_discarded_after_fetch() {
        let (started_tx, started_rx) = mpsc::channel();
        let (gate_tx, gate_rx) = mpsc::channel();
        let transport = GatedTransport {
            started: started_tx,
            gate: Mutex::new(gate_rx),
        };

        let (done_tx, done_rx) = mpsc::channel();
        let client = PreviewClient::spawn(test_config(1), transport, move |id, result| {
            done_tx.send((id, result.unwrap())).unwrap();
        });

        client.submit("^XA^FDstale^FS^XZ", 800, 600);
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // The first fetch is in flight; this supersedes it.
        let fresh = client.submit("^XA^FDfresh^FS^XZ", 800, 600);

        // Release the stale fetch, then the fresh one.
        gate_tx.send(()).unwrap();
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        gate_tx.send(()).unwrap();

        let (id, image) = done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(id, fresh, "only the fresh request may be delivered");
        assert_eq!(image, b"^XA^FDfresh^FS^XZ");
        assert!(done_rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn ids_increase_monotonically() {
        let client = PreviewClient::spawn(test_config(1), EchoTransport, |_, _| {});
        let a = client.submit("^XA^XZ", 800, 600);
        let b = client.submit("^XA^XZ", 800, 600);
        assert!(b > a);
        assert_eq!(client.latest(), Some(b));
    }

    #[test]
    fn render_once_uses_the_configured_url() {
        struct UrlCapture(Mutex<Vec<String>>);
        impl PreviewTransport for UrlCapture {
            fn fetch(&self, url: &str, _markup: &str) -> Result<Vec<u8>, PreviewError> {
                self.0.lock().unwrap().push(url.to_string());
                Ok(Vec::new())
            }
        }

        let transport = UrlCapture(Mutex::new(Vec::new()));
        let config = test_config(1);
        render_once(&config, &transport, "^XA^XZ", 406, 203).unwrap();
        assert_eq!(
            *transport.0.lock().unwrap(),
            ["http://preview.test/v1/printers/8dpmm/labels/2x1/0/"]
        );
    }
}
