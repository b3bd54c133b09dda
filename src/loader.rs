//! Background loading of sweep logs.
//!
//! [`Loader::open`] hands the read and parse of one file to a dedicated worker
//! thread so that an interactive caller stays responsive. The worker sends
//! exactly one result back and exits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   spawn per request   ┌──────────────────┐
//! │   Caller    │ ────────────────────▶ │ sweeplog-loader  │
//! │             │                       │ (read + parse)   │
//! │ LoadRequest │ ◀──bounded(1) result─ │                  │
//! └─────────────┘                       └──────────────────┘
//! ```
//!
//! There is no retry, coalescing or cancellation. A failed load never touches
//! a descriptor returned by an earlier request.
//!
//! # Example
//!
//! ```rust,no_run
//! use sweeplog::loader::Loader;
//!
//! let request = Loader::new().open("scan_042.txt")?;
//! let sweep = request.wait()?;
//! println!("{:?}", sweep.output_titles());
//! # Ok::<(), sweeplog::sweep::SweepError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use log::{debug, warn};

use crate::reader::{SweepReader, TextSweepReader};
use crate::sweep::{SweepDescriptor, SweepError, SweepParser};

/// Name of the worker threads
pub const WORKER_THREAD_NAME: &str = "sweeplog-loader";

type LoadResult = Result<SweepDescriptor, SweepError>;

/// Spawns one background worker per open request
#[derive(Clone)]
pub struct Loader {
    parser: Arc<SweepParser>,
    reader: Arc<dyn SweepReader>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Loader for text sweep logs with the default parser
    pub fn new() -> Self {
        Self::with_parts(SweepParser::new(), TextSweepReader::new())
    }

    /// Loader with a custom parser and reader
    pub fn with_parts<R>(parser: SweepParser, reader: R) -> Self
    where
        R: SweepReader + 'static,
    {
        Self {
            parser: Arc::new(parser),
            reader: Arc::new(reader),
        }
    }

    /// Start loading `path` in the background
    ///
    /// Only a failure to spawn the worker is reported here; read and parse
    /// errors arrive through the returned [`LoadRequest`].
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<LoadRequest, SweepError> {
        let path = path.as_ref().to_path_buf();
        let (sender, receiver) = bounded::<LoadResult>(1);

        let parser = Arc::clone(&self.parser);
        let reader = Arc::clone(&self.reader);
        let worker_path = path.clone();

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let result = parser.open_with(reader.as_ref(), &worker_path);
                if sender.send(result).is_err() {
                    debug!("Load of {} finished after request was dropped", worker_path.display());
                }
            })
            .map_err(SweepError::WorkerSpawn)?;

        debug!("Spawned loader for {}", path.display());
        Ok(LoadRequest {
            path,
            receiver,
            handle: Some(handle),
        })
    }
}

/// A pending background load
pub struct LoadRequest {
    path: PathBuf,
    receiver: Receiver<LoadResult>,
    handle: Option<JoinHandle<()>>,
}

impl LoadRequest {
    /// File being loaded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the worker reports
    pub fn wait(mut self) -> LoadResult {
        let result = self
            .receiver
            .recv()
            .unwrap_or_else(|_| Err(SweepError::WorkerDisconnected(self.path.clone())));
        self.join();
        result
    }

    /// Poll for the result without blocking
    ///
    /// `None` while the worker is still busy. Once a result has been taken,
    /// later calls report [`SweepError::WorkerDisconnected`].
    pub fn try_result(&mut self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.join();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                Some(Err(SweepError::WorkerDisconnected(self.path.clone())))
            }
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Loader worker for {} panicked", self.path.display());
            }
        }
    }
}
