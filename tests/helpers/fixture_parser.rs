//! In-memory parser serving prepared resources by path.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

use indexmap::IndexMap;
use parking_lot::Mutex;
use thiserror::Error;

use declindex::{Resource, ResourceParser};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    #[error("injected parse failure for {} file(s)", .0)]
    Injected(usize),
}

/// Serves clones of prepared `File` resources, records every call, and can
/// be told to fail the next one.
///
/// Paths without a fixture are skipped, as a parser would skip files that
/// vanished between the change notification and the read.
#[derive(Default)]
pub struct FixtureParser {
    files: Mutex<IndexMap<PathBuf, Resource>>,
    calls: Mutex<Vec<Vec<PathBuf>>>,
    fail_next: AtomicBool,
}

impl FixtureParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, resource: Resource) -> Self {
        self.set_file(resource);
        self
    }

    /// Add or replace the fixture for the resource's path.
    pub fn set_file(&self, resource: Resource) {
        let path = resource
            .file_path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("fixture must be a file resource: {:?}", resource.kind));
        self.files.lock().insert(path, resource);
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.files.lock().shift_remove(path.as_ref());
    }

    /// Paths of every prepared fixture, in insertion order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Path lists of every call so far.
    pub fn calls(&self) -> Vec<Vec<PathBuf>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Paths of the most recent call, sorted.
    pub fn last_call_sorted(&self) -> Vec<PathBuf> {
        let mut last = self.calls.lock().last().cloned().unwrap_or_default();
        last.sort();
        last
    }
}

impl ResourceParser for FixtureParser {
    type Error = FixtureError;

    fn parse_files(&self, paths: &[PathBuf], _root: &Path) -> Result<Vec<Resource>, FixtureError> {
        self.calls.lock().push(paths.to_vec());
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(FixtureError::Injected(paths.len()));
        }
        let files = self.files.lock();
        Ok(paths
            .iter()
            .filter_map(|path| files.get(path).cloned())
            .collect())
    }
}

/// Wraps a parser so that each call blocks until the test releases it.
pub struct GatedParser<P> {
    inner: P,
    entered: Sender<()>,
    release: Mutex<Receiver<()>>,
}

/// Test side of a [`GatedParser`].
pub struct Gate {
    entered: Receiver<()>,
    release: Sender<()>,
}

impl<P> GatedParser<P> {
    pub fn new(inner: P) -> (Self, Gate) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let parser = Self {
            inner,
            entered: entered_tx,
            release: Mutex::new(release_rx),
        };
        let gate = Gate {
            entered: entered_rx,
            release: release_tx,
        };
        (parser, gate)
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl Gate {
    /// Block until the parser has been entered.
    pub fn wait_entered(&self) {
        self.entered.recv().expect("parser dropped before entering");
    }

    /// Let the blocked parse call continue.
    pub fn release(&self) {
        self.release.send(()).expect("parser dropped before release");
    }
}

impl<P: ResourceParser> ResourceParser for GatedParser<P> {
    type Error = P::Error;

    fn parse_files(&self, paths: &[PathBuf], root: &Path) -> Result<Vec<Resource>, P::Error> {
        let _ = self.entered.send(());
        let _ = self.release.lock().recv();
        self.inner.parse_files(paths, root)
    }
}
