//! Test helpers for request files and stub engines.

use std::cell::RefCell;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use dispatch_core::NodeIndex;
use dispatch_core::test_support::ScriptedEngine;
use dispatch_solver_vrp::VrpEngineConfig;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::engine::EngineFactory;
use crate::http::SharedEngine;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// One vehicle at location 0 and one job at location 1, seven seconds away.
pub(super) fn single_job_request() -> Value {
    json!({
        "matrix": [[0, 7], [7, 0]],
        "vehicles": [{"id": "van", "start_index": 0, "capacity": [2]}],
        "jobs": [{"id": "parcel", "location_index": 1, "delivery": [1], "service": 3}]
    })
}

/// Factory handing out scripted engines and remembering the configuration
/// it was asked to honour.
#[derive(Debug, Default)]
pub(super) struct StubEngineFactory {
    routes: Vec<Vec<NodeIndex>>,
    seen: RefCell<Option<VrpEngineConfig>>,
}

impl StubEngineFactory {
    pub(super) const fn routing(routes: Vec<Vec<NodeIndex>>) -> Self {
        Self {
            routes,
            seen: RefCell::new(None),
        }
    }

    pub(super) fn seen(&self) -> Option<VrpEngineConfig> {
        self.seen.borrow().clone()
    }
}

impl EngineFactory for StubEngineFactory {
    fn build(&self, config: &VrpEngineConfig) -> SharedEngine {
        self.seen.replace(Some(config.clone()));
        Arc::new(ScriptedEngine::routes(self.routes.clone()))
    }
}
