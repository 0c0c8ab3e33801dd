//! Shared fixtures and recording collaborators for pipeline tests.

// Not every test binary exercises every double.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bowline_core::config::{DependencyManifest, DirectoryConfig, ToolConfig};
use bowline_core::context::AppContext;
use bowline_core::generate::{ComponentMeta, ConfGenerator, GeneratedConf};
use bowline_core::install::PackageManager;
use bowline_core::portal::PortalClient;

pub type EventLog = Arc<Mutex<Vec<&'static str>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<&'static str> {
    log.lock().expect("event log poisoned").clone()
}

/// Minimal valid manifest so the config stage succeeds.
pub fn write_manifest(dir: &Path) {
    std::fs::write(
        dir.join("bower.json"),
        r#"{ "name": "app", "dependencies": { "jquery": "^3.0.0" } }"#,
    )
    .expect("Failed to write manifest fixture");
}

/// Package manager double: records invocations and optionally watches a path
/// so ordering against the cleanup stage is observable.
pub struct RecordingManager {
    pub events: EventLog,
    pub exit_code: Option<i32>,
    pub seen_args: Arc<Mutex<Vec<Vec<String>>>>,
    /// Path probed at install time; lets tests assert whether the stale
    /// component was already gone when the install started.
    pub watch_path: Option<PathBuf>,
    pub watch_existed: Arc<Mutex<Option<bool>>>,
}

impl RecordingManager {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            exit_code: Some(0),
            seen_args: Arc::new(Mutex::new(Vec::new())),
            watch_path: None,
            watch_existed: Arc::new(Mutex::new(None)),
        }
    }

    pub fn watching(mut self, path: PathBuf) -> Self {
        self.watch_path = Some(path);
        self
    }

    pub fn exiting_with(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }
}

impl PackageManager for RecordingManager {
    async fn install(&self, args: &[String]) -> anyhow::Result<Option<i32>> {
        if let Some(path) = &self.watch_path {
            *self.watch_existed.lock().expect("watch poisoned") = Some(path.exists());
        }
        self.seen_args
            .lock()
            .expect("args poisoned")
            .push(args.to_vec());
        self.events.lock().expect("event log poisoned").push("install");
        Ok(self.exit_code)
    }
}

/// Generator double returning a canned component map.
pub struct RecordingGenerator {
    pub events: EventLog,
    pub components: BTreeMap<String, PathBuf>,
    pub sources: BTreeMap<String, String>,
    pub fail: bool,
}

impl RecordingGenerator {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            components: BTreeMap::new(),
            sources: BTreeMap::new(),
            fail: false,
        }
    }

    pub fn with_component(mut self, name: &str, rel_path: &str) -> Self {
        self.components
            .insert(name.to_string(), PathBuf::from(rel_path));
        self
    }

    pub fn with_source(mut self, name: &str, source: &str) -> Self {
        self.sources.insert(name.to_string(), source.to_string());
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl ConfGenerator for RecordingGenerator {
    async fn generate(
        &self,
        _ctx: &AppContext,
        _manifest: &DependencyManifest,
        _dir_conf: &DirectoryConfig,
        _tool_conf: &ToolConfig,
    ) -> anyhow::Result<GeneratedConf> {
        self.events.lock().expect("event log poisoned").push("generate");
        if self.fail {
            anyhow::bail!("generator failure injected");
        }
        let mut generated = GeneratedConf::default();
        for (name, rel) in &self.components {
            generated.components.insert(name.clone(), rel.clone());
            generated.pkg_meta.insert(
                name.clone(),
                ComponentMeta {
                    name: name.clone(),
                    version: None,
                    main: None,
                    source: self.sources.get(name).cloned(),
                    original_source: None,
                },
            );
        }
        Ok(generated)
    }
}

/// Portal double recording every submission.
pub struct RecordingPortal {
    pub events: EventLog,
    pub calls: Arc<Mutex<Vec<(Vec<String>, Option<PathBuf>)>>>,
    pub fail: bool,
}

impl RecordingPortal {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl PortalClient for RecordingPortal {
    async fn submit(
        &self,
        _ctx: &AppContext,
        _tool_conf: &ToolConfig,
        components: &BTreeMap<String, PathBuf>,
        component_path: Option<&Path>,
    ) -> anyhow::Result<()> {
        self.events.lock().expect("event log poisoned").push("submit");
        self.calls.lock().expect("calls poisoned").push((
            components.keys().cloned().collect(),
            component_path.map(Path::to_path_buf),
        ));
        if self.fail {
            anyhow::bail!("portal failure injected");
        }
        Ok(())
    }
}
