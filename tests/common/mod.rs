#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum_extra::headers::{Authorization, HeaderMapExt};
use tower::ServiceExt;

use vmpanel::models::{AppState, JobPhase};
use vmpanel::services::{CreationRequest, CredentialStore, JobProbe, VmCommands};
use vmpanel::AppResult;

pub const USER: &str = "designer";
pub const PASSWORD: &str = "passwd";
// PBKDF2-HMAC-SHA256("passwd", "salt", 1 iteration)
const PASSWORD_HASH: &str =
    "pbkdf2:sha256:1$salt$55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc";

/// Records every script call instead of running anything.
#[derive(Default)]
pub struct FakeVms {
    pub running: Mutex<Vec<String>>,
    pub created: Mutex<Vec<CreationRequest>>,
    pub deleted: Mutex<Vec<Vec<String>>>,
}

impl FakeVms {
    pub fn with_running(names: &[&str]) -> Self {
        let fake = Self::default();
        *fake.running.lock().unwrap() = names.iter().map(|s| s.to_string()).collect();
        fake
    }

    pub fn created(&self) -> Vec<CreationRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<Vec<String>> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl VmCommands for FakeVms {
    async fn list_running(&self) -> AppResult<Vec<String>> {
        Ok(self.running.lock().unwrap().clone())
    }

    async fn start_creation(&self, request: &CreationRequest) -> AppResult<()> {
        self.created.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn delete(&self, vm_ids: &[String]) -> AppResult<()> {
        self.deleted.lock().unwrap().push(vm_ids.to_vec());
        self.running.lock().unwrap().retain(|name| !vm_ids.contains(name));
        Ok(())
    }
}

pub struct FakeProbe {
    pub phase: Mutex<JobPhase>,
}

impl FakeProbe {
    pub fn new(phase: JobPhase) -> Self {
        Self { phase: Mutex::new(phase) }
    }
}

#[async_trait]
impl JobProbe for FakeProbe {
    async fn job_phase(&self) -> AppResult<JobPhase> {
        Ok(*self.phase.lock().unwrap())
    }
}

pub struct Harness {
    pub state: AppState,
    pub vms: Arc<FakeVms>,
    pub probe: Arc<FakeProbe>,
}

pub fn harness(vms: FakeVms, phase: JobPhase, protected: &[&str]) -> Harness {
    let vms = Arc::new(vms);
    let probe = Arc::new(FakeProbe::new(phase));
    let credentials = CredentialStore::parse(&format!("{}={}\n", USER, PASSWORD_HASH)).unwrap();
    let protected_hosts: HashSet<String> = protected.iter().map(|s| s.to_string()).collect();
    let state = AppState {
        credentials: Arc::new(credentials),
        protected_hosts: Arc::new(protected_hosts),
        vms: vms.clone(),
        probe: probe.clone(),
        refresh_seconds: 10,
    };
    Harness { state, vms, probe }
}

pub fn get(uri: &str) -> Request<Body> {
    let mut req = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    req.headers_mut().typed_insert(Authorization::basic(USER, PASSWORD));
    req
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    req.headers_mut().typed_insert(Authorization::basic(USER, PASSWORD));
    req
}

pub async fn send(state: &AppState, req: Request<Body>) -> Response<Body> {
    vmpanel::build_router(state.clone()).oneshot(req).await.unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
