//! Drives the HTTP checker against a live endpoint on an ephemeral port.

use std::{sync::Arc, time::Duration};

use elec_area_http::{HttpAreaChecker, HttpCheckerFactory, server};
use elec_core::{
    AreaCheckError, AreaChecker, CheckerConfig, CheckerRegistry, ElectricForm, FormSession,
    Locale, ServiceArea, resolve,
};
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;

struct RunningServer {
    endpoint: String,
    stop: Option<oneshot::Sender<()>>,
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

fn start(locale: Locale) -> RunningServer {
    let (stop, stopped) = oneshot::channel::<()>();
    let (addr, server) = server::bind(([127, 0, 0, 1], 0).into(), locale, async {
        let _ = stopped.await;
    })
    .unwrap();
    tokio::spawn(server);

    RunningServer {
        endpoint: format!("http://{addr}/api/area-check"),
        stop: Some(stop),
    }
}

#[tokio::test]
async fn http_checker_agrees_with_local_resolver() {
    let server = start(Locale::Ja);
    let checker = HttpAreaChecker::new(&server.endpoint, Duration::from_secs(5)).unwrap();

    for code in ["1234567", "5678901", "9876543", "0000000"] {
        let response = checker.check_area(code).await.unwrap();
        assert_eq!(response, resolve(code, Locale::Ja), "postal code {code}");
    }
}

#[tokio::test]
async fn empty_postal_code_is_rejected_with_400() {
    let server = start(Locale::En);
    let checker = HttpAreaChecker::new(&server.endpoint, Duration::from_secs(5)).unwrap();

    let err = checker.check_area("").await.unwrap_err();

    assert!(matches!(err, AreaCheckError::Rejected { status: 400 }));
}

#[tokio::test]
async fn wrong_path_is_rejected_with_404() {
    let server = start(Locale::En);
    let endpoint = server.endpoint.replace("area-check", "nowhere");
    let checker = HttpAreaChecker::new(endpoint, Duration::from_secs(5)).unwrap();

    let err = checker.check_area("1234567").await.unwrap_err();

    assert!(matches!(err, AreaCheckError::Rejected { status: 404 }));
}

#[tokio::test]
async fn registry_built_session_resolves_over_http() {
    let server = start(Locale::En);

    let mut registry = CheckerRegistry::with_local();
    registry.register(Box::new(HttpCheckerFactory));
    let config = CheckerConfig {
        backend: "http".to_string(),
        endpoint: Some(server.endpoint.clone()),
        ..CheckerConfig::default()
    };
    let checker: Arc<dyn AreaChecker> = registry.create(&config).ok().unwrap();

    let mut session = FormSession::new(ElectricForm::new(Locale::En), checker);
    assert!(session.set_postal_code("567", "8901").await);

    assert_eq!(session.form().state().current_area, Some(ServiceArea::Kansai));
}
