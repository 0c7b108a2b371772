//! # App Root
//!
//! Composes the login form and the catalog behind the [`Session`] gate.
//! The service handle is injected here and handed down to each component.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::client::DogService;
use crate::login::LoginForm;
use crate::models::SearchQuery;
use crate::session::Session;

/// Which component the gate currently shows
#[derive(Debug)]
pub enum View<'a> {
    Login(&'a LoginForm),
    Catalog(&'a Catalog),
}

pub struct App {
    service: Arc<dyn DogService>,
    query: SearchQuery,
    session: Session,
    login: LoginForm,
    catalog: Option<Catalog>,
}

impl App {
    /// Start logged out; `query` shapes the catalog's initial search
    pub fn new(service: Arc<dyn DogService>, query: SearchQuery) -> Self {
        Self {
            service,
            query,
            session: Session::default(),
            login: LoginForm::new(),
            catalog: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn service(&self) -> &Arc<dyn DogService> {
        &self.service
    }

    pub fn view(&self) -> View<'_> {
        match &self.catalog {
            Some(catalog) if self.session.is_authenticated() => View::Catalog(catalog),
            _ => View::Login(&self.login),
        }
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.login
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn catalog_mut(&mut self) -> Option<&mut Catalog> {
        self.catalog.as_mut()
    }

    /// Submit the login form; on success switch the gate to the catalog
    pub async fn submit_login(&mut self) -> bool {
        let Some(session) = self.login.submit(self.service.as_ref()).await else {
            return false;
        };
        self.session = session;
        self.catalog = Some(Catalog::new(self.service.clone(), self.query.clone()));
        self.login = LoginForm::new();
        true
    }

    /// End the session and return to the login form
    ///
    /// Local state is reset even if the service refuses the logout.
    pub async fn logout(&mut self) {
        if let Err(e) = self.service.logout().await {
            tracing::warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        tracing::info!(user = ?self.session.user(), "Logged out");
        self.session = Session::default();
        self.catalog = None;
        self.login = LoginForm::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FetchStage;
    use crate::client::HttpDogService;
    use crate::config::ServiceConfig;
    use crate::testing::{dog, FakeService, Reply};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_with(service: FakeService) -> (App, Arc<FakeService>) {
        let service = Arc::new(service);
        (App::new(service.clone(), SearchQuery::default()), service)
    }

    #[tokio::test]
    async fn test_starts_on_login_view() {
        let (app, _service) = app_with(FakeService::default());
        assert!(matches!(app.view(), View::Login(_)));
        assert!(!app.session().is_authenticated());
        assert!(app.catalog().is_none());
    }

    #[tokio::test]
    async fn test_successful_login_opens_catalog() {
        let (mut app, _service) = app_with(FakeService::with_dogs(vec![dog("a")]));
        let form = app.login_form_mut();
        form.name = "Ada".to_string();
        form.email = "ada@example.com".to_string();

        assert!(app.submit_login().await);
        assert!(app.session().is_authenticated());
        assert!(matches!(app.view(), View::Catalog(_)));
        assert_eq!(app.catalog().unwrap().stage(), FetchStage::Idle);
    }

    #[tokio::test]
    async fn test_rejected_login_stays_on_form() {
        let (mut app, _service) = app_with(FakeService {
            login: Reply::Reject(400, "bad request"),
            ..FakeService::default()
        });
        let form = app.login_form_mut();
        form.name = "Ada".to_string();
        form.email = "ada@example.com".to_string();

        assert!(!app.submit_login().await);
        match app.view() {
            View::Login(form) => assert_eq!(form.error(), Some("Login failed: bad request")),
            View::Catalog(_) => panic!("catalog shown without a session"),
        }
    }

    #[tokio::test]
    async fn test_logout_resets_everything() {
        let (mut app, service) = app_with(FakeService::with_dogs(vec![dog("a")]));
        *app.login_form_mut() = LoginForm::with_input("Ada", "ada@example.com");
        app.submit_login().await;
        let catalog = app.catalog_mut().unwrap();
        catalog.load().await.unwrap();
        catalog.favorite("a").unwrap();

        app.logout().await;

        assert_eq!(app.session(), &Session::Anonymous);
        assert!(app.catalog().is_none());
        assert!(matches!(app.view(), View::Login(form) if form.name.is_empty()));
        assert_eq!(service.calls().last().unwrap(), "logout");
    }

    #[tokio::test]
    async fn test_end_to_end_against_http_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "fetch-access-token=t; Path=/"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dogs/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultIds": ["x", "y"]})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/dogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "x", "img": "x.jpg", "name": "Rex", "age": 7, "zip_code": "30301", "breed": "Boxer"},
                {"id": "y", "img": "y.jpg", "name": "Yuki", "age": 2, "zip_code": "30302", "breed": "Akita"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/dogs/match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"match": "y"})))
            .expect(1)
            .mount(&server)
            .await;

        let service = HttpDogService::new(ServiceConfig::new(server.uri())).unwrap();
        let mut app = App::new(Arc::new(service), SearchQuery::default());
        *app.login_form_mut() = LoginForm::with_input("Ada", "ada@example.com");
        assert!(app.submit_login().await);

        let catalog = app.catalog_mut().unwrap();
        assert_eq!(catalog.load().await.unwrap(), FetchStage::Ready);
        catalog.favorite("x").unwrap();
        catalog.favorite("y").unwrap();
        let matched = catalog.generate_match().await.unwrap().cloned().unwrap();

        assert_eq!(matched.name, "Yuki");
        let view = catalog.view();
        assert_eq!(view.favorites.len(), 2);
        assert_eq!(view.matched.map(|d| d.id.as_str()), Some("y"));
    }
}
