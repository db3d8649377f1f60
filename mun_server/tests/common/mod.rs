use std::borrow::BorrowMut;

use axum::{response::Response, http::{Request, request::Builder}, body::Body};
use http_body::Body as _;
use mun_entities::{mock::{self, MockOption}, prelude::{ConflictKey, ParticipantPatch, ParticipantProfile}, DirectoryService};
use mun_server::{auth::{CreateUserRequest, CreateUserResponse, GetTokenResponse}, config::Config, state::AppState};
use sea_orm::prelude::Uuid;
use tower::Service;
use base64::{engine::general_purpose, Engine as _};


#[derive(Default)]
pub struct FixtureOptions
 {
    pub mock_directory: bool,
    pub conference_passcode: Option<String>,
}

pub struct Fixture {
    pub app: axum::Router,
    pub state: AppState,
    pub auth: Auth,
}

pub enum Auth {
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        token: String,
    },
}

pub struct APIResponse {
    response: Response,
}

impl APIResponse {
    pub fn status(&self) -> axum::http::StatusCode {
        self.response.status()
    }

    async fn bytes(&mut self) -> Vec<u8> {
        let mut buf = Vec::new();

        let body = self.response.body_mut();

        while let Some(next) = body.data().await {
            buf.extend_from_slice(&next.unwrap());
        }
        buf
    }

    pub async fn json<T: serde::de::DeserializeOwned>(&mut self) -> T {
        let buf = self.bytes().await;
        serde_json::from_slice(&buf).unwrap()
    }

    #[allow(dead_code)]
    pub async fn text(&mut self) -> String {
        let buf = self.bytes().await;
        String::from_utf8(buf).unwrap()
    }
}

impl From<Response> for APIResponse {
    fn from(response: Response) -> Self {
        Self {
            response,
        }
    }
}

impl Fixture {
    pub async fn new(options: FixtureOptions) -> Self {
        let state = AppState::new_test_app_with_config(Config {
            conference_passcode: options.conference_passcode,
            ..Default::default()
        }).await.unwrap();

        if options.mock_directory {
            mock::save_mock_directory(
                &state.directory(),
                mock::make_mock_directory_with_options(MockOption {
                    deterministic_uuids: true,
                    ..Default::default()
                })
            ).await.unwrap();
        }

        let app = mun_server::app_with_state(state.clone()).await;

        Self {
            app,
            state,
            auth: Auth::None,
        }
    }

    #[allow(dead_code)]
    pub async fn default() -> Self {
        Self::new(FixtureOptions::default()).await
    }

    #[allow(dead_code)]
    pub fn with_auth(self, auth: Auth) -> Self {
        Self {
            auth,
            ..self
        }
    }

    #[allow(dead_code)]
    pub async fn sign_up(&mut self, email: &str, full_name: &str) -> APIResponse {
        self.post_json("/api/users", CreateUserRequest {
            email: email.to_string(),
            password: "testtest".to_string(),
            full_name: full_name.to_string(),
            passcode: None,
        }).await
    }

    /// Signs up and logs in. Later requests use the returned bearer token.
    #[allow(dead_code)]
    pub async fn create_user_and_token(&mut self, email: &str, full_name: &str) -> (Uuid, String) {
        let mut response = self.sign_up(email, full_name).await;
        assert_eq!(response.status(), 200);
        let body = response.json::<CreateUserResponse>().await;

        self.auth = Auth::Basic {
            username: email.to_string(),
            password: "testtest".to_string(),
        };

        let mut response = self.post_json_no_body("/api/tokens").await;
        assert_eq!(response.status(), 200);
        let token : GetTokenResponse = response.json().await;
        self.auth = Auth::Bearer { token: token.token.clone() };
        (body.uuid, token.token)
    }

    /// Signs up a user and sets the role on their profile.
    #[allow(dead_code)]
    pub async fn create_user_with_role(&mut self, email: &str, full_name: &str, role: &str) -> (Uuid, String) {
        let out = self.create_user_and_token(email, full_name).await;
        self.set_role(email, role).await;
        out
    }

    #[allow(dead_code)]
    pub async fn set_role(&self, email: &str, role: &str) -> ParticipantProfile {
        self.state.directory().upsert(
            ParticipantPatch {
                role: Some(Some(role.to_string())),
                ..ParticipantPatch::with_email(email)
            },
            ConflictKey::Email
        ).await.unwrap()
    }

    fn get_base_request(&self) -> Builder {
        let builder = Request::builder();

        match &self.auth {
            Auth::None => builder,
            Auth::Basic { username, password } => {
                builder.header(
                    "Authorization",
                    format!("Basic {}", general_purpose::STANDARD.encode(format!("{}:{}", username, password)))
                )
            },
            Auth::Bearer { token } => {
                builder.header(
                    "Authorization",
                    format!("Bearer {}", token)
                )
            }
        }
    }

    async fn send(&mut self, request: Request<Body>) -> APIResponse {
        self.app.borrow_mut()
            .call(request)
            .await
            .unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn get(&mut self, path: &str) -> APIResponse {
        let request = self.get_base_request()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    #[allow(dead_code)]
    pub async fn delete(&mut self, path: &str) -> APIResponse {
        let request = self.get_base_request()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    #[allow(dead_code)]
    pub async fn post_json_no_body(&mut self, path: &str) -> APIResponse
    {
        let request = self.get_base_request()
            .method("POST")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    #[allow(dead_code)]
    pub async fn post_json<T>(&mut self, path: &str, body: T) -> APIResponse where T: serde::Serialize
    {
        self.send_json("POST", path, body).await
    }

    #[allow(dead_code)]
    pub async fn put_json<T>(&mut self, path: &str, body: T) -> APIResponse where T: serde::Serialize
    {
        self.send_json("PUT", path, body).await
    }

    async fn send_json<T>(&mut self, method: &str, path: &str, body: T) -> APIResponse where T: serde::Serialize
    {
        let request = self.get_base_request()
            .method(method)
            .header("Content-Type", "application/json")
            .uri(path)
            .body(
                Body::from(
                    serde_json::to_string(&body).unwrap()
                )
            )
            .unwrap();
        self.send(request).await
    }
}
