#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use comedor::{
    auth::{AUTH_COOKIE_NAME, Claims, generate_token},
    config::{
        AuthConfig, Config, DatabaseConfig, ObservabilityConfig, PreloadConfig, ServerConfig,
    },
};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use temp_dir::TempDir;
use tower::ServiceExt;

const SECRET: &str = "test_secret_key_minimum_32_characters_long";

/// Recipes every test session starts with. The "merienda" one is not a
/// known type and never reaches the catalog.
const PRELOADED: &str = r#"[
    {"nombre": "Arroz", "tipo": "Principal", "ingredientes": [
        {"nombre": "Arroz", "unidad": "g", "cantidad": "100"}
    ]},
    {"nombre": "Leche chocolatada", "tipo": "principal", "ingredientes": [
        {"ingrediente": "Leche", "unidad": "l", "cantidad": 0.2}
    ]},
    {"nombre": "Flan", "tipo": "postre", "ingredientes": [
        {"nombre": "Huevo", "unidad": "u", "cantidad": 1}
    ]},
    {"nombre": "Torta", "tipo": "merienda", "ingredientes": []}
]"#;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    comedor::migrate::run_migrations(&pool).await.unwrap();

    pool
}

pub fn test_config(preload_path: Option<String>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            secret: SECRET.to_string(),
            issuer: "comedor-identity".to_string(),
            audience: "comedor".to_string(),
            login_url: "/login".to_string(),
        },
        preload: PreloadConfig {
            path: preload_path,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub config: Config,
    _dir: TempDir,
}

impl TestApp {
    pub fn token(&self) -> String {
        generate_token(&self.config.auth, "cocina@escuela.edu", 3600).unwrap()
    }

    pub fn expired_token(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            aud: self.config.auth.audience.clone(),
            exp: now - 7200,
            iat: now - 10800,
            iss: self.config.auth.issuer.clone(),
            sub: "cocina@escuela.edu".to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.secret.as_bytes()),
        )
        .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Signed-in request with an optional JSON body
    pub async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("{AUTH_COOKIE_NAME}={}", self.token()));

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Signed-in request expected to succeed, returning the JSON body
    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>) -> Value {
        let response = self.call(method, uri, body).await;
        assert_eq!(response.status(), StatusCode::OK, "{method} {uri}");
        read_json(response).await
    }
}

pub async fn read_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&read_bytes(response).await).unwrap()
}

pub async fn create_test_app() -> TestApp {
    let pool = setup_test_db().await;
    create_test_app_with_pool(pool).await
}

pub async fn create_test_app_with_pool(pool: SqlitePool) -> TestApp {
    let dir = TempDir::new().unwrap();
    let path = dir.child("recetas_precargadas.json");
    std::fs::write(&path, PRELOADED).unwrap();

    let config = test_config(path.to_str().map(str::to_owned));
    let router = comedor::create_app(config.clone(), pool.clone()).await;

    TestApp {
        router,
        pool,
        config,
        _dir: dir,
    }
}
