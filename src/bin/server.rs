//! REST API server for checkout payment-field validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! checkout-validator-server
//!
//! # With custom port
//! checkout-validator-server --port 8080
//! CHECKOUT_VALIDATOR_PORT=8080 checkout-validator-server
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use checkout_validator::{
    checkout::CheckoutForm,
    expiry::{ExpiryField, YearMonth},
    validate_card_number, validate_cvv, validate_expiry_at, ExpiryError,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Checkout Validator API",
        version = "0.1.0",
        description = "Payment-field validation for the ordering checkout: card number (Luhn), expiry and CVV.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Validation", description = "Single-field validation endpoints"),
        (name = "Checkout", description = "Whole-form validation"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        validate_card,
        validate_expiry_handler,
        validate_cvv_handler,
        validate_checkout,
        health,
    ),
    components(schemas(
        CardRequest,
        CardResponse,
        ExpiryRequest,
        ExpiryResponse,
        CvvRequest,
        CvvResponse,
        FieldValue,
        CheckoutRequest,
        CheckoutResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "4532 0151 1283 0366"}))]
struct CardRequest {
    /// Card number to validate. Any non-digit characters are ignored.
    card_number: String,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({"valid": true, "masked": "****-****-****-0366"}))]
struct CardResponse {
    /// Whether the digits pass the Luhn check
    valid: bool,
    /// Masked card number (last four digits only)
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<String>,
    /// Human-readable error message explaining why validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// A form value sent either as text or as a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Number(i64),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

impl ExpiryField for FieldValue {
    fn to_number(&self) -> Result<i64, ExpiryError> {
        match self {
            Self::Text(s) => s.to_number(),
            Self::Number(n) => Ok(*n),
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"month": "12", "year": 2028}))]
struct ExpiryRequest {
    /// Expiry month (1-12), as a string or number
    month: FieldValue,
    /// Expiry year, two or four digits, as a string or number
    year: FieldValue,
}

#[derive(Serialize, ToSchema)]
struct ExpiryResponse {
    /// Whether the expiry is not in the past
    valid: bool,
    /// Month (1-12)
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<u8>,
    /// Four-digit year
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    /// Formatted date (MM/YY)
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted: Option<String>,
    /// Error message if validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"cvv": "123"}))]
struct CvvRequest {
    /// CVV to validate (exactly 3 digits, surrounding whitespace ignored)
    cvv: String,
}

#[derive(Serialize, ToSchema)]
struct CvvResponse {
    /// Whether the CVV is valid
    valid: bool,
    /// Error message if validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "cardholderName": "Ada Lovelace",
    "cardNumber": "4532 0151 1283 0366",
    "expiryMonth": "12",
    "expiryYear": "28",
    "cvv": "123"
}))]
struct CheckoutRequest {
    #[serde(default)]
    cardholder_name: String,
    #[serde(default)]
    card_number: String,
    #[serde(default)]
    expiry_month: FieldValue,
    #[serde(default)]
    expiry_year: FieldValue,
    #[serde(default)]
    cvv: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct CheckoutResponse {
    /// True when every field is valid
    can_submit: bool,
    /// Inline message per invalid field, keyed by field name
    errors: BTreeMap<String, String>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Validate a card number
#[utoipa::path(
    post,
    path = "/card/validate",
    request_body = CardRequest,
    responses(
        (status = 200, description = "Validation result", body = CardResponse)
    ),
    tag = "Validation"
)]
async fn validate_card(Json(req): Json<CardRequest>) -> Json<CardResponse> {
    match validate_card_number(&req.card_number) {
        Ok(card) => Json(CardResponse {
            valid: true,
            masked: Some(card.masked()),
            error: None,
        }),
        Err(e) => Json(CardResponse {
            valid: false,
            masked: None,
            error: Some(e.to_string()),
        }),
    }
}

/// Validate an expiry month and year
#[utoipa::path(
    post,
    path = "/expiry/validate",
    request_body = ExpiryRequest,
    responses(
        (status = 200, description = "Expiry validation result", body = ExpiryResponse)
    ),
    tag = "Validation"
)]
async fn validate_expiry_handler(Json(req): Json<ExpiryRequest>) -> Json<ExpiryResponse> {
    match validate_expiry_at(&req.month, &req.year, YearMonth::now()) {
        Ok(exp) => Json(ExpiryResponse {
            valid: true,
            month: Some(exp.month()),
            year: Some(exp.year()),
            formatted: Some(exp.format_short()),
            error: None,
        }),
        Err(e) => Json(ExpiryResponse {
            valid: false,
            month: None,
            year: None,
            formatted: None,
            error: Some(e.to_string()),
        }),
    }
}

/// Validate a CVV
#[utoipa::path(
    post,
    path = "/cvv/validate",
    request_body = CvvRequest,
    responses(
        (status = 200, description = "CVV validation result", body = CvvResponse)
    ),
    tag = "Validation"
)]
async fn validate_cvv_handler(Json(req): Json<CvvRequest>) -> Json<CvvResponse> {
    match validate_cvv(&req.cvv) {
        Ok(_) => Json(CvvResponse {
            valid: true,
            error: None,
        }),
        Err(e) => Json(CvvResponse {
            valid: false,
            error: Some(e.to_string()),
        }),
    }
}

/// Validate the whole checkout form
#[utoipa::path(
    post,
    path = "/checkout/validate",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Per-field validation result", body = CheckoutResponse)
    ),
    tag = "Checkout"
)]
async fn validate_checkout(Json(req): Json<CheckoutRequest>) -> Json<CheckoutResponse> {
    let form = CheckoutForm::new(
        req.cardholder_name,
        req.card_number,
        req.expiry_month.into_text(),
        req.expiry_year.into_text(),
        req.cvv,
    );
    let validation = form.validate();

    tracing::debug!(form = ?form, can_submit = validation.can_submit(), "validated checkout form");

    Json(CheckoutResponse {
        can_submit: validation.can_submit(),
        errors: validation
            .errors()
            .map(|(field, error)| (field.key().to_string(), error.message().to_string()))
            .collect(),
    })
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Configuration
// ============================================================================

const DEFAULT_PORT: u16 = 3000;

struct ServerConfig {
    host: IpAddr,
    port: u16,
}

impl ServerConfig {
    /// `--port` wins over `CHECKOUT_VALIDATOR_PORT`; the host comes from
    /// `CHECKOUT_VALIDATOR_HOST`.
    fn load() -> Self {
        let port = std::env::args()
            .skip_while(|a| a != "--port")
            .nth(1)
            .or_else(|| std::env::var("CHECKOUT_VALIDATOR_PORT").ok())
            .and_then(|p| match p.parse::<u16>() {
                Ok(port) => Some(port),
                Err(e) => {
                    tracing::warn!("Invalid port {:?}: {}, using default {}", p, e, DEFAULT_PORT);
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("CHECKOUT_VALIDATOR_HOST")
            .ok()
            .and_then(|h| match h.parse::<IpAddr>() {
                Ok(host) => Some(host),
                Err(e) => {
                    tracing::warn!("Invalid host {:?}: {}, using 0.0.0.0", h, e);
                    None
                }
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        Self { host, port }
    }
}

fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/card/validate", post(validate_card))
        .route("/expiry/validate", post(validate_expiry_handler))
        .route("/cvv/validate", post(validate_cvv_handler))
        .route("/checkout/validate", post(validate_checkout))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load();
    let addr = SocketAddr::new(config.host, config.port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", config.port);

    if let Err(e) = axum::serve(listener, app()).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
