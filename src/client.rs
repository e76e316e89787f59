use crate::model::Event;

use http::{Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Path of the events document, relative to the configured base URL.
pub const EVENTS_PATH: &str = "/events.json";

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

/// Everything that can abort a load cycle.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid events URL '{0}'")]
    InvalidUrl(String),
    #[error("no valid system certificates found")]
    NoCertificates,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to fetch events: {0}")]
    Status(StatusCode),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("malformed events payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct EventClient {
    client: HttpsClient,
    events_uri: Uri,
}

impl EventClient {
    pub fn new(base_url: &str, insecure: bool) -> Result<Self, LoadError> {
        let events_uri = events_uri(base_url)?;

        let tls_config = if insecure {
            rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            if root_store.is_empty() {
                return Err(LoadError::NoCertificates);
            }

            rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth()
        };

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self { client, events_uri })
    }

    pub fn events_uri(&self) -> &Uri {
        &self.events_uri
    }

    pub async fn fetch_events(&self) -> Result<Vec<Event>, LoadError> {
        let request = Request::get(self.events_uri.clone())
            .header(http::header::ACCEPT, "application/json")
            .body(String::new())
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        debug!(uri = %self.events_uri, "fetching events");
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| LoadError::Body(e.to_string()))?
            .to_bytes();

        let events: Vec<Event> = serde_json::from_slice(&body)?;
        info!(count = events.len(), "loaded events");
        Ok(events)
    }
}

fn events_uri(base_url: &str) -> Result<Uri, LoadError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(LoadError::InvalidUrl(base_url.to_string()));
    }
    let full = if trimmed.ends_with(".json") {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, EVENTS_PATH)
    };
    let uri: Uri = full
        .parse()
        .map_err(|_| LoadError::InvalidUrl(base_url.to_string()))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(LoadError::InvalidUrl(base_url.to_string()));
    }
    Ok(uri)
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}
