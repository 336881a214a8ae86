//! Gemini `generateContent` backend for every capability.

macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            /// Point the client at another Gemini-compatible host.
            pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}
pub(crate) use impl_with_gemini_base_url;

pub mod analysis;
pub mod client;
pub mod image;
pub mod search;
pub mod types;

pub use analysis::GeminiAnalysisClient;
pub use client::GeminiHttpClient;
pub use image::GeminiImageClient;
pub use search::GeminiSearchClient;

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockBuilder, MockServer};

    pub const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";

    pub fn post_path_regex(regex: &str) -> MockBuilder {
        Mock::given(method("POST")).and(path_regex(regex))
    }

    /// JSON body of the single request the server received.
    pub async fn sole_request_body(server: &MockServer) -> serde_json::Value {
        let requests = server
            .received_requests()
            .await
            .expect("request recording enabled");
        assert_eq!(requests.len(), 1, "expected exactly one request");
        serde_json::from_slice(&requests[0].body).expect("request body is JSON")
    }

    /// A base URL nothing is listening on.
    pub fn unreachable_base_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        format!("http://{}", addr)
    }

    pub fn inline_image_response(mime_type: &str, data: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": { "mimeType": mime_type, "data": data }
                    }]
                }
            }]
        })
    }

    pub fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] }
            }]
        })
    }
}
