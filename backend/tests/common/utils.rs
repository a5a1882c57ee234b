use axum::response::Response;
use http_body_util::BodyExt;

pub const BOUNDARY: &str = "gallery-test-boundary";

/// One part of a `multipart/form-data` body
pub enum Part {
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
    Text {
        name: String,
        value: String,
    },
}

impl Part {
    pub fn file(name: &str, file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Self {
        Self::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.map(ToString::to_string),
            bytes: bytes.to_vec(),
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Encode parts as a `multipart/form-data` body delimited by [`BOUNDARY`]
pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                    )
                    .as_bytes(),
                );
                if let Some(content_type) = content_type {
                    body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Read response body as UTF-8 text
pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Extract the object key from a URL returned by the in-memory store
pub fn key_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap()
}

/// Fake PNG payload
pub fn png_bytes(size: usize) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.resize(size.max(data.len()), 0xAB);
    data
}
