use super::{ClassLabel, Classifier};
use crate::error::{Error, Result};
use reqwest::blocking::{Client, multipart};
use std::time::Duration;

/// Prediction service the classifier talks to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://sgwildflowers-6vgyceft2q-as.a.run.app/predict";
/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";
pub const UPLOAD_FILE_NAME: &str = "image.jpg";

/// Classifier that posts the original bytes to an HTTP prediction endpoint
/// and reads the species name from the response body.
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
}

impl RemoteClassifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    /// `None` keeps the HTTP client's default timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::PredictionTransport(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classifier for RemoteClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn predict(&self, image: &[u8]) -> Result<ClassLabel> {
        let part = multipart::Part::bytes(image.to_vec())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str("image/jpeg")
            .map_err(transport)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(endpoint = %self.endpoint, bytes = image.len(), "posting image");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::PredictionTransport(format!(
                "endpoint answered {status}"
            )));
        }
        let body = response.text().map_err(transport)?;
        let label = body.trim();
        if label.is_empty() {
            return Err(Error::PredictionTransport(
                "endpoint returned an empty body".to_string(),
            ));
        }
        Ok(ClassLabel::Name(label.to_string()))
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::PredictionTransport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve exactly one request with a canned response and hand back the
    /// raw request that was received.
    fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/predict", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = Vec::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                request.extend_from_slice(line.as_bytes());
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut body_buf = vec![0u8; content_length];
            reader.read_exact(&mut body_buf).unwrap();
            request.extend_from_slice(&body_buf);

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
            request
        });
        (url, handle)
    }

    #[test]
    fn posts_multipart_file_and_reads_plain_text_label() {
        let (url, server) = one_shot_server("200 OK", "Lalang\n");
        let classifier = RemoteClassifier::new(url).unwrap();

        let label = classifier.predict(b"\xFF\xD8fake-jpeg-bytes").unwrap();
        assert_eq!(label, ClassLabel::Name("Lalang".into()));

        let request = String::from_utf8_lossy(&server.join().unwrap()).to_string();
        assert!(request.starts_with("POST /predict"), "{request}");
        assert!(request.to_ascii_lowercase().contains("multipart/form-data"));
        assert!(request.contains("name=\"file\""));
        assert!(request.contains("filename=\"image.jpg\""));
        assert!(request.contains("fake-jpeg-bytes"));
    }

    #[test]
    fn non_success_status_is_a_transport_error() {
        let (url, server) = one_shot_server("500 Internal Server Error", "boom");
        let classifier = RemoteClassifier::new(url).unwrap();
        let err = classifier.predict(b"bytes").unwrap_err();
        assert!(matches!(err, Error::PredictionTransport(ref m) if m.contains("500")), "{err:?}");
        server.join().unwrap();
    }

    #[test]
    fn empty_body_is_a_transport_error() {
        let (url, server) = one_shot_server("200 OK", "  ");
        let classifier = RemoteClassifier::new(url).unwrap();
        assert!(matches!(
            classifier.predict(b"bytes"),
            Err(Error::PredictionTransport(_))
        ));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_endpoint_is_a_transport_error() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let classifier = RemoteClassifier::with_timeout(
            format!("http://{addr}/predict"),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert!(matches!(
            classifier.predict(b"bytes"),
            Err(Error::PredictionTransport(_))
        ));
    }

    #[test]
    fn unknown_remote_label_is_passed_through() {
        let (url, server) = one_shot_server("200 OK", "Dandelion");
        let classifier = RemoteClassifier::new(url).unwrap();
        let label = classifier.predict(b"bytes").unwrap();
        assert!(matches!(label.resolve(), Err(Error::UnknownLabel(ref l)) if l == "Dandelion"));
        server.join().unwrap();
    }
}
