use crate::models::domain::{BuildingRecord, Difficulty};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A complete, valid record for the given identifier and display name.
    pub fn sample_building(id: &str, name: &str) -> BuildingRecord {
        BuildingRecord {
            id: id.to_string(),
            name: name.to_string(),
            image_url: Some(BuildingRecord::image_url_for(id)),
            style: Some("Byzantine".to_string()),
            style_distractors: Some(vec![
                "Romanesque".to_string(),
                "Ottoman".to_string(),
                "Gothic".to_string(),
            ]),
            era: Some("532-537 AD".to_string()),
            style_explanation: Some("A vast central dome on pendentives. Rich mosaics.".to_string()),
            engineering_question: Some("How is the dome carried over a square plan?".to_string()),
            engineering_answer: Some("Pendentives".to_string()),
            engineering_distractors: Some(vec![
                "Flying buttresses".to_string(),
                "Squinches".to_string(),
                "Steel ring beam".to_string(),
            ]),
            engineering_explanation: Some("Curved triangles transfer the load to four piers.".to_string()),
            fun_facts: Some(vec![
                "It was the largest cathedral for nearly a thousand years.".to_string(),
                "The first dome collapsed in 558.".to_string(),
            ]),
            difficulty: Some(Difficulty::Beginner),
            extra: Default::default(),
        }
    }

    /// The JSON a well-behaved model would reply with for `sample_building`.
    pub fn sample_reply(id: &str, name: &str) -> String {
        serde_json::to_string_pretty(&sample_building(id, name))
            .expect("sample building should serialize")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        task::JoinHandle,
    };

    /// One scripted HTTP reply.
    pub struct CannedResponse {
        status: u16,
        content_type: &'static str,
        body: Vec<u8>,
    }

    impl CannedResponse {
        pub fn json(status: u16, body: &str) -> Self {
            Self::bytes(status, "application/json", body.as_bytes().to_vec())
        }

        pub fn bytes(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
            Self {
                status,
                content_type,
                body,
            }
        }
    }

    /// Local HTTP server answering one connection per canned response, in order.
    pub struct TestServer {
        pub base_url: String,
        handle: JoinHandle<Vec<String>>,
    }

    impl TestServer {
        /// Raw text of every request the server received.
        pub async fn finish(self) -> Vec<String> {
            self.handle.await.expect("test server should not panic")
        }
    }

    pub async fn serve_responses(responses: Vec<CannedResponse>) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("test server should bind");
        let addr = listener.local_addr().expect("test server has an address");

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for canned in responses {
                let (mut socket, _) = listener.accept().await.expect("accept should work");
                requests.push(read_request(&mut socket).await);

                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    canned.status,
                    reason_phrase(canned.status),
                    canned.content_type,
                    canned.body.len()
                );
                socket.write_all(head.as_bytes()).await.expect("write head");
                socket.write_all(&canned.body).await.expect("write body");
                let _ = socket.shutdown().await;
            }
            requests
        });

        TestServer {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    fn reason_phrase(status: u16) -> &'static str {
        match status {
            200 => "OK",
            401 => "Unauthorized",
            404 => "Not Found",
            429 => "Too Many Requests",
            503 => "Service Unavailable",
            _ => "Status",
        }
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.expect("read should work");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_building_is_valid() {
        let building = sample_building("hagia-sophia", "Hagia Sophia");
        assert_eq!(building.image_url, "/images/hagia-sophia.jpg");
        assert!(building.validation_warnings().is_none());
    }

    #[test]
    fn test_fixtures_sample_reply_parses_back() {
        let reply = sample_reply("pantheon", "Pantheon");
        let parsed: crate::models::domain::BuildingRecord =
            serde_json::from_str(&reply).expect("reply should parse");
        assert_eq!(parsed, sample_building("pantheon", "Pantheon"));
    }
}
