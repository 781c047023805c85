//! Minimal DICT (RFC 2229) client: connect, `DEFINE`, collect the text
//! blocks, `QUIT`.

use anagramer_types::Definition;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tracing::debug;

use crate::ClientError;

const STATUS_BANNER: u16 = 220;
const STATUS_DEFINITIONS_FOUND: u16 = 150;
const STATUS_DEFINITION: u16 = 151;
const STATUS_OK: u16 = 250;
const STATUS_NO_MATCH: u16 = 552;

#[derive(Debug, Clone)]
pub struct DictClient {
    address: String,
    database: String,
}

impl DictClient {
    /// Client searching every database (`*`) on `address` (`host:port`)
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            database: "*".to_string(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub async fn define_word(&self, word: &str) -> Result<Definition, ClientError> {
        let query = quoted_query(word)?;
        let stream = TcpStream::connect(&self.address).await?;
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();

        let banner = next_line(&mut lines).await?;
        expect_status(&banner, STATUS_BANNER)?;

        write
            .write_all(format!("DEFINE {} {}\r\n", self.database, query).as_bytes())
            .await?;

        let mut bodies = Vec::new();
        loop {
            let line = next_line(&mut lines).await?;
            match status_code(&line) {
                Some(STATUS_DEFINITIONS_FOUND) => debug!("{}", line),
                Some(STATUS_DEFINITION) => bodies.push(read_text_block(&mut lines).await?),
                Some(STATUS_OK) => break,
                Some(STATUS_NO_MATCH) => return Err(ClientError::NoDefinition(word.to_string())),
                _ => return Err(ClientError::Dict(line)),
            }
        }

        // The answer is complete; a failed goodbye changes nothing
        let _ = write.write_all(b"QUIT\r\n").await;

        Ok(Definition {
            word: word.to_string(),
            text: bodies.join("\n\n"),
        })
    }
}

async fn next_line(lines: &mut Lines<BufReader<OwnedReadHalf>>) -> Result<String, ClientError> {
    lines
        .next_line()
        .await?
        .ok_or_else(|| ClientError::Dict("connection closed".to_string()))
}

/// Text up to the lone "." terminator, with dot-stuffing undone
async fn read_text_block(
    lines: &mut Lines<BufReader<OwnedReadHalf>>,
) -> Result<String, ClientError> {
    let mut text = Vec::new();
    loop {
        let line = next_line(lines).await?;
        if line == "." {
            break;
        }
        let line = match line.strip_prefix("..") {
            Some(rest) => format!(".{}", rest),
            None => line,
        };
        text.push(line);
    }
    Ok(text.join("\n"))
}

/// The word as a quoted DICT argument. Control characters would end the
/// command line early, so words containing them are refused.
fn quoted_query(word: &str) -> Result<String, ClientError> {
    if word.chars().any(char::is_control) {
        return Err(ClientError::Dict(format!("invalid word {:?}", word)));
    }
    Ok(format!("\"{}\"", word.replace('"', "")))
}

fn status_code(line: &str) -> Option<u16> {
    line.get(..3)?.parse().ok()
}

fn expect_status(line: &str, expected: u16) -> Result<(), ClientError> {
    if status_code(line) == Some(expected) {
        Ok(())
    } else {
        Err(ClientError::Dict(line.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    /// One-shot DICT server that answers with `reply` and returns what it was sent
    async fn serve_once(reply: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"220 test.dict <auth.mime> <1@test>\r\n")
                .await
                .unwrap();

            let mut received = Vec::new();
            let mut buf = [0u8; 256];
            while !received.ends_with(b"\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                received.extend_from_slice(&buf[..n]);
            }
            socket.write_all(reply.as_bytes()).await.unwrap();
            String::from_utf8(received).unwrap()
        });

        (address, handle)
    }

    #[test]
    fn test_status_code() {
        assert_eq!(status_code("250 ok"), Some(250));
        assert_eq!(status_code("ab"), None);
        assert_eq!(status_code("xyz text"), None);
    }

    #[test]
    fn test_quoted_query() {
        assert_eq!(quoted_query("o'clock").unwrap(), "\"o'clock\"");
        assert_eq!(quoted_query("say \"hi\"").unwrap(), "\"say hi\"");
        assert!(quoted_query("tree\r\nSHOW DB").is_err());
        assert!(quoted_query("tab\there").is_err());
    }

    #[tokio::test]
    async fn test_control_characters_never_reach_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let err = DictClient::new(address)
            .define_word("tree\"\r\nQUIT")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Dict(_)));
        let accepted =
            tokio::time::timeout(std::time::Duration::from_millis(50), listener.accept()).await;
        assert!(accepted.is_err(), "no connection should have been opened");
    }

    #[tokio::test]
    async fn test_define_collects_blocks() {
        let reply = "150 2 definitions retrieved\r\n\
                     151 \"tree\" wn \"WordNet\"\r\n\
                     tree\r\n  a tall perennial woody plant\r\n.\r\n\
                     151 \"tree\" gcide \"GCIDE\"\r\n\
                     ..dotted line\r\n.\r\n\
                     250 ok\r\n";
        let (address, server) = serve_once(reply).await;

        let definition = DictClient::new(address).define_word("tree").await.unwrap();

        assert_eq!(definition.word, "tree");
        assert_eq!(
            definition.text,
            "tree\n  a tall perennial woody plant\n\n.dotted line"
        );
        assert_eq!(server.await.unwrap(), "DEFINE * \"tree\"\r\n");
    }

    #[tokio::test]
    async fn test_no_match() {
        let (address, _server) = serve_once("552 no match\r\n").await;

        let err = DictClient::new(address)
            .with_database("wn")
            .define_word("zzxq")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NoDefinition(word) if word == "zzxq"));
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        let (address, _server) = serve_once("501 syntax error\r\n").await;

        let err = DictClient::new(address).define_word("tree").await.unwrap_err();
        assert!(matches!(err, ClientError::Dict(line) if line.starts_with("501")));
    }
}
