#![allow(dead_code)]
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

const RCODE_NOERROR: u8 = 0;
const RCODE_NXDOMAIN: u8 = 3;

/// How the mock answers a given query name.
#[derive(Debug, Clone)]
pub enum MockAnswer {
    Ptr(Vec<String>),
    NoData,
    NxDomain,
    Rcode(u8),
    /// TC over UDP, the full PTR set over TCP.
    Truncated(Vec<String>),
    /// Never answers.
    Silent,
    /// Answers with a different message ID.
    WrongId,
}

#[derive(Default)]
struct ServerState {
    answers: RwLock<HashMap<String, MockAnswer>>,
    default_answer: RwLock<Option<MockAnswer>>,
    udp_queries: AtomicUsize,
    tcp_queries: AtomicUsize,
    saw_edns: AtomicBool,
}

impl ServerState {
    fn answer_for(&self, name: &str) -> MockAnswer {
        self.answers
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .or_else(|| self.default_answer.read().unwrap().clone())
            .unwrap_or(MockAnswer::NxDomain)
    }
}

/// Loopback DNS server on UDP and TCP (same port) answering PTR queries
/// from a name table. Unknown names are NXDOMAIN.
pub struct MockDnsServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let state = Arc::new(ServerState::default());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let server_state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            server_state.udp_queries.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::respond(&server_state, &buf[..len], false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            server_state.tcp_queries.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(Self::serve_tcp(Arc::clone(&server_state), stream));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn serve_tcp(state: Arc<ServerState>, mut stream: tokio::net::TcpStream) {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }
        if let Some(response) = Self::respond(&state, &query, true) {
            let _ = stream
                .write_all(&(response.len() as u16).to_be_bytes())
                .await;
            let _ = stream.write_all(&response).await;
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn set_answer(&self, name: &str, answer: MockAnswer) {
        self.state
            .answers
            .write()
            .unwrap()
            .insert(name.to_string(), answer);
    }

    pub fn set_default_answer(&self, answer: MockAnswer) {
        *self.state.default_answer.write().unwrap() = Some(answer);
    }

    pub fn udp_queries(&self) -> usize {
        self.state.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.state.tcp_queries.load(Ordering::SeqCst)
    }

    pub fn saw_edns(&self) -> bool {
        self.state.saw_edns.load(Ordering::SeqCst)
    }

    fn respond(state: &ServerState, query: &[u8], over_tcp: bool) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }
        let arcount = u16::from_be_bytes([query[10], query[11]]);
        if arcount > 0 {
            state.saw_edns.store(true, Ordering::SeqCst);
        }

        let (name, question_end) = read_question(query)?;
        let question = &query[12..question_end];

        match state.answer_for(&name) {
            MockAnswer::Silent => None,
            MockAnswer::Ptr(names) => Some(build_response(query, question, RCODE_NOERROR, false, &names)),
            MockAnswer::NoData => Some(build_response(query, question, RCODE_NOERROR, false, &[])),
            MockAnswer::NxDomain => Some(build_response(query, question, RCODE_NXDOMAIN, false, &[])),
            MockAnswer::Rcode(rcode) => Some(build_response(query, question, rcode, false, &[])),
            MockAnswer::Truncated(names) if over_tcp => {
                Some(build_response(query, question, RCODE_NOERROR, false, &names))
            }
            MockAnswer::Truncated(_) => Some(build_response(query, question, RCODE_NOERROR, true, &[])),
            MockAnswer::WrongId => {
                let mut response = build_response(query, question, RCODE_NXDOMAIN, false, &[]);
                response[0] ^= 0xff;
                Some(response)
            }
        }
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Lower-cased query name with trailing dot, and the offset just past QCLASS.
fn read_question(query: &[u8]) -> Option<(String, usize)> {
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
        pos += len;
    }
    let end = pos + 4;
    if query.len() < end {
        return None;
    }
    Some((format!("{}.", labels.join(".")), end))
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

fn build_response(query: &[u8], question: &[u8], rcode: u8, truncated: bool, names: &[String]) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&query[0..2]);
    response.push(0x81 | if truncated { 0x02 } else { 0x00 });
    response.push(0x80 | (rcode & 0x0f));
    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(names.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(question);

    for name in names {
        let rdata = encode_name(name);
        response.extend_from_slice(&[
            0xc0, 0x0c,
            0x00, 0x0c,
            0x00, 0x01,
            0x00, 0x00, 0x00, 0x3c,
        ]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_question_and_encode_name() {
        let mut query = vec![0x12, 0x34, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
        query.extend_from_slice(&encode_name("1.0.IP6.arpa."));
        query.extend_from_slice(&[0x00, 0x0c, 0x00, 0x01]);

        let (name, end) = read_question(&query).unwrap();
        assert_eq!(name, "1.0.ip6.arpa.");
        assert_eq!(end, query.len());
    }
}
