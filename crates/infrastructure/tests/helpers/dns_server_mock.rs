#![allow(dead_code)]
use hickory_proto::op::Message;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, UdpSocket};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::oneshot;

/// Query as the stub server saw it.
#[derive(Debug, Clone)]
pub struct SeenQuery {
    pub qname: String,
    pub qtype: u16,
    pub protocol: &'static str,
}

#[derive(Debug, Clone)]
pub enum MockReply {
    Answer {
        rcode: u8,
        answers: Vec<(u16, Vec<u8>)>,
    },
    /// Empty answer with the TC bit set.
    Truncated,
    /// Never answers.
    Silent,
}

impl MockReply {
    pub fn records(rr_type: u16, rdata: Vec<Vec<u8>>) -> Self {
        MockReply::Answer {
            rcode: 0,
            answers: rdata.into_iter().map(|r| (rr_type, r)).collect(),
        }
    }

    pub fn rcode(rcode: u8) -> Self {
        MockReply::Answer {
            rcode,
            answers: Vec::new(),
        }
    }
}

type Handler = Arc<dyn Fn(&SeenQuery) -> MockReply + Send + Sync>;

/// UDP and TCP DNS server on one 127.0.0.1 port, running on its own thread.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MockDnsServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&SeenQuery) -> MockReply + Send + Sync + 'static,
    {
        let udp = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = udp.local_addr().unwrap();
        let tcp = TcpListener::bind(addr).unwrap();
        udp.set_nonblocking(true).unwrap();
        tcp.set_nonblocking(true).unwrap();

        let handler: Handler = Arc::new(handler);
        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let thread = {
            let udp_queries = udp_queries.clone();
            let tcp_queries = tcp_queries.clone();
            std::thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .unwrap();
                runtime.block_on(serve(
                    udp,
                    tcp,
                    handler,
                    udp_queries,
                    tcp_queries,
                    shutdown_rx,
                ));
            })
        };

        Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    /// Answers every query with the same reply.
    pub fn replying(reply: MockReply) -> Self {
        Self::start(move |_| reply.clone())
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_upstream(&self) -> String {
        format!("udp://{}", self.addr)
    }

    pub fn tcp_upstream(&self) -> String {
        format!("tcp://{}", self.addr)
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

async fn serve(
    udp: UdpSocket,
    tcp: TcpListener,
    handler: Handler,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let udp = tokio::net::UdpSocket::from_std(udp).unwrap();
    let tcp = tokio::net::TcpListener::from_std(tcp).unwrap();
    let mut buf = vec![0u8; 4096];

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,
            result = udp.recv_from(&mut buf) => {
                if let Ok((len, peer)) = result {
                    udp_queries.fetch_add(1, Ordering::SeqCst);
                    if let Some(response) = respond(&buf[..len], "UDP", &handler) {
                        let _ = udp.send_to(&response, peer).await;
                    }
                }
            }
            result = tcp.accept() => {
                if let Ok((stream, _)) = result {
                    tcp_queries.fetch_add(1, Ordering::SeqCst);
                    let mut stream = stream.into_std().unwrap();
                    stream.set_nonblocking(false).unwrap();
                    let mut len_buf = [0u8; 2];
                    if stream.read_exact(&mut len_buf).is_err() {
                        continue;
                    }
                    let mut query = vec![0u8; usize::from(u16::from_be_bytes(len_buf))];
                    if stream.read_exact(&mut query).is_err() {
                        continue;
                    }
                    if let Some(response) = respond(&query, "TCP", &handler) {
                        let _ = stream.write_all(&(response.len() as u16).to_be_bytes());
                        let _ = stream.write_all(&response);
                    }
                }
            }
        }
    }
}

fn respond(query: &[u8], protocol: &'static str, handler: &Handler) -> Option<Vec<u8>> {
    let message = Message::from_vec(query).ok()?;
    let question = message.queries().first()?;
    let seen = SeenQuery {
        qname: question.name().to_utf8().trim_end_matches('.').to_string(),
        qtype: u16::from(question.query_type()),
        protocol,
    };

    match handler(&seen) {
        MockReply::Silent => None,
        MockReply::Truncated => Some(build_response(query, 0, true, &[])),
        MockReply::Answer { rcode, answers } => {
            Some(build_response(query, rcode, false, &answers))
        }
    }
}

/// Echoes the query's ID and question and appends `answers`, each owned by
/// the question name via a compression pointer to offset 12.
pub fn build_response(
    query: &[u8],
    rcode: u8,
    truncated: bool,
    answers: &[(u16, Vec<u8>)],
) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&query[0..2]);

    let tc = if truncated { 0x02 } else { 0x00 };
    response.push(0x81 | tc);
    response.push(0x80 | (rcode & 0x0F));

    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    response.extend_from_slice(&query[12..]);

    for (rr_type, rdata) in answers {
        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&rr_type.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(rdata);
    }

    response
}
