use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Header-terminator for HTTP/1.1 requests.
const HEADER_END: &[u8] = b"\r\n\r\n";
const READ_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) struct CaptureServer {
    pub(crate) url: String,
    pub(crate) requests: mpsc::Receiver<String>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for CaptureServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawns a blocking HTTP/1.1 server that answers every request with
/// `status` and `body`, forwarding the raw request text to `requests`.
pub(crate) fn spawn_capture_server(
    status: u16,
    body: &'static str,
) -> Result<CaptureServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let (request_tx, request_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            match listener.accept() {
                Ok((stream, _)) => {
                    let request_tx = request_tx.clone();
                    thread::spawn(move || handle_client(stream, status, body, &request_tx));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok(CaptureServer {
        url: format!("http://{}/bench", addr),
        requests: request_rx,
        shutdown: shutdown_tx,
        thread: Some(handle),
    })
}

/// Returns a URL on a port nobody is listening on.
pub(crate) fn closed_port_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind free port failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("free port addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

fn handle_client(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    request_tx: &mpsc::Sender<String>,
) {
    if stream.set_nonblocking(false).is_err()
        || stream.set_read_timeout(Some(READ_TIMEOUT)).is_err()
    {
        return;
    }
    let Some(raw) = read_request(&mut stream) else {
        return;
    };
    let _send_result = request_tx.send(raw);

    let response = format!(
        "HTTP/1.1 {} Test\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() || stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_len = loop {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        data.extend_from_slice(chunk.get(..read)?);
        if let Some(pos) = data
            .windows(HEADER_END.len())
            .position(|window| window == HEADER_END)
        {
            break pos.checked_add(HEADER_END.len())?;
        }
    };

    let head = String::from_utf8_lossy(data.get(..header_len)?).into_owned();
    let content_length = header_value(&head, "content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);
    while data.len() < header_len.saturating_add(content_length) {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(chunk.get(..read)?);
    }
    Some(String::from_utf8_lossy(&data).into_owned())
}

/// Case-insensitive lookup of a header in a raw HTTP request.
pub(crate) fn header_value(raw: &str, name: &str) -> Option<String> {
    raw.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().to_owned())
    })
}
