//! Local stand-ins for Jenkins and an FTP server

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Serves fixed bodies keyed by request path
pub struct FakeJenkins {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeJenkins {
    pub fn start(routes: Vec<(String, Vec<u8>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                loop {
                    let mut header = String::new();
                    match reader.read_line(&mut header) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if header == "\r\n" => break,
                        Ok(_) => {}
                    }
                }

                let path = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                seen.lock().unwrap().push(path.clone());

                let (status, body) = routes
                    .iter()
                    .find(|(p, _)| *p == path)
                    .map(|(_, b)| (200, b.clone()))
                    .unwrap_or((404, b"not found".to_vec()));

                let head = format!(
                    "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(&body);
            }
        });

        Self { base, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// What the fake FTP server observed
#[derive(Debug, Default, Clone)]
pub struct FtpLog {
    /// `dir/name` and byte count of every STOR
    pub stored: Vec<(String, usize)>,
    /// `dir/name` of every DELE
    pub deleted: Vec<String>,
    pub sessions: usize,
}

/// Minimal passive-mode FTP server: one session at a time
pub struct FakeFtp {
    pub address: String,
    log: Arc<Mutex<FtpLog>>,
}

impl FakeFtp {
    /// `deny_delete` answers every DELE with a 550
    pub fn start(deny_delete: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let log = Arc::new(Mutex::new(FtpLog::default()));
        let shared = Arc::clone(&log);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                shared.lock().unwrap().sessions += 1;
                let _ = serve_session(stream, &shared, deny_delete);
            }
        });

        Self { address, log }
    }

    pub fn log(&self) -> FtpLog {
        self.log.lock().unwrap().clone()
    }
}

fn serve_session(
    mut control: TcpStream,
    log: &Arc<Mutex<FtpLog>>,
    deny_delete: bool,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(control.try_clone()?);
    let mut cwd = String::from("/");
    let mut data: Option<TcpListener> = None;

    control.write_all(b"220 fake ftp ready\r\n")?;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim_end();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));

        match cmd.to_ascii_uppercase().as_str() {
            "USER" => control.write_all(b"331 password please\r\n")?,
            "PASS" => control.write_all(b"230 logged in\r\n")?,
            "TYPE" => control.write_all(b"200 type set\r\n")?,
            "CWD" => {
                cwd = arg.to_string();
                control.write_all(b"250 directory changed\r\n")?;
            }
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0")?;
                let port = listener.local_addr()?.port();
                data = Some(listener);
                let reply = format!(
                    "227 Entering Passive Mode (127,0,0,1,{},{})\r\n",
                    port / 256,
                    port % 256
                );
                control.write_all(reply.as_bytes())?;
            }
            "STOR" => {
                let Some(listener) = data.take() else {
                    control.write_all(b"425 use PASV first\r\n")?;
                    continue;
                };
                control.write_all(b"150 ok to send data\r\n")?;
                let (mut conn, _) = listener.accept()?;
                let mut bytes = Vec::new();
                conn.read_to_end(&mut bytes)?;
                drop(conn);
                log.lock()
                    .unwrap()
                    .stored
                    .push((format!("{}/{}", cwd, arg), bytes.len()));
                control.write_all(b"226 transfer complete\r\n")?;
            }
            "DELE" => {
                if deny_delete {
                    control.write_all(b"550 Permission denied\r\n")?;
                } else {
                    log.lock().unwrap().deleted.push(format!("{}/{}", cwd, arg));
                    control.write_all(b"250 deleted\r\n")?;
                }
            }
            "QUIT" => {
                control.write_all(b"221 bye\r\n")?;
                return Ok(());
            }
            _ => control.write_all(b"502 not implemented\r\n")?,
        }
    }
}
