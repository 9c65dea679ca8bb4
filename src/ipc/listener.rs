//! Unix-socket [`CommandSource`] implementation.
//!
//! Binds a Unix stream socket and serves one connection at a time.  Each
//! line received is parsed as a JSON-encoded [`Command`].
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"Move":"Right"}
//! {"Extend":"up"}
//! {"Focus":"Left"}
//! {"MoveTo":"main"}
//! "CutVertical"
//! {"RemoveHandle":{"axis":"Column","index":0}}
//! {"NameTile":{"name":"main"}}
//! "EnterSandbox"
//! {"Trigger":"super+l"}
//! ```
//!
//! Directions are case-insensitive.  Blank lines are ignored; malformed
//! lines are logged and skipped without closing the connection.

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`CommandSource`] that listens on a Unix stream socket for
/// JSON-encoded commands.
///
/// Each accepted connection can send multiple newline-delimited commands.
/// When the connection closes, the listener waits for the next one.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether the consumer is still listening.
enum Flow {
    Continue,
    SinkClosed,
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](CommandSource::run) is called
    /// and removed when it returns.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The filesystem path of the socket.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn serve(&self, listener: &UnixListener, sink: &mpsc::Sender<Command>) {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    if let Flow::SinkClosed = serve_connection(stream, sink) {
                        info!("sink closed, shutting down");
                        return;
                    }
                    debug!("client disconnected");
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
    }
}

/// Parse one line of the wire format.  `None` for blank lines.
pub fn parse_line(line: &str) -> Option<Result<Command, UnixSocketError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line).map_err(UnixSocketError::from))
}

fn serve_connection(stream: UnixStream, sink: &mpsc::Sender<Command>) -> Flow {
    for line in BufReader::new(stream).lines() {
        let text = match line {
            Ok(text) => text,
            Err(e) => {
                error!("read error: {}", e);
                break;
            }
        };
        match parse_line(&text) {
            None => continue,
            Some(Ok(cmd)) => {
                debug!("received {:?}", cmd);
                if sink.send(cmd).is_err() {
                    return Flow::SinkClosed;
                }
            }
            Some(Err(e)) => warn!("bad command {:?}: {}", text, e),
        }
    }
    Flow::Continue
}

impl CommandSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** until the receiving end of `sink` is dropped.
    /// Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        // Remove a stale socket left by a previous run.
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        self.serve(&listener, &sink);

        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("could not remove {}: {}", self.path.display(), e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Direction;
    use crate::grid::Axis;
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Monotonic counter to generate unique socket paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_socket_path() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!("wintile-test-{}-{}.sock", std::process::id(), id))
    }

    /// Start a listener on a fresh path and send `lines` over one
    /// connection.  Returns everything that reached the sink.
    fn send_lines(lines: &[&str]) -> Vec<Command> {
        let path = tmp_socket_path();
        let listener_path = path.clone();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let mut listener = UnixSocketListener::new(&listener_path);
            let _ = listener.run(tx);
        });

        // Give the listener a moment to bind.
        std::thread::sleep(Duration::from_millis(150));

        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            for line in lines {
                writeln!(stream, "{}", line).unwrap();
            }
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        std::thread::sleep(Duration::from_millis(150));
        let cmds = rx.try_iter().collect();
        let _ = std::fs::remove_file(&path);
        cmds
    }

    #[test]
    fn commands_arrive_in_order() {
        let cmds = send_lines(&[
            r#"{"Move":"Right"}"#,
            r#""CutVertical""#,
            r#"{"RemoveHandle":{"axis":"Column","index":0}}"#,
            r#"{"Trigger":"super+l"}"#,
        ]);
        assert_eq!(
            cmds,
            vec![
                Command::Move(Direction::Right),
                Command::CutVertical,
                Command::RemoveHandle {
                    axis: Axis::Column,
                    index: 0
                },
                Command::Trigger("super+l".into()),
            ]
        );
    }

    #[test]
    fn malformed_and_blank_lines_are_skipped() {
        let cmds = send_lines(&["not json at all", "", r#"{"Move":"Sideways"}"#, r#"{"Focus":"up"}"#]);
        assert_eq!(cmds, vec![Command::Focus(Direction::Up)]);
    }

    #[test]
    fn parse_line_cases() {
        assert!(parse_line("   ").is_none());
        assert_eq!(
            parse_line(r#"  {"Extend":"LEFT"}  "#).unwrap().unwrap(),
            Command::Extend(Direction::Left)
        );
        assert_eq!(parse_line(r#""EnterSandbox""#).unwrap().unwrap(), Command::EnterSandbox);
        assert!(matches!(
            parse_line("{").unwrap(),
            Err(UnixSocketError::Json(_))
        ));
    }
}
