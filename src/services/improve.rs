use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use serde::Serialize;
use tracing::{debug, warn};

use super::{ServiceError, TextImprovementService};

#[derive(Serialize)]
struct ImproveRequest<'a> {
    current: &'a str,
    #[serde(rename = "type")]
    context_type: &'a str,
}

/// Improves text by piping a JSON request through a shell command.
///
/// The command reads `{"current": ..., "type": ...}` on stdin and prints the
/// improved text on stdout.
#[derive(Debug, Clone)]
pub struct CommandImprover {
    command: String,
}

impl CommandImprover {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl TextImprovementService for CommandImprover {
    fn improve(&self, text: &str, context_type: &str) -> Result<String, ServiceError> {
        let request = serde_json::to_string(&ImproveRequest {
            current: text,
            context_type,
        })
        .map_err(|err| ServiceError::Failed(err.to_string()))?;

        debug!(command = %self.command, context_type, "running improvement command");
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| ServiceError::Failed(err.to_string()))?;

        // Feed stdin from its own thread while stdout drains.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(request.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output.map_err(|err| ServiceError::Failed(err.to_string()))?;
        match written {
            Ok(Ok(())) => {}
            // The command may exit without reading all of its input.
            Ok(Err(err)) if err.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(err)) => return Err(ServiceError::Failed(err.to_string())),
            Err(_) => return Err(ServiceError::Failed("stdin writer panicked".to_string())),
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "improvement command failed");
            return Err(ServiceError::Failed(output.status.to_string()));
        }

        let improved = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if improved.is_empty() {
            return Err(ServiceError::EmptyResponse);
        }
        Ok(improved)
    }
}

/// Stand-in used when no improvement command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredImprover;

impl TextImprovementService for UnconfiguredImprover {
    fn improve(&self, _text: &str, _context_type: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Unavailable)
    }
}
