use crate::device_input::interface::{DeviceInput, UserCommand};
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Reads one command per line from stdin.
pub struct DeviceInputConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceInputConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input"),
        }
    }
}

pub fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word.to_lowercase().as_str(), rest) {
        ("camera", "") => Some(UserCommand::RequestCamera),
        ("load", path) if !path.is_empty() => Some(UserCommand::LoadFile(PathBuf::from(path))),
        ("capture", "") => Some(UserCommand::CaptureSnapshot),
        ("start", "") => Some(UserCommand::StartRealTime),
        ("stop", "") => Some(UserCommand::StopRealTime),
        ("detect", "") => Some(UserCommand::Submit),
        ("reset", "") => Some(UserCommand::Reset),
        ("model", id) if !id.is_empty() => Some(UserCommand::SelectModel(id.to_string())),
        ("quit", "") | ("exit", "") => Some(UserCommand::Quit),
        _ => None,
    }
}

impl DeviceInput for DeviceInputConsole {
    fn events(&self) -> Receiver<UserCommand> {
        let (tx, rx) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => {
                        let _ = logger.warn(&format!("unknown command: {}", line.trim()));
                    }
                }
            }
            let _ = tx.send(UserCommand::Quit);
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("camera"), Some(UserCommand::RequestCamera));
        assert_eq!(
            parse_command("  load ./photos/cat 1.jpg "),
            Some(UserCommand::LoadFile(PathBuf::from("./photos/cat 1.jpg")))
        );
        assert_eq!(
            parse_command("model yolo8n.pt"),
            Some(UserCommand::SelectModel("yolo8n.pt".to_string()))
        );
        assert_eq!(parse_command("DETECT"), Some(UserCommand::Submit));
        assert_eq!(parse_command("load"), None);
        assert_eq!(parse_command("start now"), None);
        assert_eq!(parse_command("dance"), None);
    }
}
