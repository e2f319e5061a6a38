use std::path::PathBuf;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    RequestCamera,
    LoadFile(PathBuf),
    CaptureSnapshot,
    StartRealTime,
    StopRealTime,
    Submit,
    Reset,
    SelectModel(String),
    Quit,
}

pub trait DeviceInput {
    /// Commands in the order the user issued them. Only the first call
    /// receives anything.
    fn events(&self) -> Receiver<UserCommand>;
}
