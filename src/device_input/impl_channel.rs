use crate::device_input::interface::{DeviceInput, UserCommand};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Input fed by whoever holds a sender: the GUI window's buttons or a test.
pub struct DeviceInputChannel {
    sender: Sender<UserCommand>,
    receiver: Mutex<Option<Receiver<UserCommand>>>,
}

impl DeviceInputChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    pub fn sender(&self) -> Sender<UserCommand> {
        self.sender.clone()
    }
}

impl DeviceInput for DeviceInputChannel {
    fn events(&self) -> Receiver<UserCommand> {
        let taken = self.receiver.lock().ok().and_then(|mut r| r.take());
        match taken {
            Some(receiver) => receiver,
            None => channel().1,
        }
    }
}
