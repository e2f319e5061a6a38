use crate::device_camera::interface::{CameraStream, DeviceCamera, DeviceCameraEvent};
use crate::error::CameraError;
use crate::library::logger::interface::Logger;
use image::{Rgb, RgbImage};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeCameraState {
    deny: Mutex<Option<CameraError>>,
    unplugged: AtomicBool,
    live_streams: AtomicUsize,
    opened: AtomicUsize,
    subscribers: Mutex<Vec<Sender<DeviceCameraEvent>>>,
}

/// Synthetic camera producing a moving square on a gradient.
#[derive(Clone)]
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: u32,
    height: u32,
    state: Arc<FakeCameraState>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, width: u32, height: u32) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width,
            height,
            state: Arc::new(FakeCameraState::default()),
        }
    }

    /// Make the next `open` calls fail.
    pub fn deny(&self, error: CameraError) {
        if let Ok(mut deny) = self.state.deny.lock() {
            *deny = Some(error);
        }
    }

    /// Ends every open stream and notifies subscribers.
    pub fn unplug(&self) {
        self.state.unplugged.store(true, Ordering::SeqCst);
        self.broadcast(DeviceCameraEvent::Disconnected);
    }

    pub fn live_streams(&self) -> usize {
        self.state.live_streams.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    fn broadcast(&self, event: DeviceCameraEvent) {
        if let Ok(mut subscribers) = self.state.subscribers.lock() {
            subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn open(&self) -> Result<Box<dyn CameraStream>, CameraError> {
        let denied = self.state.deny.lock().ok().and_then(|d| d.clone());
        if let Some(error) = denied {
            let _ = self.logger.warn(&format!("open refused: {}", error));
            return Err(error);
        }
        if self.state.unplugged.load(Ordering::SeqCst) {
            return Err(CameraError::Unavailable("no camera connected".to_string()));
        }

        self.state.live_streams.fetch_add(1, Ordering::SeqCst);
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        let _ = self
            .logger
            .info(&format!("stream opened {}x{}", self.width, self.height));

        Ok(Box::new(FakeStream {
            width: self.width,
            height: self.height,
            frame: 0,
            live: true,
            state: self.state.clone(),
        }))
    }

    fn events(&self) -> Receiver<DeviceCameraEvent> {
        let (tx, rx) = channel();
        if !self.state.unplugged.load(Ordering::SeqCst) {
            let _ = tx.send(DeviceCameraEvent::Connected);
        }
        if let Ok(mut subscribers) = self.state.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}

struct FakeStream {
    width: u32,
    height: u32,
    frame: u32,
    live: bool,
    state: Arc<FakeCameraState>,
}

impl CameraStream for FakeStream {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn grab(&mut self) -> Result<RgbImage, CameraError> {
        if !self.live || self.state.unplugged.load(Ordering::SeqCst) {
            return Err(CameraError::StreamEnded);
        }
        self.frame = self.frame.wrapping_add(1);

        let side = (self.width.min(self.height) / 4).max(1);
        let offset = (self.frame * 8) % self.width.saturating_sub(side).max(1);
        let top = self.height.saturating_sub(side) / 2;

        Ok(RgbImage::from_fn(self.width, self.height, |x, y| {
            if x >= offset && x < offset + side && y >= top && y < top + side {
                Rgb([220, 60, 40])
            } else {
                Rgb([
                    (x * 255 / self.width.max(1)) as u8,
                    (y * 255 / self.height.max(1)) as u8,
                    96,
                ])
            }
        }))
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.state.live_streams.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_live(&self) -> bool {
        self.live && !self.state.unplugged.load(Ordering::SeqCst)
    }
}

impl Drop for FakeStream {
    fn drop(&mut self) {
        self.stop();
    }
}
