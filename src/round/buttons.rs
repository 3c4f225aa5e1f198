use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

type Resolver = Arc<Mutex<Option<OneshotSender<usize>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// The press resolved the current round.
    Accepted,
    /// Nobody was listening, or another player already resolved the round.
    Ignored,
}

struct PressListener {
    index: usize,
    resolver: Resolver,
}

impl PressListener {
    fn fire(&self) -> Press {
        let sender = self
            .resolver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender.map(|sender| sender.send(self.index)) {
            Some(Ok(())) => Press::Accepted,
            // Receiver dropped, the round was abandoned
            Some(Err(_)) | None => Press::Ignored,
        }
    }
}

#[derive(Default)]
struct Button {
    listener: Option<PressListener>,
}

/// One button per player. While armed every button shares a single-resolution
/// channel, so only the first press of a round gets through.
pub struct ButtonBoard {
    buttons: Mutex<Vec<Button>>,
}

impl ButtonBoard {
    pub fn new(amount_of_buttons: usize) -> Self {
        ButtonBoard {
            buttons: Mutex::new((0..amount_of_buttons).map(|_| Button::default()).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.buttons().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribes a listener on every button and returns the channel that
    /// resolves with the index of the first button pressed.
    pub fn arm(&self) -> OneshotReceiver<usize> {
        let (tx, rx): (OneshotSender<usize>, OneshotReceiver<usize>) = oneshot::channel();
        let resolver: Resolver = Arc::new(Mutex::new(Some(tx)));

        let mut buttons = self.buttons();
        for (index, button) in buttons.iter_mut().enumerate() {
            button.listener = Some(PressListener {
                index,
                resolver: Arc::clone(&resolver),
            });
        }
        rx
    }

    pub fn press(&self, index: usize) -> Press {
        match self.buttons().get(index).and_then(|button| button.listener.as_ref()) {
            Some(listener) => listener.fire(),
            None => Press::Ignored,
        }
    }

    /// Removes every listener. Calling it on a disarmed board does nothing.
    pub fn disarm(&self) {
        for button in self.buttons().iter_mut() {
            button.listener = None;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.buttons().iter().any(|button| button.listener.is_some())
    }

    fn buttons(&self) -> MutexGuard<'_, Vec<Button>> {
        self.buttons.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
