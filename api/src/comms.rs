use std::fmt;

use std::sync::Arc;
use std::thread;

pub use zmq::Socket as ZmqSocket;

use tokio::sync::{broadcast, mpsc, Mutex};

use msgs::*;
use utils::time::time_now;

use crate::ApiSettings;

pub struct CommsActor;

pub struct Envelope {
    pub(crate) message: Message,
    pub(crate) response_tx: Option<mpsc::Sender<Result<Message, String>>>,
    pub(crate) response_filter: Option<Box<dyn Send + Fn(&Message) -> bool>>,
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope").field("message", &self.message).finish()
    }
}

type FilterFn = Box<dyn Send + Fn(&Message) -> bool>;
type ContactDetails = (mpsc::Sender<Result<Message, String>>, FilterFn, u64);

impl CommsActor {
    pub async fn start(
        _tx: mpsc::Sender<Envelope>,
        mut rx: mpsc::Receiver<Envelope>,
        subscriber: ZmqSocket,
        pusher: ZmqSocket,
        _api_settings: ApiSettings,
    ) {
        // Route handlers leave their "contact details" behind so the treasury
        // response can be transferred back to them later.
        let filter_expiry_millis: u64 = 5000;
        let filter_size_limit: usize = 1000;

        let waiting: Arc<Mutex<Vec<ContactDetails>>> = Arc::new(Mutex::new(Vec::with_capacity(filter_size_limit)));

        let (incoming_tx, mut incoming_rx) = broadcast::channel::<Message>(1024);

        {
            let incoming_tx = incoming_tx.clone();
            thread::spawn(move || loop {
                if let Ok(frame) = subscriber.recv_msg(0) {
                    if let Ok(message) = bincode::deserialize::<Message>(&frame) {
                        let _ = incoming_tx.send(message);
                    }
                }
            });
        }

        {
            let waiting = waiting.clone();
            tokio::spawn(async move {
                while let Ok(message) = incoming_rx.recv().await {
                    let mut guard = waiting.lock().await;

                    let mut matched = Vec::new();
                    let mut idx = 0;
                    while idx < guard.len() {
                        if (guard[idx].1)(&message) {
                            matched.push(guard.swap_remove(idx));
                        } else {
                            idx += 1;
                        }
                    }

                    // Filters whose handlers already timed out never match
                    // anything, so stale ones get collected here.
                    if guard.len() > filter_size_limit {
                        let now = time_now();
                        guard.retain(|(_, _, created_at)| now <= created_at + filter_expiry_millis);
                    }
                    drop(guard);

                    for (response_tx, _, _) in matched {
                        let payload = Ok(message.clone());
                        tokio::spawn(async move {
                            let _ = response_tx.send(payload).await;
                        });
                    }
                }
            });
        }

        while let Some(envelope) = rx.recv().await {
            if let (Some(response_tx), Some(response_filter)) = (envelope.response_tx, envelope.response_filter) {
                let mut guard = waiting.lock().await;
                guard.push((response_tx, response_filter, time_now()));
            }
            utils::xzmq::send_as_bincode(&pusher, &envelope.message);
        }
    }
}
