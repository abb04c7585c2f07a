//! Test doubles shared by unit tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::live::{PushChannel, PushConnector, PushError, PushMessage};
use crate::loader::{LoadError, LoadedData, SchedulerApi};
use crate::model::{
    Appointment, Appointments, Day, Interview, Interviewer, Interviewers,
};

/// Serves fixed collections, or fails every request
pub struct StaticApi {
    data: Option<LoadedData>,
    pub calls: AtomicUsize,
}

impl StaticApi {
    pub fn serving(data: LoadedData) -> Self {
        Self {
            data: Some(data),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            data: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn respond<T>(&self, pick: impl FnOnce(&LoadedData) -> T) -> Result<T, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.data
            .as_ref()
            .map(pick)
            .ok_or_else(|| LoadError::Unavailable("static".to_string()))
    }
}

#[async_trait]
impl SchedulerApi for StaticApi {
    async fn fetch_days(&self) -> Result<Vec<Day>, LoadError> {
        self.respond(|d| d.days.clone())
    }

    async fn fetch_appointments(&self) -> Result<Appointments, LoadError> {
        self.respond(|d| d.appointments.clone())
    }

    async fn fetch_interviewers(&self) -> Result<Interviewers, LoadError> {
        self.respond(|d| d.interviewers.clone())
    }
}

/// Channel fed from an in-process queue
pub struct ScriptedChannel {
    inbound: mpsc::UnboundedReceiver<String>,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl PushChannel for ScriptedChannel {
    async fn recv(&mut self) -> Option<Result<String, PushError>> {
        self.inbound.recv().await.map(Ok)
    }

    async fn close(&mut self) -> Result<(), PushError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out one [`ScriptedChannel`]; later connects fail
pub struct ScriptedConnector {
    channel: Mutex<Option<ScriptedChannel>>,
    pub closes: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    /// Connector plus the sender feeding its channel
    pub fn new() -> (Arc<Self>, mpsc::UnboundedSender<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let closes = Arc::new(AtomicUsize::new(0));
        let connector = Arc::new(Self {
            channel: Mutex::new(Some(ScriptedChannel {
                inbound: rx,
                closes: Arc::clone(&closes),
            })),
            closes,
        });
        (connector, tx)
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            channel: Mutex::new(None),
            closes: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushConnector for ScriptedConnector {
    async fn connect(&self) -> Result<Box<dyn PushChannel>, PushError> {
        let channel = self.channel.lock().unwrap().take();
        match channel {
            Some(channel) => Ok(Box::new(channel)),
            None => Err(PushError::Connect {
                url: "scripted".to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// One day with a free and a booked slot
pub fn sample_data() -> LoadedData {
    let mut appointments = Appointments::new();
    appointments.insert(1, Appointment::new(1, "12pm"));
    appointments.insert(
        2,
        Appointment::new(2, "1pm").booked(Interview::new("Archie Cohen", 1)),
    );

    let mut interviewers = Interviewers::new();
    interviewers.insert(
        1,
        Interviewer::new(1, "Sylvia Palmer", "https://i.imgur.com/LpaY82x.png"),
    );
    interviewers.insert(
        3,
        Interviewer::new(3, "Mildred Nazir", "https://i.imgur.com/T2WwVfS.png"),
    );

    LoadedData {
        days: vec![Day::new(1, "Monday").appointments([1, 2]).interviewers([1, 3]).spots(1)],
        appointments,
        interviewers,
    }
}

/// Wire text of a booking message
pub fn booking(id: u32, student: &str, interviewer: u32) -> String {
    serde_json::to_string(&PushMessage::set_interview(
        id,
        Some(Interview::new(student, interviewer)),
    ))
    .unwrap()
}
