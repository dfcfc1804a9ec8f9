use std::time::Duration;

use iced::time::{self, Instant};
use iced::{Element, Subscription};

use crate::config::PortSettings;
use crate::monitor::Monitor;
use crate::serial::SerialLink;

#[derive(Debug, Clone)]
pub enum Message {
    Tick(Instant),
}

pub struct App {
    monitor: Monitor<SerialLink>,
    poll_interval: Duration,
}

impl App {
    pub fn new(link: SerialLink, settings: &PortSettings) -> Self {
        Self {
            monitor: Monitor::new(link),
            poll_interval: settings.poll_interval,
        }
    }

    pub fn title(&self) -> String {
        format!("Color monitor - {}", self.monitor.source().name())
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick(_) => {
                self.monitor.tick();
            }
        }
    }

    pub fn view(&self) -> Element<Message> {
        crate::ui::view(self.monitor.current())
    }

    pub fn subscription(&self) -> Subscription<Message> {
        time::every(self.poll_interval).map(Message::Tick)
    }
}
