use iced::widget::{container, text};
use iced::{Background, Element, Length};

use crate::app::Message;
use crate::reading::Reading;

/// A single surface filled with the latest reading, with its values on top.
pub fn view<'a>(reading: Option<Reading>) -> Element<'a, Message> {
    let label = reading.map(|r| r.label()).unwrap_or_default();
    let fill = reading.map(|r| r.fill());

    container(text(label).size(16))
        .center(Length::Fill)
        .style(move |_theme| container::Style {
            background: fill.map(Background::Color),
            ..container::Style::default()
        })
        .into()
}
