mod app;
mod config;
mod monitor;
mod reading;
mod serial;
mod ui;

use app::App;
use config::{Args, PortSettings};
use iced::Task;
use serial::SerialLink;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Args = argh::from_env();
    let settings = PortSettings::default();

    let port_name = match args.port {
        Some(name) => name,
        None => serial::find_device_port(&settings)?,
    };

    info!(port = %port_name, baud = settings.baud_rate, "opening serial port");
    let link = SerialLink::open(&port_name, &settings)?;

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size((600.0, 480.0))
        .run_with(move || (App::new(link, &settings), Task::none()))?;

    Ok(())
}
