mod app;
mod config;
mod error;
mod library;
mod mpris;
mod notify;
mod picker;
mod player;
mod runtime;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
