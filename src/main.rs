mod app;
mod audio;
mod config;
mod error;
mod playlist;
mod runtime;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
