mod config;
mod engine;
mod error;
mod playlist;
mod remote;
mod runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
