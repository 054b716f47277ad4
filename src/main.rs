mod audio;
mod config;
mod library;
mod player;
mod runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
