mod app;
mod game;
mod ui;

fn main() {
    env_logger::init();

    if let Err(e) = app::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
