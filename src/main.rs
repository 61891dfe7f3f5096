fn main() {
    if let Err(err) = ortho_router::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
