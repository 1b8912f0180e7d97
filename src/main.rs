fn main() {
    if let Err(err) = cardioshield_report::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
