fn main() {
    if let Err(err) = bbs_loader::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
