use clap::Parser;
use docunlock::cli::Args;
use docunlock::protection::strip_protection;
use docunlock::ui;

fn main() {
    let request = Args::parse().into_request();

    ui::render_header();

    match strip_protection(&request) {
        Ok(report) => ui::success(&format!(
            "El archivo \"{}\" ya no tiene protección de solo lectura.",
            report.output.display()
        )),
        Err(error) => {
            ui::error(&error.to_string());
            std::process::exit(error.exit_code());
        }
    }
}
