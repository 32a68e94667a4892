use console::style;

const HEADER_WIDTH: usize = 58;

pub fn render_header() {
    let border = "─".repeat(HEADER_WIDTH - 2);
    println!("{}", style(format!("┌{}┐", border)).cyan());
    println!(
        "{}",
        style(format!(
            "│ {:^inner_width$} │",
            "▸ docunlock · Quitar protección de solo lectura ◂",
            inner_width = HEADER_WIDTH - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}\n", style(format!("└{}┘", border)).cyan());
}

pub fn success(message: &str) {
    println!("{} {}", style("[+]").green(), message);
}

pub fn info(message: &str) {
    println!("{} {}", style("[#]").blue(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", style("[!]").yellow(), message);
}

/// Los errores van a stderr para no mezclarse con el reporte.
pub fn error(message: &str) {
    eprintln!("{} {}", style("[-]").red(), message);
}
