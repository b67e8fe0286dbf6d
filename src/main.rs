use pathtree::PathTreeError;
use pathtree::output as out;

mod app;
mod logging;

fn main() {
    let args = pathtree::cli::parse();
    if let Err(e) = app::run(args) {
        out::print_error(&format!("{e:#}"));
        // Library failures carry a stable code; everything else is a generic 1.
        let code = e.downcast_ref::<PathTreeError>().map_or(1, PathTreeError::code);
        std::process::exit(code);
    }
}
