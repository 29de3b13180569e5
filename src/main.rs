//! rTimekeeper main entrypoint.

use rtimekeeper::run;
use rtimekeeper::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
