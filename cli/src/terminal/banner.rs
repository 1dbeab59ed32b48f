use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
     _      ____                       _     _
    (_)___ |___ \ _ __  _ __ _____   _(_) __| | ___ _ __
    | | '_ \ __) | '_ \| '__/ _ \ \ / / |/ _` |/ _ \ '__|
    | | |_) / __/| |_) | | | (_) \ V /| | (_| |  __/ |
    |_| .__/_____| .__/|_|  \___/ \_/ |_|\__,_|\___|_|
      |_|        |_|
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_cyan().bold()));
}
