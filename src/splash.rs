//! Startup splash.

use colored::*;

const LOGO: &str = r"
  _____         _    _____ _
 |_   _|_ _ ___| | _|  ___| | _____      __
   | |/ _` / __| |/ / |_  | |/ _ \ \ /\ / /
   | | (_| \__ \   <|  _| | | (_) \ V  V /
   |_|\__,_|___/_|\_\_|   |_|\___/ \_/\_/
";

const TAGLINE: &str = "Nested task runner with live progress tracking";

/// Print the logo, version and tagline.
pub fn display_splash() {
    println!("{}", LOGO.cyan().bold());
    println!("  {}", format!("Version {}", env!("CARGO_PKG_VERSION")).dimmed());
    println!("  {}", TAGLINE.green().italic());
    println!("  {}", "Press Ctrl+C to cancel".dimmed());
    println!();
}
