use std::{env, env::VarError};

/// There's no real CLI for the proxy, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // None of these are secret, but keep the list explicit anyway
    const DISPLAY_ENVS: [&str; 6] = [
        "RUST_LOG",
        "MC_PROXY_HOST",
        "MC_PROXY_PORT",
        "MC_IMAGE_BACKEND_URL",
        "MC_IMAGE_CACHE_SECS",
        "MC_IMAGE_TIMEOUT_SECS",
    ];

    println!("Current environment values:");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
