use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("webdisplay")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Show web windows in browsers and embedded engines")
        .long_about("webdisplay binds an HTTP listener for web windows, issues one-time connection keys and launches the display client for a window: the OS default browser, chrome, chromium, firefox, or any command template using $url, $width, $height and $prog.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("bind")
                .about("Bind a network listener and print its address")
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .help("Explicit port (overrides http.port, 0 picks one from the range)")
                        .value_parser(value_parser!(i32))
                        .allow_negative_numbers(true)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("show")
                .about("Create a window and launch a display client for it (the client keeps running unless --wait is given)")
                .arg(
                    Arg::new("target")
                        .help("Display target: native, browser, chrome, chromium, firefox, cef, qt5, a program or a command template")
                        .default_value("")
                        .hide_default_value(true)
                        .index(1)
                )
                .arg(
                    Arg::new("batch")
                        .long("batch")
                        .help("Show the window in batch (headless) mode")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .help("Window width in pixels")
                        .value_parser(value_parser!(u32))
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .help("Window height in pixels")
                        .value_parser(value_parser!(u32))
                )
                .arg(
                    Arg::new("wait")
                        .long("wait")
                        .help("Seconds to wait for the client to connect before stopping it (0 waits forever, negative uses display.wait_timeout_secs)")
                        .value_parser(value_parser!(f64))
                        .allow_negative_numbers(true)
                )
        )
        .subcommand(
            Command::new("halt")
                .about("Terminate a display client from its launch record")
                .arg(
                    Arg::new("record")
                        .help("Launch record, e.g. pid:1234")
                        .required(true)
                        .index(1)
                )
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
}
