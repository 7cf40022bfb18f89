use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, info, warn};

use webdisplay_core::config::WebDisplayConfig;
use webdisplay_core::events;
use webdisplay_core::{LaunchMethod, Manager, WebDisplayError};

use crate::server::{NamedHandler, ReservingServer};

/// Connection name of the window created by `show`.
const WINDOW_NAME: &str = "win1";

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via
/// stderr and the structured log event `cli.config.load_failed`.
fn load_config_with_warning() -> WebDisplayConfig {
    match WebDisplayConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.webdisplay/config.toml and ./.webdisplay/config.toml for errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                error_code = e.error_code(),
                "Config load failed, using defaults"
            );
            WebDisplayConfig::default()
        }
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let command = matches.subcommand_name().unwrap_or_default();
    events::log_command_started(command);

    let result = match matches.subcommand() {
        Some(("bind", sub_matches)) => handle_bind_command(sub_matches),
        Some(("show", sub_matches)) => handle_show_command(sub_matches),
        Some(("halt", sub_matches)) => handle_halt_command(sub_matches),
        Some(("config", sub_matches)) => handle_config_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_command_finished(command, result.is_ok());
    result
}

fn handle_bind_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config_with_warning();
    if let Some(port) = matches.get_one::<i32>("port") {
        config.http.port = *port;
    }
    let json_output = matches.get_flag("json");

    info!(event = "cli.bind_started", port = config.http.port);

    let server = ReservingServer::new();
    let mut manager = Manager::builder(config, server.factory()).build();

    match manager.ensure_server(true) {
        Ok(()) => {
            let address = manager.address().unwrap_or_default().to_string();
            if json_output {
                println!("{}", serde_json::json!({ "address": address }));
            } else {
                println!("✅ Listener bound");
                println!("   Address: {}", address);
            }
            info!(event = "cli.bind_completed", address = address.as_str());
            manager.terminate();
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to bind listener: {}", e);
            error!(event = "cli.bind_failed", error = %e, error_code = e.error_code());
            events::log_command_error(&e);
            Err(e.into())
        }
    }
}

fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let target = matches
        .get_one::<String>("target")
        .map(String::as_str)
        .unwrap_or_default();
    let batch_mode = matches.get_flag("batch");
    let width = matches.get_one::<u32>("width").copied().unwrap_or(0);
    let height = matches.get_one::<u32>("height").copied().unwrap_or(0);
    let wait = matches.get_one::<f64>("wait").copied();

    info!(event = "cli.show_started", target = target, batch_mode = batch_mode);

    let config = load_config_with_warning();
    let server = ReservingServer::new();
    let mut manager = Manager::builder(config, server.factory()).build();

    let handler = Arc::new(NamedHandler(WINDOW_NAME.to_string()));
    let mut window = match manager.create_window(batch_mode, handler) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("❌ Failed to create window: {}", e);
            error!(event = "cli.show_failed", error = %e, error_code = e.error_code());
            events::log_command_error(&e);
            return Err(e.into());
        }
    };
    window.set_geometry(width, height);

    let outcome = match manager.show(&mut window, target) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("❌ Failed to show window: {}", e);
            error!(event = "cli.show_failed", error = %e, error_code = e.error_code());
            events::log_command_error(&e);
            manager.unregister(&mut window);
            return Err(e.into());
        }
    };

    println!("✅ Window {} shown", window.id());
    println!("   URL: {}", outcome.url);
    println!("   Key: {}", outcome.key);
    match &outcome.method {
        LaunchMethod::Embedded(kind) => println!("   Client: {} (in-process)", kind),
        LaunchMethod::Process(record) => println!("   Client: {}", record),
        LaunchMethod::Shell(_) => println!("   Client: shell command"),
    }

    // Without --wait the client outlives this command; halt it with `webdisplay halt`.
    if let Some(limit) = wait {
        let listener = server.clone();
        let connected = manager.wait_for(|_| i32::from(listener.poll_connection()), limit);
        if connected != 0 {
            println!("   Client connected");
        } else {
            println!("   No client connected before timeout");
        }
        info!(event = "cli.show_wait_completed", connected = connected != 0);
        manager.unregister(&mut window);
    } else if let LaunchMethod::Process(record) = &outcome.method {
        println!("   Client left running, stop it with: webdisplay halt {}", record);
    }
    manager.terminate();

    info!(
        event = "cli.show_completed",
        window_id = window.id().as_u32(),
        method = outcome.method.record().as_str()
    );
    Ok(())
}

fn handle_halt_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let record = matches
        .get_one::<String>("record")
        .ok_or("Record argument is required")?;

    info!(event = "cli.halt_started", record = record.as_str());

    let server = ReservingServer::new();
    let manager = Manager::builder(WebDisplayConfig::default(), server.factory()).build();

    match manager.halt_client(record) {
        Ok(()) => {
            println!("✅ Halt processed for '{}'", record);
            info!(event = "cli.halt_completed", record = record.as_str());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to halt '{}': {}", record, e);
            error!(event = "cli.halt_failed", record = record.as_str(), error = %e);
            events::log_command_error(&e);
            Err(e.into())
        }
    }
}

fn handle_config_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }

    info!(event = "cli.config_completed");
    Ok(())
}
