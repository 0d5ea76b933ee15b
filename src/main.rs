use nestview::app::NestviewApp;
use nestview::cli::Args;
use nestview::dialogs::prefs::AppSettings;
use nestview::paths;

use clap::Parser;
use eframe::egui;
use log::{debug, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.is_empty() {
        // Print help in GUI mode (no CLI arguments provided)
        use clap::CommandFactory;
        let mut cmd = Args::command();
        let _ = cmd.print_help();
        println!("\n");
    }

    let path_config = paths::PathConfig::from_env_and_cli(args.config_dir.clone());

    if let Err(e) = paths::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| paths::data_file("nestview.log", &path_config));

        let file = std::fs::File::create(&log_path)
            .map_err(|e| format!("Failed to create log file {}: {}", log_path.display(), e))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        // Respects RUST_LOG if set
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }

    info!("Nestview starting...");
    debug!("Command-line args: {:?}", args);

    let config_path = paths::config_file("nestview.json", &path_config);
    info!("Config path: {}", config_path.display());

    // stdin has to be drained before the window takes over the terminal
    let stdin_value = match args.file_path.as_deref() {
        Some(path) if path.as_os_str() == "-" => Some(nestview::Value::load(path)),
        _ => None,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Nestview v{} • F1 for help",
                env!("CARGO_PKG_VERSION")
            ))
            .with_resizable(true)
            .with_drag_and_drop(true),
        persist_window: true,
        persistence_path: Some(config_path),
        ..Default::default()
    };

    eframe::run_native(
        "Nestview",
        native_options,
        Box::new(move |cc| {
            let mut settings: AppSettings = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted settings found, using defaults");
                    AppSettings::default()
                });

            // CLI arguments have priority over persisted settings
            args.apply_overrides(&mut settings.visualizer);

            let mut app = NestviewApp::new(settings, path_config);

            match (args.file_path.as_deref(), stdin_value) {
                (Some(_), Some(Ok(value))) => app.show_stdin(value),
                (Some(_), Some(Err(e))) => {
                    warn!("{:#}", e);
                    app.error_msg = Some(format!("{:#}", e));
                }
                (Some(path), None) => app.load_path(path),
                (None, _) => {
                    if let Some(last) = app.settings.last_file.clone() {
                        if last.exists() {
                            info!("Reopening last file: {}", last.display());
                            app.load_path(&last);
                        } else {
                            debug!("Last file {} is gone, showing sample", last.display());
                        }
                    }
                }
            }

            Ok(Box::new(app))
        }),
    )?;

    info!("Application exiting");
    Ok(())
}
