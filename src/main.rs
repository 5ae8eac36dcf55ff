use std::env;

use shemu::config::{load_config_file, ShellConfig};
use shemu::core::commands::Dispatcher;
use shemu::core::env::OsEnvironment;
use shemu::error::ShellError;
use shemu::flags::Flags;
use shemu::script::{run_script, ScriptStatus};
use shemu::shell::Shell;

fn main() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("shemu {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let file_data = match flags.get_value("config-file") {
        Some(path) => {
            let data = load_config_file(path);
            if data.is_none() {
                println!("Failed to load configuration file. Using command line arguments only.");
            }
            data
        }
        None => None,
    };

    let config = ShellConfig::merge(&flags, file_data);
    config.debug_print();

    if let Some(script_path) = config.startup_script.clone() {
        let env_view = OsEnvironment::new();
        let dispatcher = Dispatcher::new(&config, &env_view);
        let status = run_script(&script_path, &env_view, |args| dispatcher.dispatch(args));
        if status == ScriptStatus::Interrupted {
            println!("Startup script execution failed. Starting interactive mode...");
        }
    }

    let mut shell = Shell::new(config)?;
    shell.run()
}
