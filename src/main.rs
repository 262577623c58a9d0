//zbind/src/main.rs
use std::process::ExitCode;

use zbind::kernel::services::adapters::store_config;
use zbind::{
    default_keybindings, BindingMap, BindingStore, InMemoryCommandTable, JsonFileStorage,
    StoreConfig,
};

mod cli;
mod logging;

use cli::{parse_args, CliCommand, USAGE};

fn main() -> ExitCode {
    let logging = logging::init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if command == CliCommand::Help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let config = store_config().unwrap_or_default();
    if command == CliCommand::Path {
        println!("{}", config.file_path().display());
        if let Some(guard) = logging.as_ref() {
            println!("logs: {}", guard.log_dir().display());
        }
        return ExitCode::SUCCESS;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "create tokio runtime failed");
            eprintln!("zbind: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(command, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "zbind failed");
            eprintln!("zbind: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: CliCommand, config: StoreConfig) -> Result<(), zbind::StoreError> {
    let defaults = default_keybindings();
    let storage = JsonFileStorage::from_config(&config);
    let mut store = BindingStore::new(&defaults, storage)
        .with_config(config)
        .with_notifier(|message: &str| eprintln!("{message}"));

    store
        .initialize(InMemoryCommandTable::from_bindings(&defaults))
        .await?;

    match command {
        CliCommand::Show(None) => print_json(store.value()),
        CliCommand::Show(Some(key)) => match store.get(&key) {
            Some(value) => println!("{value}"),
            None => eprintln!("unknown keybinding: {key}"),
        },
        CliCommand::Set { key, value } => {
            if !store.has(&key) {
                eprintln!("unknown keybinding: {key}");
                return Ok(());
            }
            let mut patch = BindingMap::new();
            patch.insert(key, value);
            let changed = store.update(patch).await?;
            tracing::info!(keys = ?changed, "keybindings set");
        }
        CliCommand::Reset(keys) => {
            let changed = store.reset(keys).await?;
            tracing::info!(keys = ?changed, "keybindings reset");
            println!("{} binding(s) restored", changed.len());
        }
        CliCommand::Path | CliCommand::Help => {}
    }

    Ok(())
}

fn print_json(bindings: &BindingMap) {
    match serde_json::to_string_pretty(bindings) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("zbind: {e}"),
    }
}
