use serde_json::Value;

pub const USAGE: &str = "\
usage: zbind <command>

commands:
  path                  print the keybindings file location
  show [key]            print all bindings, or one binding
  set <key> <json>      replace a binding (plain text is taken as a shortcut string)
  reset [key...]        restore defaults for the given keys, or for all keys";

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Path,
    Show(Option<String>),
    Set { key: String, value: Value },
    Reset(Vec<String>),
    Help,
}

pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(CliCommand::Help);
    };

    match command.as_str() {
        "path" => Ok(CliCommand::Path),
        "show" => {
            let key = args.next();
            if args.next().is_some() {
                return Err("show takes at most one key".to_string());
            }
            Ok(CliCommand::Show(key))
        }
        "set" => {
            let key = args.next().ok_or("set needs a key")?;
            let raw = args.next().ok_or("set needs a value")?;
            if args.next().is_some() {
                return Err("set takes exactly a key and a value".to_string());
            }
            Ok(CliCommand::Set {
                key,
                value: parse_value(&raw),
            })
        }
        "reset" => Ok(CliCommand::Reset(args.collect())),
        "help" | "-h" | "--help" => Ok(CliCommand::Help),
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
#[path = "../tests/unit/cli.rs"]
mod tests;
