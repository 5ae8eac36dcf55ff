use crate::config::ShellConfig;
use crate::core::env::Environment;

mod cd;

pub use cd::change_directory;

/// Continuation signal returned by dispatch: keep looping or terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The closed set of builtin commands, resolved once from the
/// (case-insensitive) command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Ls,
    ConfDump,
    Unknown,
}

impl Builtin {
    /// Expects an already-lowercased name; matching is exact, no prefixes.
    fn resolve(name: &str) -> Self {
        match name {
            "exit" => Builtin::Exit,
            "cd" => Builtin::Cd,
            "ls" => Builtin::Ls,
            "conf-dump" => Builtin::ConfDump,
            _ => Builtin::Unknown,
        }
    }
}

/// Maps expanded token lists to builtin behavior. Holds no state of its
/// own; the configuration is read-only and the only mutation any builtin
/// performs is the working-directory change done by `cd`.
pub struct Dispatcher<'a> {
    config: &'a ShellConfig,
    env: &'a dyn Environment,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a ShellConfig, env: &'a dyn Environment) -> Self {
        Self { config, env }
    }

    pub fn dispatch(&self, args: &[String]) -> Flow {
        let name = match args.first() {
            Some(first) => first.to_lowercase(),
            None => return Flow::Continue,
        };

        match Builtin::resolve(&name) {
            Builtin::Exit => {
                println!("Goodbye!");
                Flow::Exit
            }
            Builtin::Cd => {
                change_directory(args.get(1).map(String::as_str), self.env);
                Flow::Continue
            }
            Builtin::Ls => {
                println!("ls called with arguments: {}", format_arg_list(&args[1..]));
                Flow::Continue
            }
            Builtin::ConfDump => {
                println!("=== Current Shell Configuration ===");
                self.config.dump();
                println!("===================================");
                Flow::Continue
            }
            Builtin::Unknown => {
                println!(
                    "Command not implemented: {}. Arguments: {}",
                    name,
                    format_arg_list(&args[1..])
                );
                Flow::Continue
            }
        }
    }
}

/// Renders arguments the way the stub output format requires:
/// `['-la', 'foo']`, or `[]` when empty.
fn format_arg_list(args: &[String]) -> String {
    let items: Vec<String> = args.iter().map(|a| format!("'{}'", a)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::testing::FakeEnvironment;

    fn dispatch(args: &[&str]) -> Flow {
        let config = ShellConfig::default();
        let env = FakeEnvironment::new(&[]);
        let dispatcher = Dispatcher::new(&config, &env);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        dispatcher.dispatch(&args)
    }

    #[test]
    fn test_empty_args_continue() {
        assert_eq!(dispatch(&[]), Flow::Continue);
    }

    #[test]
    fn test_exit_stops_the_loop() {
        assert_eq!(dispatch(&["exit"]), Flow::Exit);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(dispatch(&["EXIT"]), Flow::Exit);
        assert_eq!(dispatch(&["Ls", "foo"]), Flow::Continue);
    }

    #[test]
    fn test_stub_commands_continue() {
        assert_eq!(dispatch(&["ls", "-la", "foo"]), Flow::Continue);
        assert_eq!(dispatch(&["conf-dump"]), Flow::Continue);
        assert_eq!(dispatch(&["frobnicate", "a", "b"]), Flow::Continue);
    }

    #[test]
    fn test_no_partial_matching() {
        assert_eq!(Builtin::resolve("exi"), Builtin::Unknown);
        assert_eq!(Builtin::resolve("exits"), Builtin::Unknown);
        assert_eq!(Builtin::resolve("conf-dum"), Builtin::Unknown);
    }

    #[test]
    fn test_format_arg_list() {
        assert_eq!(format_arg_list(&[]), "[]");
        assert_eq!(
            format_arg_list(&["-la".to_string(), "foo".to_string()]),
            "['-la', 'foo']"
        );
    }
}
