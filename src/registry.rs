use crate::builtin::{BuiltinCommand, Cd, Exit, Help, InvalidArgs};
use crate::command::{CommandFactory, ExecutableCommand};
use argh::EarlyExit;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports builtins defined in this crate. Arguments are parsed with argh after an
/// implicit `--`, so tokens such as `help`, `--help` or `-x` reach the builtin as plain
/// positionals. If argh still refuses them, an [`InvalidArgs`] carrying its output is created.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn create(&self, args: &[&str]) -> Box<dyn ExecutableCommand> {
        let (name, rest) = match args.split_first() {
            Some((name, rest)) => (*name, rest),
            None => (T::name(), &[][..]),
        };
        let positional: Vec<&str> = std::iter::once("--").chain(rest.iter().copied()).collect();
        match T::from_args(&[name], &positional) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, .. }) => Box::new(InvalidArgs { output }),
        }
    }
}

/// Ordered table of builtin commands.
///
/// Lookup is an exact, case-sensitive name match; names are unique and kept in
/// registration order, which is also the order `help` prints them in.
pub struct Registry {
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Registry {
    /// A registry without any builtins.
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a builtin. Fails if a builtin with the same name already exists.
    pub fn register(&mut self, factory: Box<dyn CommandFactory>) -> anyhow::Result<()> {
        let name = factory.name();
        if self.lookup(name).is_some() {
            anyhow::bail!("builtin already registered: {}", name);
        }
        self.commands.push(factory);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn CommandFactory> {
        self.commands
            .iter()
            .find(|factory| factory.name() == name)
            .map(|factory| &**factory)
    }

    pub fn count(&self) -> usize {
        self.commands.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|factory| factory.name()).collect()
    }
}

impl Default for Registry {
    /// Create a registry with the standard builtins: `cd`, `help`, `exit`.
    fn default() -> Self {
        Self {
            commands: vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        }
    }
}
